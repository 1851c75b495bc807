//! YAML to JSON value conversion.
//!
//! YAML is a superset of what JSON can carry, so a few things are lossy:
//! non-string mapping keys are stringified, tags are dropped in favour of
//! the tagged value, and non-finite floats become `null`.

use serde_json::{Map, Number, Value as Json};
use serde_yaml::Value as Yaml;

pub fn yaml_to_json(value: Yaml) -> Json {
    match value {
        Yaml::Null => Json::Null,
        Yaml::Bool(b) => Json::Bool(b),
        Yaml::Number(n) => number_to_json(&n),
        Yaml::String(s) => Json::String(s),
        Yaml::Sequence(items) => Json::Array(items.into_iter().map(yaml_to_json).collect()),
        Yaml::Mapping(mapping) => {
            let mut object = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                object.insert(key_to_string(&key), yaml_to_json(value));
            }
            Json::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn number_to_json(n: &serde_yaml::Number) -> Json {
    if let Some(i) = n.as_i64() {
        Json::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        Json::Number(u.into())
    } else {
        n.as_f64()
            .and_then(Number::from_f64)
            .map(Json::Number)
            .unwrap_or(Json::Null)
    }
}

fn key_to_string(key: &Yaml) -> String {
    match key {
        Yaml::String(s) => s.clone(),
        Yaml::Number(n) => n.to_string(),
        Yaml::Bool(b) => b.to_string(),
        Yaml::Null => "null".to_string(),
        Yaml::Tagged(tagged) => key_to_string(&tagged.value),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Short name of a JSON value's type, for error messages.
pub fn kind_of(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "sequence",
        Json::Object(_) => "mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn convert(yaml: &str) -> Json {
        yaml_to_json(serde_yaml::from_str(yaml).unwrap())
    }

    #[test]
    fn test_nested_structure() {
        let value = convert(
            "title: Hello\nitems:\n  - name: a\n    count: 2\n  - name: b\n    ratio: 0.5\nlive: true\nnote: ~\n",
        );
        assert_eq!(
            value,
            json!({
                "title": "Hello",
                "items": [{ "name": "a", "count": 2 }, { "name": "b", "ratio": 0.5 }],
                "live": true,
                "note": null
            })
        );
    }

    #[test]
    fn test_non_string_keys_are_stringified() {
        let value = convert("2024: launch\ntrue: yes\n1.5: half\n");
        assert_eq!(value["2024"], "launch");
        assert_eq!(value["true"], "yes");
        assert_eq!(value["1.5"], "half");
    }

    #[test]
    fn test_non_finite_floats_become_null() {
        let value = convert("a: .inf\nb: .nan\n");
        assert_eq!(value, json!({ "a": null, "b": null }));
    }

    #[test]
    fn test_tags_are_dropped() {
        let value = convert("when: !date 2024-01-01\n");
        assert_eq!(value, json!({ "when": "2024-01-01" }));
    }

    #[test]
    fn test_kind_of() {
        assert_eq!(kind_of(&json!([1])), "sequence");
        assert_eq!(kind_of(&json!({})), "mapping");
        assert_eq!(kind_of(&json!("s")), "string");
    }
}
