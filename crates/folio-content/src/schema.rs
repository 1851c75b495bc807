//! Shape checks applied after parsing.

use crate::convert::kind_of;
use crate::error::SectionError;
use crate::section::Section;
use serde_json::Value;

/// Every section document must be a mapping at its root.
pub fn check_shape(section: Section, value: &Value) -> Result<(), SectionError> {
    if value.is_object() {
        Ok(())
    } else {
        Err(SectionError::SchemaMismatch {
            section,
            found: kind_of(value),
        })
    }
}
