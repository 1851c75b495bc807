//! Folio Server Binary

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueHint};
use folio_common_config::{vars, Environment};
use folio_common_log::{LogConfig, LogFormat, LogLevel};
use folio_server::config::{validate_config, ConfigLoader};
use folio_server::{ContentValidation, Server, ServerConfig};
use tracing::{error, info, warn};

/// Application exit codes
#[repr(u8)]
pub enum Exit {
    Success = 0,
    GeneralError = 1,
    ConfigError = 2,
    ValidationError = 5,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

/// Portfolio content API server
#[derive(Debug, Parser)]
#[command(name = "folio-server", author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a configuration file
    #[arg(short, long, global = true, env = "FOLIO_CONFIG_PATH", value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,

    /// Load every content section and report the ones that fail
    Validate {
        /// Content directory to check instead of the configured one
        #[arg(long, value_hint = ValueHint::DirPath)]
        content_dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    // .env files must be loaded before clap reads env-backed arguments.
    if let Err(e) = Environment::init() {
        eprintln!("{e}");
        return Exit::ConfigError.into();
    }

    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = match loader.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            return Exit::ConfigError.into();
        }
    };

    if let Err(e) = folio_common_log::init(log_config(&config)) {
        eprintln!("{e}");
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "Failed to create Tokio runtime");
            return Exit::GeneralError.into();
        }
    };

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => runtime.block_on(serve(config)),
        Command::Validate { content_dir } => {
            let dir = content_dir.unwrap_or_else(|| config.content.dir.clone());
            runtime.block_on(validate(dir))
        }
    }
}

/// Environment settings win; the config file fills in the rest.
fn log_config(config: &ServerConfig) -> LogConfig {
    let from_env = LogConfig::from_env();

    let level_from_env = Environment::get(vars::FOLIO_LOG_LEVEL)
        .or_else(|| Environment::get(vars::RUST_LOG))
        .is_some();
    let level = if level_from_env {
        from_env.level
    } else {
        LogLevel::parse(&config.logging.level).unwrap_or_default()
    };
    let format = match Environment::get("FOLIO_LOG_FORMAT") {
        Some(_) => from_env.format,
        None => LogFormat::parse(&config.logging.format),
    };

    from_env.with_level_and_format(level, format)
}

async fn serve(config: ServerConfig) -> ExitCode {
    if let Err(errors) = validate_config(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        return Exit::ConfigError.into();
    }

    info!(
        version = %config.app.version,
        mode = %config.mode(),
        "Starting Folio server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let server = match Server::new(config) {
        Ok(server) => server,
        Err(e) => {
            error!(error = %e, "Failed to build server");
            return Exit::GeneralError.into();
        }
    };

    match server.run().await {
        Ok(()) => {
            info!("Server shutdown complete");
            Exit::Success.into()
        }
        Err(e) => {
            error!(error = %e, "Server error");
            Exit::GeneralError.into()
        }
    }
}

async fn validate(dir: PathBuf) -> ExitCode {
    let validation = ContentValidation::run(&dir).await;

    for line in validation.lines() {
        println!("{line}");
    }

    if validation.is_valid() {
        println!("All sections in {} loaded", dir.display());
        Exit::Success.into()
    } else {
        warn!(
            dir = %dir.display(),
            failures = validation.failure_count(),
            "Content validation failed"
        );
        Exit::ValidationError.into()
    }
}
