use config::{Config, Environment, File};
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::env;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

pub mod models;
pub use models::*;


/// Prefix for configuration environment variables, e.g. `REPCAL__SERVER__PORT`.
pub const DEFAULT_PREFIX: &str = "REPCAL";

/// Marker value replaced by an environment variable named after the value's path.
pub const SECRET_MARKER: &str = "secret_from_env";

#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("Failed to load configuration: {0}")]
    Source(#[from] config::ConfigError),
    #[error("Failed to apply environment secrets: {0}")]
    Secrets(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Loads the layered application configuration.
///
/// Sources, later ones overriding earlier ones:
/// `config/default.*`, `config/{RUN_ENV}.*` and `REPCAL__*` environment variables.
/// The directory can be moved with `REPCAL_CONFIG_DIR`.
pub fn load_config() -> Result<AppConfig, ConfigLoadError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir =
        PathBuf::from(env::var("REPCAL_CONFIG_DIR").unwrap_or_else(|_| "config".to_string()));

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);
    debug!(
        "Loading config from {} and {}",
        default_path.display(),
        env_path.display()
    );

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(Environment::with_prefix(DEFAULT_PREFIX).separator("__"));

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    let config = apply_env_overrides_from_marker(raw_config)?;
    validate(&config)?;
    Ok(config)
}

/// Rejects values the scheduling engine cannot honor.
pub fn validate(config: &AppConfig) -> Result<(), ConfigLoadError> {
    if config.scheduling.granularity_minutes != DEFAULT_GRANULARITY_MINUTES {
        return Err(ConfigLoadError::Invalid(format!(
            "scheduling.granularity_minutes must be {}, got {}",
            DEFAULT_GRANULARITY_MINUTES, config.scheduling.granularity_minutes
        )));
    }
    if config.use_gcal && config.gcal.is_none() {
        warn!("use_gcal is set but no [gcal] section is present; calendar sync stays disabled");
    }
    Ok(())
}

/// Recursively replaces all "secret_from_env" string values with environment variable values
fn inject_env_secrets(value: &mut Value) {
    fn walk(path: Vec<String>, obj: &mut Value) {
        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    let mut new_path = path.clone();
                    new_path.push(k.to_string());
                    walk(new_path, v);
                }
            }
            Value::String(s) if s == SECRET_MARKER => {
                let env_key = path.join("_").to_uppercase();
                if let Ok(env_val) = env::var(&env_key) {
                    *obj = Value::String(env_val);
                } else {
                    warn!("env var {} not found for {}", env_key, SECRET_MARKER);
                }
            }
            _ => {}
        }
    }

    walk(vec![], value);
}

/// Applies environment overrides based on "secret_from_env" markers in serialized config
pub fn apply_env_overrides_from_marker(config: AppConfig) -> Result<AppConfig, ConfigLoadError> {
    let mut json = serde_json::to_value(&config)?;
    inject_env_secrets(&mut json);
    Ok(serde_json::from_value(json)?)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the dotenv file once per process.
///
/// `DOTENV_OVERRIDE` selects the file, otherwise `.env` in the working directory is used.
/// A missing file is not an error.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
