// --- File: crates/tradebook_config/src/lib.rs ---
use config::{Config, Environment, File, FileFormat};
use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;
use tracing::debug;

pub mod env_vars;
pub mod models;

pub use config::ConfigError;
pub use models::*;

/// Distance Matrix endpoint used when `maps.base_url` is not configured.
pub const DEFAULT_DISTANCE_MATRIX_URL: &str =
    "https://maps.googleapis.com/maps/api/distancematrix/json";

/// Loads the application configuration once at startup.
///
/// Sources, lowest precedence first: built-in defaults, `config/default`,
/// `config/{RUN_ENV}`, the flat legacy variables (`GOOGLE_CALENDAR_ID`, `BASE_ADDRESS`, ...)
/// and finally `TRADEBOOK__SECTION__KEY` variables. The result is validated, so a missing
/// credential or base address fails here instead of on the first request.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir = PathBuf::from(env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string()));
    let prefix = env_vars::get_config_prefix();

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);
    debug!(
        "Loading config from {} and {} (prefix {})",
        default_path.display(),
        env_path.display(),
        prefix
    );

    let legacy = env_vars::legacy_overrides(|key| env::var(key).ok())?;

    let builder = Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8050)?
        .set_default("gcal.key_path", "service-account.json")?
        .set_default("maps.base_url", DEFAULT_DISTANCE_MATRIX_URL)?
        .add_source(File::from(default_path).required(false))
        .add_source(File::from(env_path).required(false))
        .add_source(File::from_str(&legacy.to_string(), FileFormat::Json))
        .add_source(
            Environment::with_prefix(&prefix)
                .separator(env_vars::CONFIG_SEPARATOR)
                .try_parsing(true),
        );

    let config: AppConfig = builder.build()?.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads `.env` (or the file named by `DOTENV_OVERRIDE`) into the process environment,
/// at most once per process. Returns the path that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = std::env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
