use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Settings file looked up in the working directory when no path is given (any supported
/// extension).
pub const DEFAULT_CONFIG_STEM: &str = "vconf";
/// Prefix of environment overrides, e.g. `VCONF__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "VCONF";

#[vconf_derive::config_error]
pub enum ConfigLoadError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Layered settings loader: a file, then `VCONF__` environment overrides.
///
/// An explicit `path` must exist. Without one, `vconf.{toml,json,yaml,..}` in the working
/// directory is used if present, so a bare environment is enough to run.
///
/// Nested keys use double underscores: `VCONF__STORE__JOURNAL` maps to `store.journal`.
///
/// # Errors
/// Fails when an explicit file is missing or the merged settings do not deserialize into `T`.
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigLoadError>
where
    T: DeserializeOwned,
{
    let (file, required) = path.map_or_else(
        || (PathBuf::from(DEFAULT_CONFIG_STEM), false),
        |p| (p.as_ref().to_path_buf(), true),
    );

    let builder = Config::builder()
        .add_source(File::from(file.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX).separator("__").convert_case(config::Case::Snake),
        );

    info!(path = %file.display(), required, "Loading settings");

    let settings = builder
        .build()
        .context("Failed to build settings")?
        .try_deserialize::<T>()
        .context("Failed to deserialize settings")?;

    Ok(settings)
}
