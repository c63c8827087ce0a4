use crate::error::ConfigError;
use crate::model::ConfigModel;
use tracing::debug;
use vconf_domain::FieldValue;

/// Wraps `op` so it only runs while the configuration named by `keys` is enabled.
///
/// When it is disabled the wrapper returns [`ConfigError::FeatureDisabled`] (converted into the
/// caller's error type) without calling `op`. The check happens on every call.
pub fn require_config<A, T, E, F>(
    model: ConfigModel,
    keys: Vec<FieldValue>,
    op: F,
) -> impl Fn(A) -> Result<T, E>
where
    F: Fn(A) -> Result<T, E>,
    E: From<ConfigError>,
{
    move |arg| {
        if !model.is_enabled(&keys)? {
            debug!(schema = model.name(), "Gated operation skipped, configuration disabled");
            return Err(ConfigError::FeatureDisabled {
                message: model.name().to_owned().into(),
                context: None,
            }
            .into());
        }
        op(arg)
    }
}
