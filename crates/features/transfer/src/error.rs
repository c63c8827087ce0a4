use std::borrow::Cow;
use vconf_models::ConfigError;

#[vconf_derive::config_error]
pub enum TransferError {
    /// The input is not a valid import document.
    #[error("Malformed input{}: {message}", format_context(.context))]
    MalformedInput { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Unknown configuration schema{}: {message}", format_context(.context))]
    UnknownSchema { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A referenced actor does not exist.
    #[error("Referential error{}: {message}", format_context(.context))]
    ReferentialError { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Configuration error{}: {source}", format_context(.context))]
    Config { source: ConfigError, context: Option<Cow<'static, str>> },

    #[error("I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Serialization error{}: {source}", format_context(.context))]
    Serialize { source: serde_json::Error, context: Option<Cow<'static, str>> },
}

impl TransferError {
    /// Keeps an unknown schema distinguishable from other model failures.
    pub(crate) fn from_model(error: ConfigError) -> Self {
        match error {
            ConfigError::UnknownSchema { message, context } => {
                Self::UnknownSchema { message, context }
            },
            other => Self::Config { source: other, context: None },
        }
    }
}
