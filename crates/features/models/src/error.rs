use std::borrow::Cow;
use vconf_domain::DomainError;
use vconf_store::StoreError;

/// Error types of the configuration models.
#[vconf_derive::config_error]
pub enum ConfigError {
    /// Wrong identity arity or an unsupported argument combination.
    #[error("Invalid argument{}: {message}", format_context(.context))]
    InvalidArgument { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Unknown configuration schema{}: {message}", format_context(.context))]
    UnknownSchema { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Unknown field{}: {message}", format_context(.context))]
    UnknownField { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid field value{}: {message}", format_context(.context))]
    InvalidValue { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The gated configuration is not enabled.
    #[error("Feature disabled{}: {message}", format_context(.context))]
    FeatureDisabled { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Record store error{}: {source}", format_context(.context))]
    Store { source: StoreError, context: Option<Cow<'static, str>> },

    #[error("Schema error{}: {source}", format_context(.context))]
    Domain { source: DomainError, context: Option<Cow<'static, str>> },

    #[error("Internal configuration error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ConfigError {
    /// Errors that surface as "not found" to outer layers.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::UnknownSchema { .. } | Self::FeatureDisabled { .. })
    }

    /// Errors caused by the caller's input rather than the system.
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument { .. } | Self::UnknownField { .. } | Self::InvalidValue { .. }
        )
    }
}
