use std::borrow::Cow;

/// A specialized [`DomainError`] enum of this crate.
#[vconf_derive::config_error]
pub enum DomainError {
    /// The schema definition breaks one of its construction rules.
    #[error("Invalid schema{}: {message}", format_context(.context))]
    InvalidSchema { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A value does not fit the kind of the field it is assigned to.
    #[error("Invalid field value{}: {message}", format_context(.context))]
    InvalidValue { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
