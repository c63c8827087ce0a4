#![allow(unreachable_pub)]

//! # Macros
//!
//! Procedural macros shared by every crate of the workspace.
//!
//! Only one macro lives here today: [`macro@config_error`], which turns a plain enum into the
//! error type used at each crate boundary (`thiserror` derive, `.context(...)` extension trait,
//! `From` conversions for wrapped sources).

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for crate-level error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: Generates a companion `<Name>Ext` trait adding `.context(...)` to
///   `Result<T, Name>` and to `Result<T, Source>` for every wrapped source type.
/// * **Standard Conversions**: Implements `From<Source>` for variants with a `source` field
///   (or a field marked `#[source]`/`#[from]`), so `?` works on upstream errors.
/// * **Internal Fallback**: Implements `From<&'static str>` and `From<String>` when an
///   `Internal { message, context }` variant exists.
/// * **`format_context`**: A private helper rendering `" (context)"` for use in `#[error]`.
///
/// # Requirements
///
/// 1. Applies to enums only.
/// 2. Every variant uses named fields.
/// 3. A variant wrapping a source must also carry `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[vconf_derive::config_error]
/// pub enum StoreError {
///     #[error("Journal I/O failure{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal store error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn open(path: &std::path::Path) -> Result<std::fs::File, StoreError> {
///     std::fs::File::open(path).context("Opening journal")
/// }
/// ```
#[proc_macro_attribute]
pub fn config_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}
