//! # Configuration Transfer
//!
//! Bulk import ([`deserialize_json`]) and export ([`dump`], [`write_dump`]) of configuration
//! rows as JSON [`Document`]s. Exporting then importing the result creates nothing.

mod document;
mod error;
mod export;
mod import;

pub use crate::document::Document;
pub use crate::error::{TransferError, TransferErrorExt};
pub use crate::export::{dump, write_dump};
pub use crate::import::deserialize_json;
