//! # vconf CLI
//!
//! Command handlers behind the `vconf` binary: bulk import (`populate`), export (`dump`),
//! inspection (`show`, `history`) and the HTTP server (`serve`).

pub mod handlers;
pub mod models;
