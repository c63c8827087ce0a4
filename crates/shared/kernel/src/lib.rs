//! Kernel utilities shared across slices.
//! Keep this crate lightweight: settings loading, the actor directory and (behind the `server`
//! feature) the system routes every HTTP surface mounts.
//!
//! ## Settings loading
//! ```rust,no_run
//! use vconf_kernel::config::load_config;
//! use vconf_kernel::domain::config::AppConfig;
//!
//! let cfg: AppConfig = load_config(Some("vconf.toml")).unwrap();
//! ```
pub mod config;
pub mod security;
#[cfg(feature = "server")]
pub mod server;

pub use vconf_domain as domain;
