//! Who may author configuration changes.

mod actors;

pub use actors::{Actor, ActorDirectory, ActorError, MemoryActors};
