mod health;
mod router;

pub use health::HealthResponse;
pub use router::system_router;
