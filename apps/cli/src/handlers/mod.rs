pub mod dump;
pub mod history;
pub mod populate;
pub mod serve;
pub mod show;
