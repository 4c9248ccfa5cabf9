pub mod config;
pub mod error;
pub mod readiness;
pub mod roster;
pub mod telemetry;
