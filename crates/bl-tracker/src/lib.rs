pub mod config;
pub mod error;
pub mod labels;
pub mod telemetry;
