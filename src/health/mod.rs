pub mod exercise;
pub mod goals;
pub mod metrics;
