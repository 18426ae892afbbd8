//! Route handlers

pub mod logs;
pub mod telemetry;
