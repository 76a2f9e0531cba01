//! CLI library components for the retail cleaning pipeline.

pub mod commands;
pub mod logging;
