//! Application layer for the campaign context.

pub mod collector;
pub mod interpreter;
pub mod orchestrator;
pub mod query;
