//! AdCraft terminal front end.
//!
//! Everything the conversation core deliberately leaves out lives here:
//! environment configuration, logging setup, the stdin/stdout prompter and
//! the wiring that ties them to the orchestrator.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod terminal;
