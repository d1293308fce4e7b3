//! AdCraft Core — shared domain abstractions.
//!
//! This crate defines the traits and types every other AdCraft crate depends
//! on: the error taxonomy, the ad payload, and the capability interfaces the
//! conversation calls through (gateway, prompter, clock, RNG). It contains no
//! infrastructure code.

pub mod ad;
pub mod aggregate;
pub mod clock;
pub mod error;
pub mod event;
pub mod gateway;
pub mod prompt;
pub mod rng;
