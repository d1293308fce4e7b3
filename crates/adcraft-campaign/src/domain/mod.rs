//! Domain layer for the campaign context.

pub mod aggregates;
pub mod draft;
pub mod events;
pub mod music;
pub mod prompt_builder;
pub mod validation;
