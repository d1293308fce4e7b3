//! Shared test doubles for the AdCraft campaign agent.

mod clock;
mod gateway;
mod prompter;
mod rng;

pub use clock::FixedClock;
pub use gateway::{GatewayCall, RecordingGateway};
pub use prompter::ScriptedPrompter;
pub use rng::{MockRng, SequenceRng};
