//! AdCraft — simulated advertising platform.
//!
//! Implements [`adcraft_core::gateway::AdsGateway`] without a network. Token
//! retrieval and submission fail at random, as a real platform occasionally
//! does; the randomness comes from an injected
//! [`adcraft_core::rng::DeterministicRng`] so every failure class can be
//! reproduced.

pub mod simulated;
