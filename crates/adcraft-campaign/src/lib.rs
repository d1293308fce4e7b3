//! AdCraft — campaign conversation bounded context.
//!
//! Responsible for collecting a campaign draft from the user, enforcing the
//! business rules on it, and driving the platform pipeline (authenticate,
//! resolve music, submit) to a final outcome.

pub mod application;
pub mod domain;
