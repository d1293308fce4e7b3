//! Interactive session abstraction.
//!
//! Prompts are the only points where a conversation waits on a human. Putting
//! them behind [`Prompter`] lets tests drive a whole conversation from canned
//! input lines.

use async_trait::async_trait;

use crate::error::InputError;

/// Line-oriented interactive input/output.
#[async_trait]
pub trait Prompter: Send {
    /// Shows `label` and waits for one line of input (without the newline).
    ///
    /// # Errors
    ///
    /// Returns `InputError::Closed` once the input source is exhausted.
    async fn ask(&mut self, label: &str) -> Result<String, InputError>;

    /// Writes one line of output to the user.
    fn say(&mut self, line: &str);
}
