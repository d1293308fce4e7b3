//! Scripted prompter — canned input lines for headless conversations.

use std::collections::VecDeque;

use adcraft_core::error::InputError;
use adcraft_core::prompt::Prompter;
use async_trait::async_trait;

/// A prompter that answers each `ask` with the next scripted line and records
/// every prompt label and output line. Once the script runs out, `ask`
/// returns `InputError::Closed`, like a terminal at end-of-file.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    inputs: VecDeque<String>,
    prompts: Vec<String>,
    output: Vec<String>,
}

impl ScriptedPrompter {
    /// Create a prompter that will answer with `inputs`, in order.
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            output: Vec::new(),
        }
    }

    /// Create a prompter with no input at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Labels of every `ask` call, in order.
    #[must_use]
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Every line written with `say`, in order.
    #[must_use]
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Number of scripted lines not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn ask(&mut self, label: &str) -> Result<String, InputError> {
        self.prompts.push(label.to_owned());
        self.inputs.pop_front().ok_or(InputError::Closed)
    }

    fn say(&mut self, line: &str) {
        self.output.push(line.to_owned());
    }
}
