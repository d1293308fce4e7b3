//! Line-oriented terminal prompter.

use std::io::Write;

use adcraft_core::error::InputError;
use adcraft_core::prompt::Prompter;
use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::warn;

/// Reads answers line by line from `R` and writes prompts and messages to `W`.
pub struct TerminalPrompter<R, W> {
    lines: Lines<R>,
    writer: W,
}

impl TerminalPrompter<BufReader<Stdin>, std::io::Stdout> {
    /// A prompter bound to the process's stdin and stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), std::io::stdout())
    }
}

impl<R, W> TerminalPrompter<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    /// Creates a prompter over an arbitrary reader and writer.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            lines: reader.lines(),
            writer,
        }
    }

    /// Consumes the prompter and returns its writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<R, W> Prompter for TerminalPrompter<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    async fn ask(&mut self, label: &str) -> Result<String, InputError> {
        write!(self.writer, "{label}: ")?;
        self.writer.flush()?;
        self.lines.next_line().await?.ok_or(InputError::Closed)
    }

    fn say(&mut self, line: &str) {
        if let Err(err) = writeln!(self.writer, "{line}") {
            warn!(%err, "failed to write to terminal");
        }
    }
}
