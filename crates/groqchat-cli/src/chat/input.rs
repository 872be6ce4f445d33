//! Async readline input for the chat loop.
//!
//! Wraps `rustyline_async::Readline` behind a small event vocabulary.
//! Blank submissions are swallowed here, so the loop only ever sees a
//! non-empty message, EOF (Ctrl+D), or an interrupt (Ctrl+C). The
//! readline keeps the prompt intact while streamed output prints.

use console::style;
use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};

/// Events produced by the input handler.
#[derive(Debug)]
pub enum InputEvent {
    /// Non-empty message, trimmed.
    Message(String),
    /// End of file (Ctrl+D).
    Eof,
    /// Interrupt signal (Ctrl+C).
    Interrupted,
}

/// Async input handler for the chat prompt.
pub struct ChatInput {
    rl: Readline,
}

impl ChatInput {
    /// Set up the readline with a styled `label >` prompt.
    ///
    /// Also returns a `SharedWriter` for printing without clobbering
    /// the prompt.
    pub fn with_prompt(label: &str) -> Result<(Self, SharedWriter), ReadlineError> {
        let prompt = format!("  {} ", style(label).green().bold());
        let (rl, writer) = Readline::new(prompt)?;
        Ok((Self { rl }, writer))
    }

    /// Wait for the next input event, skipping blank submissions.
    pub async fn next_event(&mut self) -> InputEvent {
        loop {
            let event = match self.rl.readline().await {
                Ok(event) => event,
                Err(_) => return InputEvent::Eof,
            };

            match event {
                ReadlineEvent::Line(line) => {
                    let text = line.trim();
                    if !text.is_empty() {
                        return InputEvent::Message(text.to_string());
                    }
                }
                ReadlineEvent::Eof => return InputEvent::Eof,
                ReadlineEvent::Interrupted => return InputEvent::Interrupted,
            }
        }
    }

    /// Clear the terminal screen.
    pub fn clear_screen(&mut self) {
        let _ = self.rl.clear();
    }
}
