//! User prompt tool implementation
//!
//! Writes the query as a prompt and blocks until the operator supplies one
//! line of text. There is no timeout; the call holds until input arrives or
//! the stream closes.

use crate::tools::{Tool, ToolDescription, ToolError, ToolOutput};
use async_trait::async_trait;
use std::io::{self, BufRead, BufReader, Write};
use std::sync::Mutex;

const NAME: &str = "user_prompt";

/// Interactive prompt for the human operator.
///
/// Defaults to stdin/stdout; tests inject their own streams.
pub struct UserPromptTool {
    input: Mutex<Box<dyn BufRead + Send>>,
    output: Mutex<Box<dyn Write + Send>>,
}

impl Default for UserPromptTool {
    fn default() -> Self {
        Self::new()
    }
}

impl UserPromptTool {
    pub fn new() -> Self {
        Self::with_streams(BufReader::new(io::stdin()), io::stdout())
    }

    pub fn with_streams(
        input: impl BufRead + Send + 'static,
        output: impl Write + Send + 'static,
    ) -> Self {
        Self {
            input: Mutex::new(Box::new(input)),
            output: Mutex::new(Box::new(output)),
        }
    }
}

fn lock_poisoned(stream: &str) -> ToolError {
    ToolError::Io(io::Error::other(format!("{stream} stream lock poisoned")))
}

#[async_trait]
impl Tool for UserPromptTool {
    fn describe(&self) -> ToolDescription {
        ToolDescription {
            name: NAME.to_string(),
            description: "Ask the human operator for input. Use this tool when more context \
                          or a clarifying answer is needed to finish the task."
                .to_string(),
        }
    }

    fn run(&self, query: &str) -> Result<ToolOutput, ToolError> {
        {
            let mut output = self.output.lock().map_err(|_| lock_poisoned("output"))?;
            write!(output, "{query}")?;
            output.flush()?;
        }

        let mut line = String::new();
        let read = self
            .input
            .lock()
            .map_err(|_| lock_poisoned("input"))?
            .read_line(&mut line)?;
        if read == 0 {
            return Err(ToolError::InputClosed);
        }

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }

        Ok(ToolOutput::Text(line))
    }
}
