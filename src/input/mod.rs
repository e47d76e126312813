use std::fmt;
use std::io::{self, BufRead, IsTerminal, Write};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::error::ShellError;

pub mod tokenizer;

pub use tokenizer::ArgVector;

/// Longest accepted line, in bytes, newline included.
pub const MAX_LINE_LEN: usize = 1024;
/// Argument slots per command, the end-of-arguments sentinel included.
pub const MAX_ARGS: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    TooManyArguments { limit: usize },
    LineTooLong { limit: usize },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::TooManyArguments { limit } => {
                write!(f, "too many arguments (at most {})", limit)
            }
            InputError::LineTooLong { limit } => {
                write!(f, "line too long (at most {} bytes)", limit)
            }
        }
    }
}

impl std::error::Error for InputError {}

/// One line of user text with its trailing newline removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    text: String,
}

impl InputLine {
    pub fn new(mut text: String) -> Result<Self, InputError> {
        if text.ends_with('\n') {
            text.pop();
        }
        if text.len() + 1 > MAX_LINE_LEN {
            return Err(InputError::LineTooLong {
                limit: MAX_LINE_LEN,
            });
        }
        Ok(Self { text })
    }

    #[cfg(test)]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn tokenize(&self) -> Result<ArgVector<'_>, InputError> {
        ArgVector::tokenize(&self.text)
    }
}

/// A source of command lines. `Ok(None)` means end of input.
pub trait LineReader {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError>;
}

/// Interactive reader backed by rustyline, used when stdin is a terminal.
pub struct EditorReader {
    editor: DefaultEditor,
}

impl EditorReader {
    pub fn new() -> Result<Self, ShellError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineReader for EditorReader {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            // Ctrl-C while editing: drop the line and prompt again.
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Plain reader for pipes and files. Writes the prompt itself, since
/// rustyline stays silent when stdin is not a terminal.
pub struct PipeReader<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PipeReader<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> LineReader for PipeReader<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError> {
        self.output.write_all(prompt.as_bytes())?;
        self.output.flush()?;

        let mut line = String::new();
        match self.input.read_line(&mut line)? {
            0 => Ok(None),
            _ => Ok(Some(line)),
        }
    }
}

pub fn stdin_reader() -> Result<Box<dyn LineReader>, ShellError> {
    if io::stdin().is_terminal() {
        Ok(Box::new(EditorReader::new()?))
    } else {
        Ok(Box::new(PipeReader::new(io::stdin().lock(), io::stdout())))
    }
}
