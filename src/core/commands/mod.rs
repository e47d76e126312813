use std::fmt;
use std::io::{self, Write};

mod cd;
mod exit;

pub use cd::CdCommand;
pub use exit::ExitCommand;

use crate::debug;
use crate::input::ArgVector;
use crate::process::{reaper, ProcessError, ProcessExecutor, RunMode};

/// A trailing word equal to this runs the command in the background.
pub const BACKGROUND_MARKER: &str = "&";

#[derive(Debug)]
pub enum CommandError {
    MissingArgument(String),
    InvalidArguments(String),
    ChangeDirectoryFailed { path: String, source: io::Error },
    Process(ProcessError),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::MissingArgument(cmd) => write!(f, "{}: missing argument", cmd),
            CommandError::InvalidArguments(msg) => write!(f, "{}", msg),
            CommandError::ChangeDirectoryFailed { path, source } => {
                write!(f, "cd failed: {}: {}", path, source)
            }
            CommandError::Process(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::ChangeDirectoryFailed { source, .. } => Some(source),
            CommandError::Process(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ProcessError> for CommandError {
    fn from(err: ProcessError) -> Self {
        CommandError::Process(err)
    }
}

/// What the loop does after a command finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit(i32),
}

/// A command implemented inside the shell process. `args` excludes the command name.
pub trait Command {
    fn execute(&self, args: &[&str]) -> Result<Flow, CommandError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Exit,
    ChangeDirectory,
    External,
}

/// A classified, non-empty command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine<'a> {
    pub kind: CommandKind,
    pub args: ArgVector<'a>,
    pub background: bool,
}

impl<'a> CommandLine<'a> {
    /// Returns `None` for an empty line. A trailing `&` is stripped before
    /// built-ins are recognized, so `cd dir &` is still the `cd` built-in.
    pub fn classify(mut args: ArgVector<'a>) -> Option<Self> {
        if args.is_empty() {
            return None;
        }

        let background = args.last() == Some(BACKGROUND_MARKER);
        if background {
            args.pop();
        }

        let kind = match args.command() {
            Some("exit") => CommandKind::Exit,
            Some("cd") => CommandKind::ChangeDirectory,
            _ => CommandKind::External,
        };

        Some(Self {
            kind,
            args,
            background,
        })
    }

    pub fn is_builtin(&self) -> bool {
        self.kind != CommandKind::External
    }

    fn operands(&self) -> &[&'a str] {
        self.args.as_slice().get(1..).unwrap_or(&[])
    }
}

#[derive(Clone)]
pub struct CommandExecutor {
    cd: CdCommand,
    exit: ExitCommand,
    process_executor: ProcessExecutor,
}

impl CommandExecutor {
    pub fn new(process_executor: ProcessExecutor) -> Self {
        Self {
            cd: CdCommand::new(),
            exit: ExitCommand::new(),
            process_executor,
        }
    }

    pub fn execute(&self, command: &CommandLine<'_>) -> Result<Flow, CommandError> {
        match command.kind {
            CommandKind::Exit => self.exit.execute(command.operands()),
            CommandKind::ChangeDirectory => self.cd.execute(command.operands()),
            // A lone `&` strips down to nothing; there is no program to run.
            CommandKind::External if command.args.is_empty() => Ok(Flow::Continue),
            CommandKind::External => self.launch(command),
        }
    }

    fn launch(&self, command: &CommandLine<'_>) -> Result<Flow, CommandError> {
        let mode = if command.background {
            RunMode::Background
        } else {
            RunMode::Foreground
        };
        let pid = self
            .process_executor
            .spawn_process(command.args.as_slice(), mode)?;

        match mode {
            RunMode::Foreground => {
                let registry = self.process_executor.registry();
                match reaper::wait_foreground(registry, pid)? {
                    Some(status) => debug!("pid {} finished with {}", pid, status),
                    None => debug!("pid {} finished, status unknown", pid),
                }
            }
            RunMode::Background => {
                let mut stdout = io::stdout();
                writeln!(stdout, "[Background process started: {}]", pid)
                    .and_then(|_| stdout.flush())
                    .map_err(ProcessError::from)?;
            }
        }
        Ok(Flow::Continue)
    }
}
