use std::io;

mod executor;

use crate::{
    core::{
        commands::{CommandExecutor, Flow},
        config::Config,
    },
    debug,
    error::ShellError,
    flags::Flags,
    input::{self, LineReader},
    process::{signal, ChildRegistry, ProcessExecutor},
    warn,
};

use executor::CommandHandler;

pub const PROMPT: &str = "myshell> ";

pub struct Shell {
    pub(crate) reader: Box<dyn LineReader>,
    pub(crate) config: Config,
    pub(crate) executor: CommandExecutor,
    pub(crate) registry: &'static ChildRegistry,
    untracked_seen: usize,
}

impl Shell {
    /// Interactive shell on the process's stdin, with signal handlers installed.
    pub fn new(flags: &Flags) -> Result<Self, ShellError> {
        signal::install(PROMPT)?;
        let reader = input::stdin_reader()?;
        Ok(Self::with_reader(flags, reader))
    }

    pub fn with_reader(flags: &Flags, reader: Box<dyn LineReader>) -> Self {
        let registry = &signal::CHILDREN;
        Shell {
            reader,
            config: Config::new(flags),
            executor: CommandExecutor::new(ProcessExecutor::new(registry)),
            registry,
            untracked_seen: 0,
        }
    }

    /// Runs the startup file, then the read-execute loop until `exit` or
    /// end of input. Returns the shell's exit status.
    pub fn run(&mut self) -> Result<i32, ShellError> {
        if let Flow::Exit(code) = self.run_startup() {
            return Ok(code);
        }

        loop {
            self.report_finished_background();

            let text = match self.reader.read_line(PROMPT) {
                Ok(Some(text)) => text,
                Ok(None) => break,
                Err(ShellError::Io(e)) if e.kind() == io::ErrorKind::InvalidData => {
                    eprintln!("myshell: {}", e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            if let Flow::Exit(code) = self.execute_command(text) {
                return Ok(code);
            }
        }
        Ok(0)
    }

    fn run_startup(&mut self) -> Flow {
        let lines = match self.config.startup_lines() {
            Ok(lines) => lines,
            Err(e) => {
                warn!("{}", e);
                return Flow::Continue;
            }
        };

        for line in lines {
            debug!("startup: {}", line);
            if let Flow::Exit(code) = self.execute_command(line) {
                return Flow::Exit(code);
            }
        }
        Flow::Continue
    }

    fn report_finished_background(&mut self) {
        for (pid, status) in self.registry.drain_background() {
            debug!("background pid {} finished with {}", pid, status);
        }

        let untracked = self.registry.untracked_reaps();
        if untracked > self.untracked_seen {
            debug!(
                "{} child(ren) reaped without a registry entry",
                untracked - self.untracked_seen
            );
            self.untracked_seen = untracked;
        }
    }
}
