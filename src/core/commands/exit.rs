use super::{Command, CommandError, Flow};

/// Ends the shell with status 0. Arguments are ignored and background
/// children are left running.
#[derive(Clone, Default)]
pub struct ExitCommand;

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ExitCommand {
    fn execute(&self, _args: &[&str]) -> Result<Flow, CommandError> {
        Ok(Flow::Exit(0))
    }
}
