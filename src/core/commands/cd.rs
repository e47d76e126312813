use super::{Command, CommandError, Flow};
use std::env;

#[derive(Clone, Default)]
pub struct CdCommand;

impl CdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for CdCommand {
    fn execute(&self, args: &[&str]) -> Result<Flow, CommandError> {
        let path = match args {
            [] => return Err(CommandError::MissingArgument("cd".to_string())),
            [path] => *path,
            _ => {
                return Err(CommandError::InvalidArguments(
                    "cd: too many arguments".to_string(),
                ))
            }
        };

        env::set_current_dir(path).map_err(|source| CommandError::ChangeDirectoryFailed {
            path: path.to_string(),
            source,
        })?;
        Ok(Flow::Continue)
    }
}
