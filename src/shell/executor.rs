use crate::core::commands::{CommandLine, Flow};
use crate::debug;
use crate::input::InputLine;

pub(crate) trait CommandHandler {
    fn execute_command(&mut self, text: String) -> Flow;
}

impl CommandHandler for super::Shell {
    /// Runs one line. Every error ends only the current command.
    fn execute_command(&mut self, text: String) -> Flow {
        let line = match InputLine::new(text) {
            Ok(line) => line,
            Err(e) => {
                eprintln!("myshell: {}", e);
                return Flow::Continue;
            }
        };

        let args = match line.tokenize() {
            Ok(args) => args,
            Err(e) => {
                eprintln!("myshell: {}", e);
                return Flow::Continue;
            }
        };

        let Some(command) = CommandLine::classify(args) else {
            return Flow::Continue;
        };
        debug!(
            "{:?} {:?} (background: {})",
            command.kind,
            command.args.as_slice(),
            command.background
        );
        if command.is_builtin() && command.background {
            debug!("background marker ignored for built-in");
        }

        match self.executor.execute(&command) {
            Ok(flow) => flow,
            Err(e) => {
                eprintln!("{}", e);
                Flow::Continue
            }
        }
    }
}
