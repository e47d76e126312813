use std::fmt;

pub mod executor;
pub mod reaper;
pub mod registry;
pub mod signal;

pub use executor::ProcessExecutor;
pub use registry::ChildRegistry;

pub type Pid = libc::pid_t;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Foreground,
    Background,
}

/// How a reaped child ended, decoded from the raw `waitpid` status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildStatus {
    Exited(i32),
    Signaled(i32),
}

impl ChildStatus {
    pub fn from_raw(raw: i32) -> Self {
        if libc::WIFSIGNALED(raw) {
            ChildStatus::Signaled(libc::WTERMSIG(raw))
        } else {
            ChildStatus::Exited(libc::WEXITSTATUS(raw))
        }
    }
}

impl fmt::Display for ChildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildStatus::Exited(code) => write!(f, "exit status {}", code),
            ChildStatus::Signaled(sig) => write!(f, "killed by signal {}", sig),
        }
    }
}

#[derive(Debug)]
pub enum ProcessError {
    ForkFailed(std::io::Error),
    InvalidArgument(String),
    Signal(String),
    Io(std::io::Error),
}

impl From<std::io::Error> for ProcessError {
    fn from(e: std::io::Error) -> Self {
        ProcessError::Io(e)
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::ForkFailed(e) => write!(f, "Fork failed: {}", e),
            ProcessError::InvalidArgument(arg) => {
                write!(f, "argument contains a NUL byte: {:?}", arg)
            }
            ProcessError::Signal(msg) => write!(f, "Signal error: {}", msg),
            ProcessError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ProcessError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_decoding() {
        // Linux/BSD layout: exit code in bits 8..16, signal number in the low 7 bits.
        assert_eq!(ChildStatus::from_raw(0), ChildStatus::Exited(0));
        assert_eq!(ChildStatus::from_raw(3 << 8), ChildStatus::Exited(3));
        assert_eq!(ChildStatus::from_raw(libc::SIGKILL), ChildStatus::Signaled(libc::SIGKILL));
    }

    #[test]
    fn test_error_messages_carry_no_shell_prefix() {
        let nul = ProcessError::InvalidArgument("a\0b".to_string()).to_string();
        assert!(nul.starts_with("argument contains a NUL byte"), "{}", nul);

        let signal = ProcessError::Signal("SIGCHLD: busy".to_string()).to_string();
        assert_eq!(signal, "Signal error: SIGCHLD: busy");
    }
}
