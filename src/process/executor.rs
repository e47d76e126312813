use std::ffi::CString;
use std::io;

use super::signal::ChildSignalGuard;
use super::{ChildRegistry, Pid, ProcessError, RunMode};
use crate::debug;

/// NULL-terminated `argv` built before forking, so the child never allocates.
struct CStringVec {
    _strings: Vec<CString>,
    ptrs: Vec<*const libc::c_char>,
}

impl CStringVec {
    fn from_args(args: &[&str]) -> Result<Self, ProcessError> {
        let strings = args
            .iter()
            .map(|arg| CString::new(*arg).map_err(|_| ProcessError::InvalidArgument(arg.to_string())))
            .collect::<Result<Vec<_>, _>>()?;
        let mut ptrs: Vec<*const libc::c_char> = strings.iter().map(|s| s.as_ptr()).collect();
        ptrs.push(std::ptr::null());
        Ok(Self {
            _strings: strings,
            ptrs,
        })
    }

    fn program(&self) -> *const libc::c_char {
        self.ptrs[0]
    }

    fn as_ptr(&self) -> *const *const libc::c_char {
        self.ptrs.as_ptr()
    }
}

/// Forks and execs external commands, registering each child before the
/// parent returns.
#[derive(Clone, Copy)]
pub struct ProcessExecutor {
    registry: &'static ChildRegistry,
}

impl ProcessExecutor {
    pub fn new(registry: &'static ChildRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'static ChildRegistry {
        self.registry
    }

    /// Starts `args[0]` with `args` as its argument vector, searching `PATH`
    /// when the name has no slash. Returns the child's pid in the parent.
    pub fn spawn_process(&self, args: &[&str], mode: RunMode) -> Result<Pid, ProcessError> {
        let Some(&program) = args.first() else {
            return Err(ProcessError::InvalidArgument(String::new()));
        };
        let argv = CStringVec::from_args(args)?;
        let not_found = format!("Command not found: {}: ", program);
        let exec_failed = format!("Exec failed: {}: ", program);

        let blocked = ChildSignalGuard::block()?;
        let pid = unsafe { libc::fork() };
        match pid {
            -1 => Err(ProcessError::ForkFailed(io::Error::last_os_error())),
            0 => {
                blocked.restore();
                exec_child(&argv, not_found.as_bytes(), exec_failed.as_bytes())
            }
            pid => {
                if !self.registry.track(pid, mode) {
                    debug!("child registry full, status of pid {} will be dropped", pid);
                }
                drop(blocked);
                debug!("forked pid {} for {:?} ({:?})", pid, program, mode);
                Ok(pid)
            }
        }
    }
}

/// Child side of the fork. Only async-signal-safe calls from here on.
fn exec_child(argv: &CStringVec, not_found: &[u8], exec_failed: &[u8]) -> ! {
    unsafe {
        libc::execvp(argv.program(), argv.as_ptr());
    }

    let errno = io::Error::last_os_error().raw_os_error().unwrap_or(0);
    let prefix = if errno == libc::ENOENT { not_found } else { exec_failed };
    write_stderr(prefix);
    write_stderr(errno_text(errno).as_bytes());
    write_stderr(b"\n");
    unsafe { libc::_exit(1) }
}

fn write_stderr(mut bytes: &[u8]) {
    while !bytes.is_empty() {
        let n = unsafe { libc::write(libc::STDERR_FILENO, bytes.as_ptr().cast(), bytes.len()) };
        if n < 0 {
            if io::Error::last_os_error().raw_os_error() == Some(libc::EINTR) {
                continue;
            }
            return;
        }
        bytes = &bytes[n as usize..];
    }
}

/// `strerror` is not async-signal-safe, so the exec errors get fixed text.
fn errno_text(errno: i32) -> &'static str {
    match errno {
        libc::ENOENT => "No such file or directory",
        libc::EACCES => "Permission denied",
        libc::ENOEXEC => "Exec format error",
        libc::ENOTDIR => "Not a directory",
        libc::E2BIG => "Argument list too long",
        libc::ENOMEM => "Cannot allocate memory",
        libc::ELOOP => "Too many levels of symbolic links",
        libc::ENAMETOOLONG => "File name too long",
        libc::ETXTBSY => "Text file busy",
        _ => "Unknown error",
    }
}
