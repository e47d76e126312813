use std::io::{self, Write};
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicBool, Ordering};

use signal_hook::consts::signal::SIGCHLD;

use super::{reaper, ChildRegistry, ProcessError};
use crate::error::ShellError;

/// Every child the shell forks is tracked here.
pub static CHILDREN: ChildRegistry = ChildRegistry::new();

static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Installs the Ctrl-C and child-termination handlers for the life of the process.
///
/// Ctrl-C re-prints `prompt` from ctrlc's own thread, and that thread keeps
/// SIGCHLD blocked so the reaper always runs on the main thread.
pub fn install(prompt: &'static str) -> Result<(), ShellError> {
    if INSTALLED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    {
        let _blocked = ChildSignalGuard::block()?;
        ctrlc::set_handler(move || {
            let mut stdout = io::stdout();
            let _ = write!(stdout, "\n{}", prompt);
            let _ = stdout.flush();
        })?;
    }

    let registered = unsafe {
        signal_hook::low_level::register(SIGCHLD, || {
            reaper::reap_all(&CHILDREN);
        })
    };
    registered.map_err(|e| ProcessError::Signal(format!("SIGCHLD: {}", e)))?;

    Ok(())
}

/// Blocks SIGCHLD on the calling thread until dropped.
///
/// Held across fork and registration so the handler cannot reap a child
/// before it is tracked.
pub struct ChildSignalGuard {
    previous: libc::sigset_t,
}

impl ChildSignalGuard {
    pub fn block() -> Result<Self, ProcessError> {
        unsafe {
            let mut set = MaybeUninit::<libc::sigset_t>::uninit();
            libc::sigemptyset(set.as_mut_ptr());
            libc::sigaddset(set.as_mut_ptr(), libc::SIGCHLD);
            let set = set.assume_init();

            let mut previous = MaybeUninit::<libc::sigset_t>::uninit();
            let ret = libc::pthread_sigmask(libc::SIG_BLOCK, &set, previous.as_mut_ptr());
            if ret != 0 {
                return Err(ProcessError::Signal(format!(
                    "pthread_sigmask: {}",
                    io::Error::from_raw_os_error(ret)
                )));
            }
            Ok(Self {
                previous: previous.assume_init(),
            })
        }
    }

    /// Restores the mask that was in place before [`block`](Self::block).
    /// Only async-signal-safe calls, so the child side of a fork may use it.
    pub fn restore(&self) {
        unsafe {
            libc::pthread_sigmask(libc::SIG_SETMASK, &self.previous, std::ptr::null_mut());
        }
    }
}

impl Drop for ChildSignalGuard {
    fn drop(&mut self) {
        self.restore();
    }
}
