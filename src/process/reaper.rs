use std::io;

use super::{ChildRegistry, ChildStatus, Pid, ProcessError};

/// Reaps every terminated child without blocking and records each status.
/// Returns how many children were collected.
///
/// Runs inside the SIGCHLD handler: only `waitpid` and atomics here.
pub fn reap_all(registry: &ChildRegistry) -> usize {
    let mut reaped = 0;
    loop {
        let mut status: libc::c_int = 0;
        let pid = unsafe { libc::waitpid(-1, &mut status, libc::WNOHANG) };
        if pid <= 0 {
            return reaped;
        }
        registry.record_exit(pid, status);
        reaped += 1;
    }
}

/// Blocks until `pid` has terminated and been reaped, by this call or by
/// [`reap_all`] running from the handler in the meantime.
///
/// Returns `None` when the child was reaped but its status was not kept.
pub fn wait_foreground(registry: &ChildRegistry, pid: Pid) -> Result<Option<ChildStatus>, ProcessError> {
    loop {
        if let Some(status) = registry.take_exit(pid) {
            return Ok(Some(status));
        }

        let mut status: libc::c_int = 0;
        let ret = unsafe { libc::waitpid(pid, &mut status, 0) };
        if ret == pid {
            registry.forget(pid);
            return Ok(Some(ChildStatus::from_raw(status)));
        }

        let err = io::Error::last_os_error();
        match err.raw_os_error() {
            Some(libc::EINTR) => continue,
            // Someone else reaped it first. The handler runs to completion on
            // this thread, so any status it recorded is visible by now.
            Some(libc::ECHILD) => {
                let status = registry.take_exit(pid);
                if status.is_none() {
                    registry.forget(pid);
                }
                return Ok(status);
            }
            _ => return Err(err.into()),
        }
    }
}
