//! Process-wide diagnostic switches, set once from the command-line flags.
//!
//! Diagnostics go to stderr through [`debug!`](crate::debug) and
//! [`warn!`](crate::warn). Neither macro may be used from a signal handler.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::flags::Flags;

static DEBUG: AtomicBool = AtomicBool::new(false);
static QUIET: AtomicBool = AtomicBool::new(false);

pub fn init(flags: &Flags) {
    DEBUG.store(flags.is_set("debug"), Ordering::Relaxed);
    QUIET.store(flags.is_set("quiet"), Ordering::Relaxed);
}

pub fn debug_enabled() -> bool {
    DEBUG.load(Ordering::Relaxed)
}

pub fn warnings_enabled() -> bool {
    !QUIET.load(Ordering::Relaxed)
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        if $crate::diag::debug_enabled() {
            eprintln!("myshell[debug]: {}", format_args!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        if $crate::diag::warnings_enabled() {
            eprintln!("myshell: warning: {}", format_args!($($arg)*));
        }
    };
}
