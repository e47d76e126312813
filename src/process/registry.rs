//! Table of outstanding children shared with the child-termination handler.
//!
//! Every slot field is an atomic, and the handler side ([`ChildRegistry::record_exit`])
//! neither allocates nor blocks, so it may run from inside a signal handler
//! that interrupted any main-loop operation on the same table.

use std::sync::atomic::{AtomicI32, AtomicU8, AtomicUsize, Ordering};

use super::{ChildStatus, Pid, RunMode};

pub const REGISTRY_CAPACITY: usize = 128;

const FREE: u8 = 0;
const CLAIMED: u8 = 1;
const RUNNING: u8 = 2;
const EXITED: u8 = 3;

const FOREGROUND: u8 = 0;
const BACKGROUND: u8 = 1;

struct Slot {
    state: AtomicU8,
    mode: AtomicU8,
    pid: AtomicI32,
    status: AtomicI32,
}

impl Slot {
    const fn new() -> Self {
        Self {
            state: AtomicU8::new(FREE),
            mode: AtomicU8::new(FOREGROUND),
            pid: AtomicI32::new(0),
            status: AtomicI32::new(0),
        }
    }

    fn holds(&self, pid: Pid, state: u8) -> bool {
        self.state.load(Ordering::Acquire) == state && self.pid.load(Ordering::Relaxed) == pid
    }

    fn release(&self) {
        self.pid.store(0, Ordering::Relaxed);
        self.state.store(FREE, Ordering::Release);
    }
}

pub struct ChildRegistry {
    slots: [Slot; REGISTRY_CAPACITY],
    untracked: AtomicUsize,
}

impl Default for ChildRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ChildRegistry {
    pub const fn new() -> Self {
        const EMPTY: Slot = Slot::new();
        Self {
            slots: [EMPTY; REGISTRY_CAPACITY],
            untracked: AtomicUsize::new(0),
        }
    }

    /// Starts tracking a freshly forked child. Returns `false` when the table
    /// is full; the child is then still reaped, but its status is dropped.
    pub fn track(&self, pid: Pid, mode: RunMode) -> bool {
        for slot in &self.slots {
            if slot
                .state
                .compare_exchange(FREE, CLAIMED, Ordering::Acquire, Ordering::Relaxed)
                .is_err()
            {
                continue;
            }
            let mode = match mode {
                RunMode::Foreground => FOREGROUND,
                RunMode::Background => BACKGROUND,
            };
            slot.mode.store(mode, Ordering::Relaxed);
            slot.status.store(0, Ordering::Relaxed);
            slot.pid.store(pid, Ordering::Relaxed);
            slot.state.store(RUNNING, Ordering::Release);
            return true;
        }
        false
    }

    /// Stores the raw wait status of a child reaped by the handler.
    /// Safe to call from a signal handler.
    pub fn record_exit(&self, pid: Pid, raw_status: i32) {
        for slot in &self.slots {
            if !slot.holds(pid, RUNNING) {
                continue;
            }
            slot.status.store(raw_status, Ordering::Relaxed);
            if slot
                .state
                .compare_exchange(RUNNING, EXITED, Ordering::AcqRel, Ordering::Relaxed)
                .is_ok()
            {
                return;
            }
        }
        self.untracked.fetch_add(1, Ordering::Relaxed);
    }

    /// Claims the status recorded for `pid`, at most once.
    pub fn take_exit(&self, pid: Pid) -> Option<ChildStatus> {
        let slot = self.slots.iter().find(|slot| slot.holds(pid, EXITED))?;
        let status = ChildStatus::from_raw(slot.status.load(Ordering::Relaxed));
        slot.release();
        Some(status)
    }

    /// Stops tracking `pid` without a status, e.g. after the main loop reaped it itself.
    pub fn forget(&self, pid: Pid) {
        if let Some(slot) = self
            .slots
            .iter()
            .find(|slot| slot.holds(pid, RUNNING) || slot.holds(pid, EXITED))
        {
            slot.release();
        }
    }

    /// Removes and returns every finished background child.
    pub fn drain_background(&self) -> Vec<(Pid, ChildStatus)> {
        let mut finished = Vec::new();
        for slot in &self.slots {
            if slot.state.load(Ordering::Acquire) != EXITED
                || slot.mode.load(Ordering::Relaxed) != BACKGROUND
            {
                continue;
            }
            let pid = slot.pid.load(Ordering::Relaxed);
            let status = ChildStatus::from_raw(slot.status.load(Ordering::Relaxed));
            slot.release();
            finished.push((pid, status));
        }
        finished
    }

    #[cfg(test)]
    pub fn is_tracked(&self, pid: Pid) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.holds(pid, RUNNING) || slot.holds(pid, EXITED))
    }

    #[cfg(test)]
    pub fn outstanding(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.state.load(Ordering::Acquire) != FREE)
            .count()
    }

    /// Children reaped by the handler that were never tracked.
    pub fn untracked_reaps(&self) -> usize {
        self.untracked.load(Ordering::Relaxed)
    }
}
