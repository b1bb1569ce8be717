use super::{RingBuffer, RingError};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use tracing::debug;

struct State {
    /// `None` until the first successful resize installs a buffer.
    slot: Option<RingBuffer>,
    /// Bumped by `interrupt`; a blocked pop compares against the value it
    /// captured on entry.
    interrupts: u64,
}

/// Occupancy snapshot taken under the lock.
#[derive(Debug, Clone, Copy)]
pub struct RingStatus {
    pub capacity: usize,
    pub used: usize,
    pub available: usize,
}

/// Serializes every buffer operation behind one mutex and gives `pop` its
/// blocking semantics: an empty buffer suspends the caller on a condvar
/// until a push signals new data, or [`interrupt`](SharedRing::interrupt)
/// aborts the wait.
pub struct SharedRing {
    state: Mutex<State>,
    data_ready: Condvar,
}

impl Default for SharedRing {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedRing {
    /// Starts without a buffer; push and pop fail with `Uninitialized` until
    /// the first successful [`resize`](SharedRing::resize).
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                slot: None,
                interrupts: 0,
            }),
            data_ready: Condvar::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, RingError> {
        let ring = Self::new();
        ring.resize(capacity)?;
        Ok(ring)
    }

    /// Replaces the buffer with a fresh empty one of `capacity` bytes.
    ///
    /// Destructive on success: the previous contents are dropped. The
    /// replacement is allocated before the old buffer is discarded, so a
    /// failed resize leaves the previous buffer and its contents in place.
    pub fn resize(&self, capacity: usize) -> Result<(), RingError> {
        let fresh = RingBuffer::new(capacity)?;
        let mut state = self.lock();
        state.slot = Some(fresh);
        debug!(capacity, "installed ring buffer");
        Ok(())
    }

    /// Copies `data` in whole, or fails with `OutOfSpace` without writing
    /// anything. Never blocks on a full buffer.
    ///
    /// A successful push wakes every blocked pop before the lock is
    /// released; each one re-checks occupancy, so waking more waiters than
    /// there are bytes is harmless.
    pub fn push(&self, data: &[u8]) -> Result<usize, RingError> {
        let mut state = self.lock();
        let ring = state.slot.as_mut().ok_or(RingError::Uninitialized)?;
        let written = ring.push(data)?;
        self.data_ready.notify_all();
        Ok(written)
    }

    /// Removes up to `max_len` bytes, blocking while the buffer is empty.
    ///
    /// Every wakeup re-checks the occupancy predicate under the lock before
    /// proceeding, so spurious and stale wakeups only cost another wait.
    /// No fairness is guaranteed among concurrent blocked callers: a push
    /// wakes all of them and any subset may consume the new bytes.
    pub fn pop(&self, max_len: usize) -> Result<Vec<u8>, RingError> {
        let mut state = self.lock();
        let entered_at = state.interrupts;
        loop {
            match &mut state.slot {
                None => return Err(RingError::Uninitialized),
                Some(ring) if !ring.is_empty() => return Ok(ring.pop(max_len)),
                Some(_) => {}
            }
            if state.interrupts != entered_at {
                return Err(RingError::Interrupted);
            }
            state = self
                .data_ready
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Aborts every pop currently blocked in [`pop`](SharedRing::pop) with
    /// `Interrupted`. Buffer contents are untouched, and pops issued after
    /// the interrupt block normally.
    pub fn interrupt(&self) {
        let mut state = self.lock();
        state.interrupts += 1;
        debug!("interrupting blocked pop callers");
        self.data_ready.notify_all();
    }

    /// `None` before the first successful resize.
    pub fn status(&self) -> Option<RingStatus> {
        let state = self.lock();
        state.slot.as_ref().map(|ring| RingStatus {
            capacity: ring.capacity(),
            used: ring.used(),
            available: ring.available(),
        })
    }

    // Every mutation is all-or-nothing, so a poisoned lock still guards a
    // consistent ring; recover the guard instead of propagating the panic.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
