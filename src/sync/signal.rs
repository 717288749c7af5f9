//! Single-permit event for the asynchronous button press.
//!
//! Wraps an `embassy-sync` [`Signal`]: raising while a permit is already
//! pending coalesces into that one permit, so presses never queue up.
//! The dedicated handler parks its thread on [`BinaryEvent::wait`] via
//! `futures_lite::future::block_on`; the inline variant polls
//! [`BinaryEvent::try_take`].

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use futures_lite::future::block_on;

pub struct BinaryEvent {
    signal: Signal<CriticalSectionRawMutex, ()>,
}

impl Default for BinaryEvent {
    fn default() -> Self {
        Self::new()
    }
}

impl BinaryEvent {
    pub const fn new() -> Self {
        Self {
            signal: Signal::new(),
        }
    }

    /// Post the permit.  Returns `false` when one was already pending and
    /// this raise was coalesced into it.
    pub fn raise(&self) -> bool {
        let fresh = !self.signal.signaled();
        self.signal.signal(());
        fresh
    }

    /// Consume the pending permit without blocking.
    pub fn try_take(&self) -> bool {
        self.signal.try_take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.signal.signaled()
    }

    /// Park the calling thread until a permit is available, then consume it.
    pub fn wait(&self) {
        block_on(self.signal.wait());
    }
}
