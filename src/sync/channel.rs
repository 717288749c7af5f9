//! Auxiliary payload channel: Sampling Task → Alert Aggregator.
//!
//! Bounded `embassy-sync` MPMC channel used strictly non-blocking on both
//! ends.  A full channel drops the new payload; the counter and the
//! counting event are unaffected.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use crate::config::AUX_CAPACITY;

pub struct AuxChannel {
    inner: Channel<CriticalSectionRawMutex, i32, AUX_CAPACITY>,
}

impl Default for AuxChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl AuxChannel {
    pub const fn new() -> Self {
        Self {
            inner: Channel::new(),
        }
    }

    /// Best-effort push.  `false` means the channel was full and `value`
    /// was dropped.
    pub fn push(&self, value: i32) -> bool {
        self.inner.try_send(value).is_ok()
    }

    pub fn pop(&self) -> Option<i32> {
        self.inner.try_receive().ok()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
