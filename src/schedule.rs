//! Owned slot for a cancellable timer.
//!
//! Timer handles such as `gloo_timers::callback::Interval` cancel themselves
//! when dropped. Keeping the handle in a `Schedule` ties the timer's lifetime
//! to a condition: it is armed while the condition holds and dropped as soon
//! as the condition turns false or the owner goes away.

use log::debug;

pub struct Schedule<H> {
    label: &'static str,
    handle: Option<H>,
}

impl<H> Schedule<H> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            handle: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }

    /// Install `handle`, cancelling whatever was armed before.
    pub fn arm(&mut self, handle: H) {
        if self.handle.replace(handle).is_some() {
            debug!("{}: replaced armed timer", self.label);
        } else {
            debug!("{}: armed", self.label);
        }
    }

    /// Cancel the armed timer. Returns whether one was armed.
    pub fn disarm(&mut self) -> bool {
        let was_armed = self.handle.take().is_some();
        if was_armed {
            debug!("{}: cancelled", self.label);
        }
        was_armed
    }

    /// Arm with `make` if `wanted` and nothing is armed yet; cancel if not `wanted`.
    pub fn sync(&mut self, wanted: bool, make: impl FnOnce() -> H) {
        match (wanted, self.is_armed()) {
            (true, false) => self.arm(make()),
            (false, true) => {
                self.disarm();
            }
            _ => {}
        }
    }
}
