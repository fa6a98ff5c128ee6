//! Minute/second countdown shown next to the wheel.

use crate::defaults::DEFAULT_MINUTES;
use crate::utils::{format_clock, parse_minutes};
use log::{debug, info};
use std::rc::Rc;
use yew::Reducible;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownPhase {
    Idle,
    Running,
    /// Reached 0:00 while running.
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    minutes: u32,
    seconds: u32,
    configured_minutes: u32,
    phase: CountdownPhase,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(DEFAULT_MINUTES)
    }
}

impl Countdown {
    pub fn new(minutes: u32) -> Self {
        Self {
            minutes,
            seconds: 0,
            configured_minutes: minutes,
            phase: CountdownPhase::Idle,
        }
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn configured_minutes(&self) -> u32 {
        self.configured_minutes
    }

    pub fn phase(&self) -> CountdownPhase {
        self.phase
    }

    /// Whether the one-second tick schedule should be running.
    pub fn is_running(&self) -> bool {
        self.phase == CountdownPhase::Running
    }

    pub fn remaining_secs(&self) -> u64 {
        u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }

    /// Remaining time as `MM:SS`.
    pub fn display(&self) -> String {
        format_clock(self.minutes, self.seconds)
    }

    /// Enter `Running` from any state. With no time left the next tick expires.
    pub fn start(&mut self) {
        if !self.is_running() {
            info!("Countdown started at {}", self.display());
        }
        self.phase = CountdownPhase::Running;
    }

    /// Pause, keeping the remaining time.
    pub fn stop(&mut self) {
        if self.is_running() {
            self.phase = CountdownPhase::Idle;
        }
    }

    pub fn reset(&mut self) {
        self.phase = CountdownPhase::Idle;
        self.minutes = self.configured_minutes;
        self.seconds = 0;
    }

    /// Advance one second. Ticks outside `Running` are ignored.
    pub fn tick(&mut self) -> CountdownPhase {
        if !self.is_running() {
            return self.phase;
        }
        if self.seconds > 0 {
            self.seconds -= 1;
        } else if self.minutes > 0 {
            self.minutes -= 1;
            self.seconds = 59;
        } else {
            info!("Countdown expired");
            self.phase = CountdownPhase::Expired;
        }
        self.phase
    }

    /// Set the configured minutes. A stopped timer shows the new value at once;
    /// a running one keeps counting and picks it up on the next reset.
    pub fn configure(&mut self, minutes: u32) {
        self.configured_minutes = minutes;
        if !self.is_running() {
            self.minutes = minutes;
            self.seconds = 0;
            self.phase = CountdownPhase::Idle;
        }
        debug!("Countdown configured to {} minutes", minutes);
    }

    /// Same as [`Countdown::configure`] for raw text input; junk counts as zero.
    pub fn configure_from_input(&mut self, input: &str) {
        self.configure(parse_minutes(input));
    }
}

pub enum CountdownAction {
    Start,
    Stop,
    /// Play/pause button.
    Toggle,
    Reset,
    Tick,
    Configure(String),
}

impl Reducible for Countdown {
    type Action = CountdownAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        if matches!(action, CountdownAction::Tick) && !self.is_running() {
            return self;
        }
        let mut next = (*self).clone();
        match action {
            CountdownAction::Start => next.start(),
            CountdownAction::Stop => next.stop(),
            CountdownAction::Toggle => {
                if next.is_running() {
                    next.stop()
                } else {
                    next.start()
                }
            }
            CountdownAction::Reset => next.reset(),
            CountdownAction::Tick => {
                next.tick();
            }
            CountdownAction::Configure(input) => next.configure_from_input(&input),
        }
        next.into()
    }
}
