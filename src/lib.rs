//! Core simulation logic for the Game Center widgets.
//!
//! Everything in this crate is plain state plus pure transitions, so it can be
//! unit-tested on the host. The Yew binary owns the timers and feeds their
//! callbacks back in as reducer actions.

pub mod countdown;
pub mod race;
pub mod schedule;
pub mod utils;
pub mod wheel;

pub use countdown::{Countdown, CountdownAction, CountdownPhase};
pub use race::{Race, RaceAction, RaceTick, Racer};
pub use schedule::Schedule;
pub use utils::{format_clock, ordinal, parse_minutes, read_racers_from_csv_string};
pub use wheel::{
    slice_angle, winning_index, Candidate, CandidateId, Slice, SpinError, SpinTicket, Wheel,
    WheelAction,
};

/// Timing and simulation parameters shared by the core and the UI.
pub mod defaults {
    /// Period of the race tick.
    pub const RACE_TICK_MS: u32 = 50;
    /// Upper bound (exclusive) of the per-tick progress increment.
    pub const MAX_STEP: f64 = 2.0;
    /// Progress value at which a racer has finished.
    pub const FINISH_LINE: f64 = 100.0;

    /// Period of the countdown tick.
    pub const COUNTDOWN_TICK_MS: u32 = 1000;
    pub const DEFAULT_MINUTES: u32 = 5;

    /// Pause between starting a spin and announcing the winner.
    pub const SETTLE_DELAY_MS: u32 = 5000;
    /// How long the celebration stays on screen after a pick.
    pub const CELEBRATION_MS: u32 = 3000;
    /// Extra rotation per spin, in whole degrees, drawn from `[MIN, MAX)`.
    pub const SPIN_MIN_EXTRA_DEG: u32 = 720;
    pub const SPIN_MAX_EXTRA_DEG: u32 = 1080;

    pub const DEFAULT_CANDIDATES: [&str; 6] = ["Frank", "Ross", "Amy", "Sumit", "Ben", "Vicky"];
}
