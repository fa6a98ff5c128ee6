//! Application-level configuration constants.

// Data
pub const HORSES_CSV: &str = include_str!("horses.csv");

// Wheel drawing, in SVG user units (the wheel sits in a 100x100 view box)
pub const WHEEL_CENTER: f64 = 50.0;
pub const WHEEL_RADIUS: f64 = 50.0;
pub const WHEEL_LABEL_Y: f64 = 15.0;
pub const WHEEL_EASING: &str = "cubic-bezier(0.25, 0.1, 0.25, 1)";

// Celebration
pub const CONFETTI_PIECES: usize = 50;
pub const CONFETTI_MAX_DELAY_S: f64 = 0.5;
pub const CONFETTI_MIN_FALL_S: f64 = 2.0;

// Labels
pub const WELCOME_TITLE: &str = "Welcome to Game Center";
pub const WELCOME_HINT: &str = "Please select a game to begin";
