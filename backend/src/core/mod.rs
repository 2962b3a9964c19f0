//! Simulation clock and wall-clock rendering

pub mod time;

pub use time::{ClockFormat, TimeManager};
