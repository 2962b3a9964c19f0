//! Time management for the simulation
//!
//! The simulation operates in discrete one-minute ticks counted from the
//! start of the run. This module provides deterministic time advancement
//! and the wall-clock rendering used by display layers.

use serde::{Deserialize, Serialize};

/// Manages simulation time in discrete minutes
///
/// # Example
/// ```
/// use salon_simulator_core_rs::TimeManager;
///
/// let mut time = TimeManager::new();
/// assert_eq!(time.current_minute(), 0);
///
/// time.advance_minute();
/// assert_eq!(time.current_minute(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeManager {
    /// Minutes elapsed since simulation start
    current_minute: usize,
}

impl TimeManager {
    /// Create a new TimeManager positioned at minute 0
    pub fn new() -> Self {
        Self { current_minute: 0 }
    }

    /// Advance time by one minute
    pub fn advance_minute(&mut self) {
        self.current_minute += 1;
    }

    /// Get the current minute (total minutes since start)
    pub fn current_minute(&self) -> usize {
        self.current_minute
    }

    /// Minutes elapsed in the current hour
    ///
    /// # Example
    /// ```
    /// use salon_simulator_core_rs::TimeManager;
    ///
    /// let mut time = TimeManager::new();
    /// for _ in 0..75 {
    ///     time.advance_minute();
    /// }
    /// assert_eq!(time.minute_within_hour(), 15);
    /// ```
    pub fn minute_within_hour(&self) -> usize {
        self.current_minute % 60
    }
}

/// Renders simulation minutes as `HH:MM` wall-clock strings
///
/// Minute 0 corresponds to `hour_offset:00`. Hours and minutes are zero-padded
/// to two digits. Rendering has no effect on simulation semantics.
///
/// # Example
/// ```
/// use salon_simulator_core_rs::ClockFormat;
///
/// let clock = ClockFormat::default();
/// assert_eq!(clock.format(0), "09:00");
/// assert_eq!(clock.format(480), "17:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockFormat {
    /// Wall-clock hour at simulation minute 0
    pub hour_offset: usize,
}

impl ClockFormat {
    /// Hour at which the simulated day starts unless configured otherwise
    pub const DEFAULT_HOUR_OFFSET: usize = 9;

    pub fn new(hour_offset: usize) -> Self {
        Self { hour_offset }
    }

    /// Render `minute` as `HH:MM`
    pub fn format(&self, minute: usize) -> String {
        let hours = minute / 60 + self.hour_offset;
        format!("{:02}:{:02}", hours, minute % 60)
    }
}

impl Default for ClockFormat {
    fn default() -> Self {
        Self::new(Self::DEFAULT_HOUR_OFFSET)
    }
}
