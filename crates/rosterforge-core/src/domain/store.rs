//! Store-level configuration.

use crate::clock::{format_12h, MINUTES_PER_DAY};
use crate::error::{Result, RosterError};

/// Store hours, scheduling granularity, and the break rule.
///
/// # Example
///
/// ```
/// use rosterforge_core::StoreConfig;
///
/// let store = StoreConfig::new(480, 1320)
///     .with_base_slot_minutes(15)
///     .with_break_rule(360, 120, 240);
///
/// assert!(store.validate().is_ok());
/// assert_eq!(store.break_window_size(), 120);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoreConfig {
    /// Base scheduling granularity in minutes.
    pub base_slot_minutes: u32,
    pub open_minutes_from_midnight: u32,
    pub close_minutes_from_midnight: u32,
    /// Shifts at least this long (minutes) are entitled to a break.
    pub req_shift_length_for_break: u32,
    /// Earliest break start, in minutes after shift start.
    pub break_window_start: u32,
    /// Latest break start, in minutes after shift start.
    pub break_window_end: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(480, 1320)
    }
}

impl StoreConfig {
    /// Creates a store open over `[open, close)` with hourly slots and a
    /// break between the 2nd and 4th hour of any shift of 6 hours or more.
    pub fn new(open_minutes_from_midnight: u32, close_minutes_from_midnight: u32) -> Self {
        Self {
            base_slot_minutes: 60,
            open_minutes_from_midnight,
            close_minutes_from_midnight,
            req_shift_length_for_break: 360,
            break_window_start: 120,
            break_window_end: 240,
        }
    }

    pub fn with_base_slot_minutes(mut self, minutes: u32) -> Self {
        self.base_slot_minutes = minutes;
        self
    }

    pub fn with_break_rule(mut self, req_shift_length: u32, window_start: u32, window_end: u32) -> Self {
        self.req_shift_length_for_break = req_shift_length;
        self.break_window_start = window_start;
        self.break_window_end = window_end;
        self
    }

    /// Width of the break window in minutes.
    #[inline]
    pub fn break_window_size(&self) -> u32 {
        self.break_window_end.saturating_sub(self.break_window_start)
    }

    /// Converts a duration in minutes to slot units, rounding partial slots up.
    #[inline]
    pub fn slots_for(&self, minutes: u32) -> u32 {
        minutes.div_ceil(self.base_slot_minutes.max(1))
    }

    /// Checks the configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Config`] naming the first broken invariant.
    pub fn validate(&self) -> Result<()> {
        if self.base_slot_minutes == 0 {
            return Err(RosterError::Config(
                "base_slot_minutes must be positive".to_string(),
            ));
        }
        if self.open_minutes_from_midnight >= self.close_minutes_from_midnight {
            return Err(RosterError::Config(format!(
                "store opens at {} but closes at {}",
                format_12h(self.open_minutes_from_midnight),
                format_12h(self.close_minutes_from_midnight)
            )));
        }
        if self.close_minutes_from_midnight > MINUTES_PER_DAY {
            return Err(RosterError::Config(format!(
                "close_minutes_from_midnight {} is past the end of the day",
                self.close_minutes_from_midnight
            )));
        }
        if self.break_window_start >= self.break_window_end {
            return Err(RosterError::Config(format!(
                "break window [{}, {}] is empty or inverted",
                self.break_window_start, self.break_window_end
            )));
        }
        Ok(())
    }
}
