//! Minute-of-day arithmetic.
//!
//! All roster times are minutes from midnight of the roster day. Intervals
//! are half-open: `[start, end)`.

/// Minutes in one hour.
pub const MINUTES_PER_HOUR: u32 = 60;

/// Hours in a roster day.
pub const HOURS_PER_DAY: usize = 24;

/// Minutes in a roster day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// Returns the half-open minute range `[start, end)` of an hour of the day.
///
/// # Example
///
/// ```
/// use rosterforge_core::clock::hour_bounds;
///
/// assert_eq!(hour_bounds(9), (540, 600));
/// ```
#[inline]
pub const fn hour_bounds(hour: u32) -> (u32, u32) {
    let start = hour * MINUTES_PER_HOUR;
    (start, start + MINUTES_PER_HOUR)
}

/// Strict overlap test between two half-open intervals.
///
/// Touching intervals (`a_end == b_start`) do not overlap.
#[inline]
pub const fn overlaps(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> bool {
    a_start < b_end && a_end > b_start
}

/// Formats a minute-of-day on a 12-hour clock.
///
/// # Examples
///
/// ```
/// use rosterforge_core::clock::format_12h;
///
/// assert_eq!(format_12h(480), "8:00 AM");
/// assert_eq!(format_12h(419), "6:59 AM");
/// assert_eq!(format_12h(720), "12:00 PM");
/// assert_eq!(format_12h(0), "12:00 AM");
/// assert_eq!(format_12h(1290), "9:30 PM");
/// ```
pub fn format_12h(minutes: u32) -> String {
    let minutes = minutes % MINUTES_PER_DAY;
    let hour24 = minutes / MINUTES_PER_HOUR;
    let minute = minutes % MINUTES_PER_HOUR;
    let suffix = if hour24 < 12 { "AM" } else { "PM" };
    let hour12 = match hour24 % 12 {
        0 => 12,
        h => h,
    };
    format!("{hour12}:{minute:02} {suffix}")
}

/// Formats a span of minutes as `H:MM`.
///
/// ```
/// use rosterforge_core::clock::format_span;
///
/// assert_eq!(format_span(61), "1:01");
/// assert_eq!(format_span(15), "0:15");
/// ```
pub fn format_span(minutes: u32) -> String {
    format!(
        "{}:{:02}",
        minutes / MINUTES_PER_HOUR,
        minutes % MINUTES_PER_HOUR
    )
}
