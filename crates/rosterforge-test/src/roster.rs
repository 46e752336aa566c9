//! Assignment builders.

use rosterforge_core::clock::hour_bounds;
use rosterforge_core::{Assignment, CrewShift};

/// Assignment on whole hours, `[start_hour:00, end_hour:00)`.
pub fn at(crew: &str, role: &str, start_hour: u32, end_hour: u32) -> Assignment {
    Assignment::new(crew, role, hour_bounds(start_hour).0, hour_bounds(end_hour).0)
}

/// Back-to-back one-hour assignments starting at `start_hour`.
pub fn hourly_run(crew: &str, start_hour: u32, roles: &[&str]) -> Vec<Assignment> {
    roles
        .iter()
        .enumerate()
        .map(|(i, role)| {
            let hour = start_hour + i as u32;
            at(crew, role, hour, hour + 1)
        })
        .collect()
}

/// Whole-hour shifts from `(crew, start_hour, end_hour)` triples.
pub fn shifts(rows: &[(&str, u32, u32)]) -> Vec<CrewShift> {
    rows.iter()
        .map(|&(crew, start, end)| CrewShift::from_hours(crew, start, end))
        .collect()
}
