//! Block analysis.
//!
//! A block is a maximal run of temporally adjacent, same-role assignments of
//! one crew member. Blocks feed the slot-size and fragmentation rules, and
//! the same adjacency walk counts role switches for the CONSECUTIVE
//! preference and its optimizer penalty.

use rosterforge_core::{Assignment, RoleId};

/// A maximal same-role run of back-to-back assignments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub role_id: RoleId,
    pub start_minute: u32,
    pub end_minute: u32,
    /// `end_minute - start_minute`.
    pub duration: u32,
    /// Number of assignments merged into this block.
    pub assignment_count: usize,
}

impl Block {
    fn open(assignment: &Assignment) -> Self {
        Self {
            role_id: assignment.role_id.clone(),
            start_minute: assignment.start_minutes,
            end_minute: assignment.end_minutes,
            duration: assignment.duration(),
            assignment_count: 1,
        }
    }

    fn extends_with(&self, next: &Assignment) -> bool {
        self.role_id == next.role_id && self.end_minute == next.start_minutes
    }

    fn extend(&mut self, next: &Assignment) {
        self.end_minute = next.end_minutes;
        self.duration = self.end_minute - self.start_minute;
        self.assignment_count += 1;
    }
}

/// Returns one crew member's assignments sorted by start time.
///
/// Ties on start are broken by end and then role so the order is total.
pub fn crew_day<'a>(crew_id: &str, assignments: &'a [Assignment]) -> Vec<&'a Assignment> {
    let mut day: Vec<&Assignment> = assignments.iter().filter(|a| a.crew_id == crew_id).collect();
    day.sort_by(|a, b| {
        a.start_minutes
            .cmp(&b.start_minutes)
            .then(a.end_minutes.cmp(&b.end_minutes))
            .then_with(|| a.role_id.cmp(&b.role_id))
    });
    day
}

/// Merges a crew member's assignments into maximal same-role blocks.
///
/// A role change or a time gap starts a new block.
///
/// # Example
///
/// ```
/// use rosterforge_core::Assignment;
/// use rosterforge_rules::consecutive_blocks;
///
/// let day = vec![
///     Assignment::new("ana", "REGISTER", 540, 600),
///     Assignment::new("ana", "REGISTER", 600, 660),
///     Assignment::new("ana", "PRODUCT", 660, 720),
/// ];
/// let blocks = consecutive_blocks("ana", &day);
/// assert_eq!(blocks.len(), 2);
/// assert_eq!(blocks[0].duration, 120);
/// assert_eq!(blocks[0].assignment_count, 2);
/// ```
pub fn consecutive_blocks(crew_id: &str, assignments: &[Assignment]) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();
    for assignment in crew_day(crew_id, assignments) {
        match blocks.last_mut() {
            Some(block) if block.extends_with(assignment) => block.extend(assignment),
            _ => blocks.push(Block::open(assignment)),
        }
    }
    blocks
}

/// Returns the longest block a crew member worked on a role.
///
/// Ties go to the earliest block. Returns `None` if the crew member never
/// worked the role.
pub fn longest_consecutive_block(
    crew_id: &str,
    role_id: &str,
    assignments: &[Assignment],
) -> Option<Block> {
    consecutive_blocks(crew_id, assignments)
        .into_iter()
        .filter(|b| b.role_id == role_id)
        .fold(None, |best: Option<Block>, b| match best {
            Some(best) if best.duration >= b.duration => Some(best),
            _ => Some(b),
        })
}

/// Role switches between temporally adjacent assignments of one crew member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwitchCount {
    /// Adjacent pairs whose roles differ (and touch the filter role, if any).
    pub switches: u32,
    /// Pairs where one assignment ends exactly when the next starts.
    pub adjacent_pairs: u32,
}

impl SwitchCount {
    /// `max(0, 1 - switches / adjacent_pairs)`; 1.0 when nothing is adjacent.
    pub fn continuity(&self) -> f64 {
        if self.adjacent_pairs == 0 {
            return 1.0;
        }
        (1.0 - f64::from(self.switches) / f64::from(self.adjacent_pairs)).max(0.0)
    }
}

/// Counts role switches among back-to-back assignments.
///
/// Gaps never count. With `role_filter`, only switches where either side is
/// that role count; every adjacent pair still counts toward
/// `adjacent_pairs`.
///
/// # Example
///
/// ```
/// use rosterforge_core::Assignment;
/// use rosterforge_rules::role_switches;
///
/// let day = vec![
///     Assignment::new("ana", "A", 540, 600),
///     Assignment::new("ana", "A", 600, 660),
///     Assignment::new("ana", "B", 660, 720),
///     Assignment::new("ana", "B", 720, 780),
/// ];
/// let count = role_switches("ana", None, &day);
/// assert_eq!(count.switches, 1);
/// assert_eq!(count.adjacent_pairs, 3);
/// ```
pub fn role_switches(
    crew_id: &str,
    role_filter: Option<&str>,
    assignments: &[Assignment],
) -> SwitchCount {
    let day = crew_day(crew_id, assignments);
    let mut count = SwitchCount::default();
    for pair in day.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        if !prev.is_followed_by(next) {
            continue;
        }
        count.adjacent_pairs += 1;
        if prev.role_id == next.role_id {
            continue;
        }
        let counted = match role_filter {
            Some(role) => prev.role_id == role || next.role_id == role,
            None => true,
        };
        if counted {
            count.switches += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosterforge_test::roster::{at, hourly_run};

    #[test]
    fn test_gap_starts_new_block() {
        let day = vec![at("ana", "REGISTER", 9, 10), at("ana", "REGISTER", 11, 12)];
        let blocks = consecutive_blocks("ana", &day);
        assert_eq!(blocks.len(), 2);
        assert!(blocks.iter().all(|b| b.assignment_count == 1));
    }

    #[test]
    fn test_blocks_sorted_regardless_of_input_order() {
        let mut day = hourly_run("ana", 9, &["REGISTER", "REGISTER", "REGISTER"]);
        day.reverse();
        let blocks = consecutive_blocks("ana", &day);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].start_minute, 540);
        assert_eq!(blocks[0].end_minute, 720);
        assert_eq!(blocks[0].assignment_count, 3);
    }

    #[test]
    fn test_blocks_ignore_other_crew() {
        let mut day = hourly_run("ana", 9, &["REGISTER", "REGISTER"]);
        day.push(at("ben", "REGISTER", 11, 12));
        let blocks = consecutive_blocks("ana", &day);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].end_minute, 660);
    }

    #[test]
    fn test_longest_block_per_role() {
        let day = hourly_run(
            "ana",
            9,
            &["REGISTER", "PRODUCT", "PRODUCT", "PRODUCT", "REGISTER", "REGISTER"],
        );
        let longest = longest_consecutive_block("ana", "REGISTER", &day).unwrap();
        assert_eq!(longest.duration, 120);
        assert_eq!(longest.start_minute, 13 * 60);

        let product = longest_consecutive_block("ana", "PRODUCT", &day).unwrap();
        assert_eq!(product.assignment_count, 3);

        assert!(longest_consecutive_block("ana", "DEMO", &day).is_none());
    }

    #[test]
    fn test_longest_block_tie_keeps_earliest() {
        let day = hourly_run("ana", 9, &["REGISTER", "PRODUCT", "REGISTER"]);
        let longest = longest_consecutive_block("ana", "REGISTER", &day).unwrap();
        assert_eq!(longest.start_minute, 540);
    }

    #[test]
    fn test_switches_ignore_gaps() {
        let day = vec![at("ana", "A", 9, 10), at("ana", "B", 11, 12)];
        let count = role_switches("ana", None, &day);
        assert_eq!(count, SwitchCount::default());
        assert_eq!(count.continuity(), 1.0);
    }

    #[test]
    fn test_switches_with_role_filter() {
        let day = hourly_run("ana", 9, &["A", "B", "C", "A"]);
        assert_eq!(role_switches("ana", None, &day).switches, 3);
        let filtered = role_switches("ana", Some("C"), &day);
        assert_eq!(filtered.switches, 2);
        assert_eq!(filtered.adjacent_pairs, 3);
        assert_eq!(role_switches("ana", Some("Z"), &day).switches, 0);
    }

    #[test]
    fn test_continuity_values() {
        let day = hourly_run("ana", 9, &["1", "1", "2", "2"]);
        let c = role_switches("ana", None, &day).continuity();
        assert!((c - 2.0 / 3.0).abs() < 1e-9);

        let day = hourly_run("ana", 9, &["1", "2", "1", "2"]);
        assert_eq!(role_switches("ana", None, &day).continuity(), 0.0);
    }
}
