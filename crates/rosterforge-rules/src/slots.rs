//! Block size and fragmentation rules.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use rosterforge_core::clock::format_12h;
use rosterforge_core::{Assignment, Result, RoleConfig, RosterError, StoreConfig, ValidationResult};

use crate::blocks::{consecutive_blocks, Block};
use crate::RosterRule;

/// Flags blocks whose size in slots falls outside `[min_slots, max_slots]`,
/// and roles that must be worked in one piece but were split.
#[derive(Debug)]
pub struct ConsecutiveAndSlotSizeValidator<'a> {
    store: &'a StoreConfig,
    roles: HashMap<&'a str, &'a RoleConfig>,
}

impl<'a> ConsecutiveAndSlotSizeValidator<'a> {
    pub fn new(store: &'a StoreConfig, roles: &'a [RoleConfig]) -> Result<Self> {
        store.validate()?;
        let mut by_code = HashMap::with_capacity(roles.len());
        for role in roles {
            role.validate()?;
            by_code.insert(role.code.as_str(), role);
        }
        Ok(Self {
            store,
            roles: by_code,
        })
    }

    fn role(&self, code: &str) -> Result<&'a RoleConfig> {
        self.roles
            .get(code)
            .copied()
            .ok_or_else(|| RosterError::UnknownRole(code.to_string()))
    }

    /// Blocks of every crew member, crew in sorted order.
    fn blocks_by_crew(assignments: &[Assignment]) -> BTreeMap<&str, Vec<Block>> {
        let crew: BTreeSet<&str> = assignments.iter().map(|a| a.crew_id.as_str()).collect();
        crew.into_iter()
            .map(|c| (c, consecutive_blocks(c, assignments)))
            .collect()
    }

    /// Block size violations only.
    pub fn check_slot_sizes(&self, assignments: &[Assignment]) -> Result<ValidationResult> {
        let mut result = ValidationResult::ok();
        for (crew, blocks) in Self::blocks_by_crew(assignments) {
            for block in &blocks {
                let role = self.role(&block.role_id)?;
                let slots = self.store.slots_for(block.duration);
                if role.accepts_block_of(slots) {
                    continue;
                }
                let bound = match (role.min_slots, role.max_slots) {
                    (Some(min), _) if slots < min => format!("below minimum of {min}"),
                    (_, Some(max)) => format!("above maximum of {max}"),
                    _ => continue,
                };
                result.push(format!(
                    "{crew} on {}: block {}-{} is {slots} slot(s), {bound}",
                    block.role_id,
                    format_12h(block.start_minute),
                    format_12h(block.end_minute),
                ));
            }
        }
        Ok(result)
    }

    /// Fragmentation violations only.
    pub fn check_consecutive(&self, assignments: &[Assignment]) -> Result<ValidationResult> {
        let mut result = ValidationResult::ok();
        for (crew, blocks) in Self::blocks_by_crew(assignments) {
            let mut per_role: BTreeMap<&str, usize> = BTreeMap::new();
            for block in &blocks {
                *per_role.entry(block.role_id.as_str()).or_default() += 1;
            }
            for (role_id, count) in per_role {
                if count > 1 && self.role(role_id)?.slots_must_be_consecutive {
                    result.push(format!(
                        "{crew} on {role_id}: split into {count} blocks, must be worked consecutively"
                    ));
                }
            }
        }
        Ok(result)
    }
}

impl RosterRule for ConsecutiveAndSlotSizeValidator<'_> {
    fn validate(&self, assignments: &[Assignment]) -> Result<ValidationResult> {
        let mut result = self.check_slot_sizes(assignments)?;
        result.merge(self.check_consecutive(assignments)?);
        Ok(result)
    }

    fn name(&self) -> &str {
        "Consecutive and slot size"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosterforge_test::roster::{at, hourly_run};
    use rosterforge_test::store::{standard_roles, standard_store};

    #[test]
    fn test_block_above_maximum() {
        let store = standard_store();
        let roles = standard_roles();
        let rule = ConsecutiveAndSlotSizeValidator::new(&store, &roles).unwrap();
        let roster = vec![at("ana", "PRODUCT", 9, 14)];
        let result = rule.validate(&roster).unwrap();
        assert_eq!(
            result.violations,
            vec!["ana on PRODUCT: block 9:00 AM-2:00 PM is 5 slot(s), above maximum of 4"]
        );
    }

    #[test]
    fn test_block_below_minimum_in_small_slots() {
        let store = standard_store().with_base_slot_minutes(15);
        let roles = vec![rosterforge_core::RoleConfig::new(
            "REGISTER",
            rosterforge_core::AssignmentModel::Hourly,
        )
        .with_slot_range(Some(4), None)];
        let rule = ConsecutiveAndSlotSizeValidator::new(&store, &roles).unwrap();
        let roster = vec![Assignment::new("ana", "REGISTER", 540, 570)];
        let result = rule.validate(&roster).unwrap();
        assert!(result.violations[0].contains("2 slot(s), below minimum of 4"));
    }

    #[test]
    fn test_adjacent_assignments_merge_before_sizing() {
        let store = standard_store();
        let roles = standard_roles();
        let rule = ConsecutiveAndSlotSizeValidator::new(&store, &roles).unwrap();
        let roster = hourly_run("ana", 9, &["DEMO", "DEMO"]);
        let result = rule.validate(&roster).unwrap();
        assert_eq!(result.violation_count(), 1);
        assert!(result.violations[0].contains("2 slot(s), above maximum of 1"));
    }

    #[test]
    fn test_fragmented_consecutive_role() {
        let store = standard_store();
        let roles = standard_roles();
        let rule = ConsecutiveAndSlotSizeValidator::new(&store, &roles).unwrap();
        let roster = hourly_run("ana", 10, &["DEMO", "REGISTER", "DEMO"]);
        let result = rule.check_consecutive(&roster).unwrap();
        assert_eq!(
            result.violations,
            vec!["ana on DEMO: split into 2 blocks, must be worked consecutively"]
        );
    }

    #[test]
    fn test_fragmentation_allowed_for_free_roles() {
        let store = standard_store();
        let roles = standard_roles();
        let rule = ConsecutiveAndSlotSizeValidator::new(&store, &roles).unwrap();
        let roster = hourly_run("ana", 10, &["REGISTER", "PRODUCT", "REGISTER"]);
        assert!(rule.validate(&roster).unwrap().valid);
    }

    #[test]
    fn test_crew_reported_in_sorted_order() {
        let store = standard_store();
        let roles = standard_roles();
        let rule = ConsecutiveAndSlotSizeValidator::new(&store, &roles).unwrap();
        let roster = vec![at("zoe", "PRODUCT", 9, 15), at("abe", "PRODUCT", 9, 15)];
        let result = rule.validate(&roster).unwrap();
        assert!(result.violations[0].starts_with("abe"));
        assert!(result.violations[1].starts_with("zoe"));
    }

    #[test]
    fn test_unknown_role_is_an_error() {
        let store = standard_store();
        let roles = standard_roles();
        let rule = ConsecutiveAndSlotSizeValidator::new(&store, &roles).unwrap();
        assert!(rule.validate(&[at("ana", "JANITOR", 9, 10)]).is_err());
    }
}
