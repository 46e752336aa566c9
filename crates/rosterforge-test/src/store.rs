//! A standard store: open 8:00 AM to 10:00 PM, hourly slots.

use rosterforge_core::{AssignmentModel, RoleConfig, StoreConfig};

/// Store open `[8:00, 22:00)` with 60-minute slots and a break due in the
/// 2nd to 4th hour of any shift of 6 hours or more.
pub fn standard_store() -> StoreConfig {
    StoreConfig::new(480, 1320)
}

/// REGISTER (hourly), PRODUCT (individual hours, 1-4 slots), BREAK,
/// DEMO and WINE_DEMO (coverage windows, one consecutive slot), and
/// TRUCK (allowed outside store hours).
pub fn standard_roles() -> Vec<RoleConfig> {
    vec![
        RoleConfig::new("REGISTER", AssignmentModel::Hourly),
        RoleConfig::new("PRODUCT", AssignmentModel::IndividualHours)
            .with_slot_range(Some(1), Some(4)),
        RoleConfig::break_role("BREAK").with_slot_range(Some(1), Some(1)),
        RoleConfig::new("DEMO", AssignmentModel::CoverageWindow)
            .with_slot_range(Some(1), Some(1))
            .consecutive(),
        RoleConfig::new("WINE_DEMO", AssignmentModel::CoverageWindow)
            .with_slot_range(Some(1), Some(1))
            .consecutive(),
        RoleConfig::new("TRUCK", AssignmentModel::IndividualHours).outside_store_hours(),
    ]
}
