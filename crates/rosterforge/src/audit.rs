//! One-call audit of a finished day.

use chrono::NaiveDate;
use rosterforge_banking::BankLedger;
use rosterforge_config::{ConfigError, EngineConfig};
use rosterforge_core::{Assignment, PreferenceDeclaration, ValidationResult};
use rosterforge_rules::RosterValidator;
use rosterforge_scoring::{
    ConsecutivePenaltyScorer, PenaltyReport, PreferenceCalculator, SatisfactionResult,
    SatisfactionSummary,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

/// Everything known about a roster once the day is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayAudit {
    /// Hard rule outcome.
    pub validation: ValidationResult,
    /// One result per declared preference, in declaration order.
    pub satisfaction: Vec<SatisfactionResult>,
    pub summary: SatisfactionSummary,
    /// The consecutive term as the optimizer sees it.
    pub penalty: PenaltyReport,
}

impl DayAudit {
    /// The roster breaks no hard rule.
    pub fn is_valid(&self) -> bool {
        self.validation.valid
    }

    pub fn unmet(&self) -> impl Iterator<Item = &SatisfactionResult> {
        self.satisfaction.iter().filter(|r| !r.met)
    }
}

/// Validates a roster and scores every preference against it.
///
/// # Errors
///
/// Returns an error when the configuration is invalid. A roster that
/// breaks rules is reported in [`DayAudit::validation`].
///
/// # Example
///
/// ```
/// use rosterforge::prelude::*;
///
/// let config = EngineConfig::new()
///     .with_store(StoreConfig::new(480, 1320))
///     .with_role(RoleConfig::new("REGISTER", AssignmentModel::Hourly))
///     .with_hourly_requirement(HourlyRequirement::new("REGISTER", 9, 1));
/// let roster = vec![Assignment::new("ana", "REGISTER", 540, 600)];
/// let prefs = vec![
///     PreferenceDeclaration::new("p1", "ana", PreferenceType::FirstHour).with_role("REGISTER"),
/// ];
///
/// let audit = audit_day(&config, &roster, &prefs).unwrap();
/// assert!(audit.is_valid());
/// assert_eq!(audit.summary.average_satisfaction, 1.0);
/// ```
pub fn audit_day(
    config: &EngineConfig,
    assignments: &[Assignment],
    prefs: &[PreferenceDeclaration],
) -> Result<DayAudit, ConfigError> {
    config.validate()?;
    let validator = RosterValidator::new(
        &config.store,
        &config.roles,
        &config.hourly_requirements,
        &config.window_requirements,
    )?;
    let validation = validator.validate(assignments)?;

    let calculator = PreferenceCalculator::new(&config.store, &config.roles);
    let satisfaction = calculator.evaluate_all(prefs, assignments);
    let summary = SatisfactionSummary::from_results(&satisfaction);
    let penalty = ConsecutivePenaltyScorer::new().score(prefs, assignments);

    info!(
        event = "day_audited",
        valid = validation.valid,
        violations = validation.violations.len(),
        preferences = satisfaction.len(),
        average_satisfaction = summary.average_satisfaction,
        penalty = penalty.total,
    );
    Ok(DayAudit {
        validation,
        satisfaction,
        summary,
        penalty,
    })
}

/// Bank movements made when a day is closed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DayClose {
    /// Records redeemed because their preference was met, with the weight.
    pub redeemed: Vec<(Uuid, f64)>,
    /// Records created for preferences left unmet.
    pub banked: Vec<Uuid>,
    pub expired: usize,
}

/// Settles the bank after an audited day.
///
/// Expiry runs first, so a record past its window is never redeemed. Met
/// preferences then redeem their active banks and unmet ones are banked.
pub fn close_day(
    ledger: &mut BankLedger,
    audit: &DayAudit,
    prefs: &[PreferenceDeclaration],
    today: NaiveDate,
) -> DayClose {
    let expired = ledger.expire_due(today);
    let redeemed = ledger.redeem_satisfied(&audit.satisfaction, today);
    let banked = ledger.bank_unsatisfied(&audit.satisfaction, prefs, today);
    info!(
        event = "day_closed",
        date = %today,
        redeemed = redeemed.len(),
        banked = banked.len(),
        expired,
    );
    DayClose {
        redeemed,
        banked,
        expired,
    }
}
