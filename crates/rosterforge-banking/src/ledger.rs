//! Store-level bank of unmet preferences.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rosterforge_config::BankingConfig;
use rosterforge_core::{CrewId, PreferenceDeclaration};
use rosterforge_scoring::SatisfactionResult;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{BankingError, Result};
use crate::record::{BankStatus, BankedPreference};

/// All banked preferences of a store, with the policy that governs them.
///
/// A preference is banked at most once while active: banking the same
/// unmet declaration on consecutive days keeps the original record, so its
/// age keeps growing.
#[derive(Debug, Clone, Default)]
pub struct BankLedger {
    config: BankingConfig,
    records: Vec<BankedPreference>,
}

impl BankLedger {
    pub fn new(config: BankingConfig) -> Self {
        Self {
            config,
            records: Vec::new(),
        }
    }

    /// Restores a ledger from previously persisted records.
    pub fn from_records(config: BankingConfig, records: Vec<BankedPreference>) -> Self {
        Self { config, records }
    }

    pub fn config(&self) -> &BankingConfig {
        &self.config
    }

    pub fn records(&self) -> &[BankedPreference] {
        &self.records
    }

    pub fn into_records(self) -> Vec<BankedPreference> {
        self.records
    }

    pub fn get(&self, id: Uuid) -> Option<&BankedPreference> {
        self.records.iter().find(|r| r.id == id)
    }

    fn get_mut(&mut self, id: Uuid) -> Result<&mut BankedPreference> {
        self.records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(BankingError::NotFound(id))
    }

    pub fn active(&self) -> impl Iterator<Item = &BankedPreference> {
        self.records.iter().filter(|r| r.is_active())
    }

    fn has_active(&self, preference_id: &str) -> bool {
        self.active().any(|r| r.preference_id == preference_id)
    }

    /// Banks every unmet result whose declaration is known and not already
    /// banked. Returns the ids of the new records.
    pub fn bank_unsatisfied(
        &mut self,
        results: &[SatisfactionResult],
        declarations: &[PreferenceDeclaration],
        today: NaiveDate,
    ) -> Vec<Uuid> {
        let by_id: HashMap<&str, &PreferenceDeclaration> =
            declarations.iter().map(|d| (d.id.as_str(), d)).collect();
        let mut created = Vec::new();
        for result in results.iter().filter(|r| !r.met) {
            let Some(decl) = by_id.get(result.preference_id.as_str()) else {
                continue;
            };
            if self.has_active(&decl.id) {
                continue;
            }
            let record = BankedPreference::from_declaration(decl, today, &self.config);
            debug!(
                event = "preference_banked",
                id = %record.id,
                crew = %record.crew_id,
                preference = %record.preference_id,
                weight = record.weight,
            );
            created.push(record.id);
            self.records.push(record);
        }
        created
    }

    /// Capped age weight of one record on `today`.
    pub fn current_weight(&self, id: Uuid, today: NaiveDate) -> Result<f64> {
        self.get(id)
            .map(|r| r.current_weight(&self.config, today))
            .ok_or(BankingError::NotFound(id))
    }

    /// Redeems one record. Returns the redeemed weight.
    pub fn redeem(&mut self, id: Uuid, today: NaiveDate) -> Result<f64> {
        let config = self.config.clone();
        self.get_mut(id)?.redeem(&config, today)
    }

    /// Redeems the active banks of every preference met today.
    ///
    /// Records past their expiry are left for [`expire_due`](Self::expire_due).
    pub fn redeem_satisfied(
        &mut self,
        results: &[SatisfactionResult],
        today: NaiveDate,
    ) -> Vec<(Uuid, f64)> {
        let config = &self.config;
        let mut redeemed = Vec::new();
        for result in results.iter().filter(|r| r.met) {
            for record in self.records.iter_mut().filter(|r| {
                r.is_active() && !r.is_past_expiry(today) && r.preference_id == result.preference_id
            }) {
                // Active and not past expiry, so the transition cannot fail.
                if let Ok(weight) = record.redeem(config, today) {
                    redeemed.push((record.id, weight));
                }
            }
        }
        redeemed
    }

    pub fn cancel(&mut self, id: Uuid) -> Result<()> {
        self.get_mut(id)?.cancel()
    }

    /// Expires every active record past its expiry. Returns how many moved.
    pub fn expire_due(&mut self, now: NaiveDate) -> usize {
        let mut expired = 0;
        for record in self
            .records
            .iter_mut()
            .filter(|r| r.is_active() && r.is_past_expiry(now))
        {
            if let Ok(true) = record.expire_if_due(now) {
                expired += 1;
            }
        }
        if expired > 0 {
            info!(event = "banks_expired", count = expired, date = %now);
        }
        expired
    }

    /// Sum of current weights of active records, per crew member.
    pub fn active_weight_by_crew(&self, today: NaiveDate) -> BTreeMap<CrewId, f64> {
        let mut totals: BTreeMap<CrewId, f64> = BTreeMap::new();
        for record in self.active() {
            *totals.entry(record.crew_id.clone()).or_default() +=
                record.current_weight(&self.config, today);
        }
        totals
    }

    /// Share of closed records that were redeemed rather than expired or
    /// canceled; 0.0 when nothing has closed yet.
    pub fn redemption_rate(&self) -> f64 {
        let closed = self.records.iter().filter(|r| !r.is_active()).count();
        if closed == 0 {
            return 0.0;
        }
        let used = self
            .records
            .iter()
            .filter(|r| r.status() == BankStatus::Used)
            .count();
        used as f64 / closed as f64
    }

    /// Mean days from banking to redemption over redeemed records.
    pub fn average_days_to_redemption(&self) -> Option<f64> {
        let days: Vec<i64> = self
            .records
            .iter()
            .filter_map(|r| r.used_date().map(|used| (used - r.original_date).num_days()))
            .collect();
        if days.is_empty() {
            None
        } else {
            Some(days.iter().sum::<i64>() as f64 / days.len() as f64)
        }
    }

    /// Record count per status.
    pub fn status_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.status().to_string()).or_default() += 1;
        }
        counts
    }
}
