//! A single banked preference.

use std::fmt;

use chrono::{Days, NaiveDate};
use rosterforge_config::BankingConfig;
use rosterforge_core::{CrewId, PreferenceDeclaration, PreferenceType};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{BankingError, Result};

/// Lifecycle status without payload, for reporting and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BankStatus {
    Active,
    Used,
    Expired,
    Canceled,
}

impl fmt::Display for BankStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BankStatus::Active => write!(f, "ACTIVE"),
            BankStatus::Used => write!(f, "USED"),
            BankStatus::Expired => write!(f, "EXPIRED"),
            BankStatus::Canceled => write!(f, "CANCELED"),
        }
    }
}

/// Lifecycle state. Every state except `Active` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BankState {
    Active,
    Used {
        used_date: NaiveDate,
        /// Weight applied on the day of redemption, bonus included.
        redeemed_weight: f64,
    },
    Expired,
    Canceled,
}

impl BankState {
    pub fn status(&self) -> BankStatus {
        match self {
            BankState::Active => BankStatus::Active,
            BankState::Used { .. } => BankStatus::Used,
            BankState::Expired => BankStatus::Expired,
            BankState::Canceled => BankStatus::Canceled,
        }
    }
}

/// An unmet preference carried forward to later days.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use rosterforge_banking::{BankStatus, BankedPreference};
/// use rosterforge_config::BankingConfig;
/// use rosterforge_core::{PreferenceDeclaration, PreferenceType};
///
/// let config = BankingConfig::default();
/// let day = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
///
/// let pref = PreferenceDeclaration::new("p1", "ana", PreferenceType::FirstHour)
///     .with_role("REGISTER")
///     .with_weights(2.0, 1.0);
/// let mut bank = BankedPreference::from_declaration(&pref, day(1), &config);
///
/// // Linear growth of 0.1 per day by default.
/// assert!((bank.current_weight(&config, day(6)) - 3.0).abs() < 1e-9);
///
/// let redeemed = bank.redeem(&config, day(6)).unwrap();
/// assert!((redeemed - 4.5).abs() < 1e-9);
/// assert_eq!(bank.status(), BankStatus::Used);
/// assert!(bank.cancel().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankedPreference {
    pub id: Uuid,
    /// Declaration this record was banked from.
    pub preference_id: String,
    pub crew_id: CrewId,
    pub preference_type: PreferenceType,
    /// Target role, or the TIMING direction, as declared.
    #[serde(default)]
    pub preference_value: Option<String>,
    /// Weight when banked, before age growth.
    pub weight: f64,
    pub original_date: NaiveDate,
    /// Last day the record can be redeemed.
    pub expires_at: NaiveDate,
    #[serde(flatten)]
    pub state: BankState,
}

impl BankedPreference {
    /// Banks a declaration on `today` with its applied weight.
    pub fn from_declaration(
        pref: &PreferenceDeclaration,
        today: NaiveDate,
        config: &BankingConfig,
    ) -> Self {
        let preference_value = match pref.preference_type {
            PreferenceType::Timing => pref.int_value.map(|v| v.to_string()),
            _ => pref.role_id.clone(),
        };
        Self {
            id: Uuid::new_v4(),
            preference_id: pref.id.clone(),
            crew_id: pref.crew_id.clone(),
            preference_type: pref.preference_type,
            preference_value,
            weight: pref.weight_applied(),
            original_date: today,
            expires_at: today
                .checked_add_days(Days::new(u64::from(config.expiry_days)))
                .unwrap_or(NaiveDate::MAX),
            state: BankState::Active,
        }
    }

    pub fn status(&self) -> BankStatus {
        self.state.status()
    }

    pub fn is_active(&self) -> bool {
        self.state == BankState::Active
    }

    pub fn used_date(&self) -> Option<NaiveDate> {
        match self.state {
            BankState::Used { used_date, .. } => Some(used_date),
            _ => None,
        }
    }

    /// Whole days since banking; 0 for dates before `original_date`.
    pub fn days_old(&self, today: NaiveDate) -> u32 {
        let days = (today - self.original_date).num_days().max(0);
        u32::try_from(days).unwrap_or(u32::MAX)
    }

    /// `true` once `now` is past `expires_at`.
    pub fn is_past_expiry(&self, now: NaiveDate) -> bool {
        now > self.expires_at
    }

    /// `weight × capped_multiplier(days_old)`, so never below the banked
    /// weight and never above `weight × max_multiplier`.
    pub fn current_weight(&self, config: &BankingConfig, today: NaiveDate) -> f64 {
        self.weight * config.capped_multiplier(self.days_old(today))
    }

    fn transition(&mut self, to: BankState) -> Result<()> {
        if !self.is_active() {
            return Err(BankingError::InvalidTransition {
                id: self.id,
                from: self.status(),
                to: to.status(),
            });
        }
        debug!(
            event = "bank_transition",
            id = %self.id,
            crew = %self.crew_id,
            to = %to.status(),
        );
        self.state = to;
        Ok(())
    }

    /// ACTIVE to USED. Returns the redeemed weight: the capped age weight
    /// times the banking bonus.
    pub fn redeem(&mut self, config: &BankingConfig, today: NaiveDate) -> Result<f64> {
        if self.is_active() && self.is_past_expiry(today) {
            return Err(BankingError::PastExpiry {
                id: self.id,
                expires_at: self.expires_at,
            });
        }
        let redeemed_weight = self.current_weight(config, today) * config.banking_bonus;
        self.transition(BankState::Used {
            used_date: today,
            redeemed_weight,
        })?;
        Ok(redeemed_weight)
    }

    /// ACTIVE to EXPIRED when `now` is past `expires_at`.
    ///
    /// Returns `Ok(false)` for an active record that is not yet due.
    pub fn expire_if_due(&mut self, now: NaiveDate) -> Result<bool> {
        if self.is_active() && !self.is_past_expiry(now) {
            return Ok(false);
        }
        self.transition(BankState::Expired)?;
        Ok(true)
    }

    /// ACTIVE to CANCELED.
    pub fn cancel(&mut self) -> Result<()> {
        self.transition(BankState::Canceled)
    }
}
