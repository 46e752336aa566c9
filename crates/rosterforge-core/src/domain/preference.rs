//! Soft crew preferences.

use std::fmt;

use super::{CrewId, RoleId};

/// The closed set of preference kinds.
///
/// Every scorer matches on this exhaustively, so a new kind does not
/// compile until each scorer handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum PreferenceType {
    /// Start the day on a given role.
    FirstHour,
    /// Spend the most time on a given role.
    Favorite,
    /// Take the break early or late in the break window.
    Timing,
    /// Avoid switching roles between back-to-back assignments.
    Consecutive,
}

impl fmt::Display for PreferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreferenceType::FirstHour => write!(f, "FIRST_HOUR"),
            PreferenceType::Favorite => write!(f, "FAVORITE"),
            PreferenceType::Timing => write!(f, "TIMING"),
            PreferenceType::Consecutive => write!(f, "CONSECUTIVE"),
        }
    }
}

/// Direction of a TIMING preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimingDirection {
    Early,
    Late,
}

/// A soft preference declared for one crew member.
///
/// # Example
///
/// ```
/// use rosterforge_core::{PreferenceDeclaration, PreferenceType, TimingDirection};
///
/// let pref = PreferenceDeclaration::new("p1", "ana", PreferenceType::Timing)
///     .with_weights(4.0, 1.5)
///     .with_int_value(-1);
///
/// assert_eq!(pref.weight_applied(), 6.0);
/// assert_eq!(pref.timing_direction(), Some(TimingDirection::Early));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreferenceDeclaration {
    pub id: String,
    pub crew_id: CrewId,
    /// Target role; `None` applies across all roles (CONSECUTIVE only).
    #[cfg_attr(feature = "serde", serde(default))]
    pub role_id: Option<RoleId>,
    pub preference_type: PreferenceType,
    pub base_weight: f64,
    pub crew_weight: f64,
    /// Optimizer-side multiplier; only the objective-style scorer uses it.
    #[cfg_attr(feature = "serde", serde(default = "default_adaptive_boost"))]
    pub adaptive_boost: f64,
    /// TIMING direction: negative is early, positive is late.
    #[cfg_attr(feature = "serde", serde(default))]
    pub int_value: Option<i32>,
}

#[cfg(feature = "serde")]
fn default_adaptive_boost() -> f64 {
    1.0
}

impl PreferenceDeclaration {
    /// Creates a preference with unit weights and no target role.
    pub fn new(id: impl Into<String>, crew_id: impl Into<CrewId>, preference_type: PreferenceType) -> Self {
        Self {
            id: id.into(),
            crew_id: crew_id.into(),
            role_id: None,
            preference_type,
            base_weight: 1.0,
            crew_weight: 1.0,
            adaptive_boost: 1.0,
            int_value: None,
        }
    }

    pub fn with_role(mut self, role_id: impl Into<RoleId>) -> Self {
        self.role_id = Some(role_id.into());
        self
    }

    pub fn with_weights(mut self, base_weight: f64, crew_weight: f64) -> Self {
        self.base_weight = base_weight;
        self.crew_weight = crew_weight;
        self
    }

    pub fn with_adaptive_boost(mut self, boost: f64) -> Self {
        self.adaptive_boost = boost;
        self
    }

    pub fn with_int_value(mut self, value: i32) -> Self {
        self.int_value = Some(value);
        self
    }

    /// `base_weight × crew_weight`, the weight used for satisfaction averaging.
    #[inline]
    pub fn weight_applied(&self) -> f64 {
        self.base_weight * self.crew_weight
    }

    /// `base_weight × crew_weight × adaptive_boost`, the optimizer's weight.
    #[inline]
    pub fn objective_weight(&self) -> f64 {
        self.weight_applied() * self.adaptive_boost
    }

    /// Direction encoded in `int_value`; `None` when absent or zero.
    pub fn timing_direction(&self) -> Option<TimingDirection> {
        match self.int_value {
            Some(v) if v < 0 => Some(TimingDirection::Early),
            Some(v) if v > 0 => Some(TimingDirection::Late),
            _ => None,
        }
    }
}
