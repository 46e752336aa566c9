//! Weighted aggregation of satisfaction results.

use std::collections::BTreeMap;

use rosterforge_core::CrewId;
use serde::{Deserialize, Serialize};

use crate::satisfaction::SatisfactionResult;

/// Weighted average of `satisfaction` by `weight_applied`.
///
/// Returns 0.0 when there are no results or the weights sum to zero.
///
/// # Example
///
/// ```
/// use rosterforge_scoring::{average_satisfaction, SatisfactionResult};
/// use rosterforge_core::PreferenceType;
///
/// let result = |satisfaction: f64, weight: f64| SatisfactionResult {
///     preference_id: "p".into(),
///     crew_id: "ana".into(),
///     preference_type: PreferenceType::Favorite,
///     satisfaction,
///     met: satisfaction > 0.5,
///     weight_applied: weight,
///     details: None,
/// };
///
/// let avg = average_satisfaction(&[result(1.0, 3.0), result(0.0, 1.0)]);
/// assert_eq!(avg, 0.75);
/// assert_eq!(average_satisfaction(&[]), 0.0);
/// ```
pub fn average_satisfaction(results: &[SatisfactionResult]) -> f64 {
    weighted_mean(results.iter())
}

fn weighted_mean<'a>(results: impl Iterator<Item = &'a SatisfactionResult>) -> f64 {
    let (sum, weight) = results.fold((0.0, 0.0), |(sum, weight), r| {
        (sum + r.satisfaction * r.weight_applied, weight + r.weight_applied)
    });
    if weight == 0.0 {
        0.0
    } else {
        sum / weight
    }
}

/// Day-level view over a batch of satisfaction results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatisfactionSummary {
    pub average_satisfaction: f64,
    pub total_weight: f64,
    pub met_count: usize,
    pub result_count: usize,
    /// Weighted average per crew member.
    pub per_crew: BTreeMap<CrewId, f64>,
}

impl SatisfactionSummary {
    pub fn from_results(results: &[SatisfactionResult]) -> Self {
        let mut by_crew: BTreeMap<&str, Vec<&SatisfactionResult>> = BTreeMap::new();
        for r in results {
            by_crew.entry(r.crew_id.as_str()).or_default().push(r);
        }
        Self {
            average_satisfaction: average_satisfaction(results),
            total_weight: results.iter().map(|r| r.weight_applied).sum(),
            met_count: results.iter().filter(|r| r.met).count(),
            result_count: results.len(),
            per_crew: by_crew
                .into_iter()
                .map(|(crew, rs)| (crew.to_string(), weighted_mean(rs.into_iter())))
                .collect(),
        }
    }

    /// Fraction of preferences met, 0.0 for an empty batch.
    pub fn met_ratio(&self) -> f64 {
        if self.result_count == 0 {
            0.0
        } else {
            self.met_count as f64 / self.result_count as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosterforge_core::PreferenceType;

    fn result(crew: &str, satisfaction: f64, weight: f64) -> SatisfactionResult {
        SatisfactionResult {
            preference_id: format!("{crew}-{satisfaction}"),
            crew_id: crew.to_string(),
            preference_type: PreferenceType::Consecutive,
            satisfaction,
            met: satisfaction > 0.5,
            weight_applied: weight,
            details: None,
        }
    }

    #[test]
    fn test_weighted_average() {
        let results = vec![result("ana", 1.0, 1.0), result("ben", 0.5, 2.0), result("ana", 0.0, 1.0)];
        assert!((average_satisfaction(&results) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_weight_is_zero() {
        let results = vec![result("ana", 1.0, 0.0), result("ben", 1.0, 0.0)];
        assert_eq!(average_satisfaction(&results), 0.0);
    }

    #[test]
    fn test_summary_per_crew() {
        let results = vec![result("ben", 0.5, 2.0), result("ana", 1.0, 1.0), result("ana", 0.0, 3.0)];
        let summary = SatisfactionSummary::from_results(&results);
        assert_eq!(summary.result_count, 3);
        assert_eq!(summary.met_count, 1);
        assert_eq!(summary.total_weight, 6.0);
        assert_eq!(summary.per_crew.len(), 2);
        assert!((summary.per_crew["ana"] - 0.25).abs() < 1e-9);
        assert_eq!(summary.per_crew["ben"], 0.5);
        assert!((summary.met_ratio() - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_summary() {
        let summary = SatisfactionSummary::from_results(&[]);
        assert_eq!(summary.average_satisfaction, 0.0);
        assert_eq!(summary.met_ratio(), 0.0);
        assert!(summary.per_crew.is_empty());
    }
}
