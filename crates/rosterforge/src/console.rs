//! Colored console output for RosterForge events.
//!
//! A `tracing` layer that prints the lifecycle events of the engine:
//!
//! - **INFO**: ranking start/end, scenario results, day audit and close,
//!   bank expiry
//! - **WARN**: window searches that ran out of budget
//!
//! Other events are left to whatever else is installed on the subscriber.

use std::io::{self, Write};
use std::sync::OnceLock;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Installs the console layer with an `EnvFilter`.
///
/// `RUST_LOG` is honored; without it, RosterForge crates log at INFO and
/// everything else at WARN. Safe to call multiple times: only the first
/// call has effect, and an already installed global subscriber is kept.
pub fn init() {
    INIT.get_or_init(|| {
        let mut filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy();
        if let Ok(directive) = "rosterforge=info".parse() {
            filter = filter.add_directive(directive);
        }

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(RosterConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats RosterForge events with colors.
#[derive(Debug, Default, Clone, Copy)]
pub struct RosterConsoleLayer;

impl<S: Subscriber> Layer<S> for RosterConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("rosterforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{output}");
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    primary: Option<String>,
    secondary: Option<String>,
    scenario: Option<String>,
    constraint: Option<String>,
    solver: Option<String>,
    date: Option<String>,
    primary_windows: Option<u64>,
    secondary_windows: Option<u64>,
    pairs: Option<u64>,
    feasible_pairs: Option<u64>,
    incomplete_pairs: Option<u64>,
    nodes: Option<u64>,
    partial_count: Option<u64>,
    violations: Option<u64>,
    preferences: Option<u64>,
    redeemed: Option<u64>,
    banked: Option<u64>,
    expired: Option<u64>,
    count: Option<u64>,
    duration_ms: Option<u64>,
    average_satisfaction: Option<f64>,
    penalty: Option<f64>,
    passed: Option<bool>,
    valid: Option<bool>,
}

impl EventVisitor {
    fn set_text(&mut self, name: &str, value: String) {
        let slot = match name {
            "event" => &mut self.event,
            "primary" => &mut self.primary,
            "secondary" => &mut self.secondary,
            "scenario" => &mut self.scenario,
            "constraint" => &mut self.constraint,
            "solver" => &mut self.solver,
            "date" => &mut self.date,
            _ => return,
        };
        *slot = Some(value);
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{value:?}");
        self.set_text(field.name(), s.trim_matches('"').to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.set_text(field.name(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        let slot = match field.name() {
            "primary_windows" => &mut self.primary_windows,
            "secondary_windows" => &mut self.secondary_windows,
            "pairs" => &mut self.pairs,
            "feasible_pairs" => &mut self.feasible_pairs,
            "incomplete_pairs" => &mut self.incomplete_pairs,
            "nodes" => &mut self.nodes,
            "partial_count" => &mut self.partial_count,
            "violations" => &mut self.violations,
            "preferences" => &mut self.preferences,
            "redeemed" => &mut self.redeemed,
            "banked" => &mut self.banked,
            "expired" => &mut self.expired,
            "count" => &mut self.count,
            "duration_ms" => &mut self.duration_ms,
            _ => return,
        };
        *slot = Some(value);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "average_satisfaction" => self.average_satisfaction = Some(value),
            "penalty" => self.penalty = Some(value),
            _ => {}
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        match field.name() {
            "passed" => self.passed = Some(value),
            "valid" => self.valid = Some(value),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "ranking_start" => format_ranking_start(v),
        "ranking_end" => format_ranking_end(v),
        "search_budget_exhausted" => format_budget_exhausted(v),
        "scenario_end" => format_scenario_end(v),
        "day_audited" => format_day_audited(v),
        "day_closed" => format_day_closed(v),
        "banks_expired" => format_banks_expired(v),
        _ => String::new(),
    }
}

fn num(value: Option<u64>) -> String {
    value.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("?")
}

fn format_ranking_start(v: &EventVisitor) -> String {
    format!(
        "{} Ranking {} × {} │ {} × {} longest windows │ {} pairs",
        "▶".bright_green().bold(),
        text(&v.primary).bright_white().bold(),
        text(&v.secondary).bright_white().bold(),
        num(v.primary_windows).bright_yellow(),
        num(v.secondary_windows).bright_yellow(),
        num(v.pairs).bright_yellow(),
    )
}

fn format_ranking_end(v: &EventVisitor) -> String {
    let feasible = v.feasible_pairs.unwrap_or(0);
    let status = if feasible > 0 {
        "FEASIBLE".bright_green().bold().to_string()
    } else {
        "NO STAFFABLE PAIR".bright_red().bold().to_string()
    };
    let mut output = format!(
        "{} Ranking complete │ {} feasible pairs │ {}ms │ {}",
        "■".bright_cyan().bold(),
        num(v.feasible_pairs).bright_yellow(),
        num(v.duration_ms),
        status,
    );
    if v.incomplete_pairs.unwrap_or(0) > 0 {
        output.push_str(&format!(
            " │ {} over budget",
            num(v.incomplete_pairs).bright_red()
        ));
    }
    output
}

fn format_budget_exhausted(v: &EventVisitor) -> String {
    format!(
        "{} Search budget exhausted │ {} + {} │ {} nodes │ at least {} staffings",
        "⚠".bright_yellow().bold(),
        text(&v.primary),
        text(&v.secondary),
        num(v.nodes).bright_yellow(),
        num(v.partial_count).bright_yellow(),
    )
}

fn format_scenario_end(v: &EventVisitor) -> String {
    let mark = if v.passed.unwrap_or(false) {
        "PASS".bright_green().bold().to_string()
    } else {
        "FAIL".bright_red().bold().to_string()
    };
    format!(
        "{mark} {} [{}] via {} │ {} violations",
        text(&v.scenario).bright_white(),
        text(&v.constraint),
        text(&v.solver),
        num(v.violations),
    )
}

fn format_day_audited(v: &EventVisitor) -> String {
    let status = if v.valid.unwrap_or(false) {
        "VALID".bright_green().bold().to_string()
    } else {
        format!("{} violations", num(v.violations))
            .bright_red()
            .bold()
            .to_string()
    };
    format!(
        "{} Day audited │ {} │ {} preferences │ satisfaction {:.3} │ penalty {:.2}",
        "■".bright_cyan().bold(),
        status,
        num(v.preferences).bright_yellow(),
        v.average_satisfaction.unwrap_or(0.0),
        v.penalty.unwrap_or(0.0),
    )
}

fn format_day_closed(v: &EventVisitor) -> String {
    format!(
        "{} Day {} closed │ {} redeemed │ {} banked │ {} expired",
        "■".bright_cyan().bold(),
        text(&v.date),
        num(v.redeemed).bright_green(),
        num(v.banked).bright_yellow(),
        num(v.expired).bright_black(),
    )
}

fn format_banks_expired(v: &EventVisitor) -> String {
    format!(
        "{} {} banked preference(s) expired on {}",
        "⌛".bright_black(),
        num(v.count),
        text(&v.date),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visitor(event: &str) -> EventVisitor {
        EventVisitor {
            event: Some(event.to_string()),
            ..EventVisitor::default()
        }
    }

    #[test]
    fn test_unknown_events_are_silent() {
        assert!(format_event(&visitor("pair_searched")).is_empty());
        assert!(format_event(&EventVisitor::default()).is_empty());
    }

    #[test]
    fn test_ranking_end_mentions_budget_only_when_hit() {
        let mut v = visitor("ranking_end");
        v.feasible_pairs = Some(3);
        assert!(format_event(&v).contains("FEASIBLE"));
        assert!(!format_event(&v).contains("over budget"));

        v.incomplete_pairs = Some(2);
        assert!(format_event(&v).contains("over budget"));
    }

    #[test]
    fn test_budget_warning_groups_thousands() {
        let mut v = visitor("search_budget_exhausted");
        v.primary = Some("9:00 AM-12:00 PM".to_string());
        v.nodes = Some(5_000_001);
        v.partial_count = Some(12);
        let output = format_event(&v);
        assert!(output.contains("5,000,001"));
        assert!(output.contains("9:00 AM-12:00 PM"));
    }

    #[test]
    fn test_scenario_end_marks_failures() {
        let mut v = visitor("scenario_end");
        v.scenario = Some("hourly-01".to_string());
        v.passed = Some(false);
        let output = format_event(&v);
        assert!(output.contains("FAIL"));
        assert!(output.contains("hourly-01"));
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
        tracing::info!(event = "day_closed", date = "2024-03-01", redeemed = 1u64);
    }
}
