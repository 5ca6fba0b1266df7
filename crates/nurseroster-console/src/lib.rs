//! Colored console output for solver metrics.
//!
//! A custom `tracing::Layer` that formats lifecycle events emitted by
//! `nurseroster-solver` (`Solving started`, `New best solution`, …) with
//! colors and thousands-separated numbers, mirroring a dashboard rather
//! than raw log lines.

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Installs [`SolverConsoleLayer`] as the global tracing subscriber. Safe to
/// call more than once; only the first call has effect.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::from_default_env().add_directive("nurseroster_solver=debug".parse().unwrap());
        tracing_subscriber::registry().with(filter).with(SolverConsoleLayer).init();
    });
}

/// A tracing layer that formats solver events with colors. Events outside
/// the `nurseroster_solver` target are ignored.
pub struct SolverConsoleLayer;

impl<S: Subscriber> Layer<S> for SolverConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("nurseroster_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_solver_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{output}");
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    phase_name: Option<String>,
    duration_ms: Option<u64>,
    entity_count: Option<u64>,
    variable_count: Option<u64>,
    value_count: Option<u64>,
    step: Option<u64>,
    score: Option<String>,
    final_score: Option<String>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{value:?}");
        match field.name() {
            "message" => self.message = Some(s),
            "phase_name" => self.phase_name = Some(s.trim_matches('"').to_string()),
            "score" => self.score = Some(s.trim_matches('"').to_string()),
            "final_score" => self.final_score = Some(s.trim_matches('"').to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "duration_ms" => self.duration_ms = Some(value),
            "entity_count" => self.entity_count = Some(value),
            "variable_count" => self.variable_count = Some(value),
            "value_count" => self.value_count = Some(value),
            "step" => self.step = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = Some(value.to_string()),
            "phase_name" => self.phase_name = Some(value.to_string()),
            "score" => self.score = Some(value.to_string()),
            "final_score" => self.final_score = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_solver_event(v: &EventVisitor) -> String {
    match v.message.as_deref().unwrap_or("") {
        "Solving started" => format_solving_started(v),
        "Solving ended" => format_solving_ended(v),
        "New best solution" => format_new_best(v),
        _ => String::new(),
    }
}

fn format_solving_started(v: &EventVisitor) -> String {
    let entity_count = v.entity_count.unwrap_or(0);
    let variable_count = v.variable_count.unwrap_or(0);
    let value_count = v.value_count.unwrap_or(0);

    format!(
        "{} {} {} entity count ({}), variable count ({}), value count ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Solver]".bright_cyan(),
        entity_count.to_formatted_string(&Locale::en).bright_yellow(),
        variable_count.to_formatted_string(&Locale::en).bright_yellow(),
        value_count.to_formatted_string(&Locale::en).bright_yellow(),
    )
}

fn format_new_best(v: &EventVisitor) -> String {
    let step = v.step.unwrap_or(0);
    let score = v.score.as_deref().unwrap_or("N/A");

    format!(
        "    {} Step {:>7} | {}",
        "->".bright_blue(),
        step.to_formatted_string(&Locale::en).white(),
        format_score(score)
    )
}

fn format_solving_ended(v: &EventVisitor) -> String {
    let final_score = v.final_score.as_deref().unwrap_or("N/A");
    let duration = v.duration_ms.map(format_duration_ms).unwrap_or_else(|| "?".to_string());
    format!(
        "{} {} {} Solving ended after {}: best score ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Solver]".bright_cyan(),
        duration.yellow(),
        format_score(final_score)
    )
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| format!("{:5}.{:03}", d.as_secs() % 100_000, d.subsec_millis()))
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{ms}ms")
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        format!("{}m {}s", ms / 60_000, (ms % 60_000) / 1000)
    }
}

/// Colors a `StrictHardSoftScore`'s `Display` form (`"0strict/-2hard/5soft"`)
/// level by level: red for a negative level, green for positive, white for
/// zero.
fn format_score(score: &str) -> String {
    let parts: Vec<&str> = score.split('/').collect();
    if parts.len() != 3 {
        return score.white().to_string();
    }
    let colored: Vec<String> = parts
        .iter()
        .map(|part| {
            let numeric: i64 = part.trim_end_matches(|c: char| c.is_alphabetic()).parse().unwrap_or(0);
            if numeric < 0 {
                part.bright_red().to_string()
            } else if numeric > 0 {
                part.bright_green().to_string()
            } else {
                part.white().to_string()
            }
        })
        .collect();
    colored.join("/")
}
