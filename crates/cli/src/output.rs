//! Terminal output utilities
//!
//! Status lines are diagnostics and always go to stderr, so stdout stays
//! clean for machine-readable reports. Report sections (`header`, `field`)
//! go to stdout.

use owo_colors::OwoColorize;
use std::sync::atomic::{AtomicBool, Ordering};

static QUIET: AtomicBool = AtomicBool::new(false);

/// Suppress success, info and warning lines
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        if !is_quiet() {
            eprintln!("{} {}", "✓".green(), message);
        }
    }

    /// Print an error message; never suppressed
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        if !is_quiet() {
            eprintln!("{} {}", "⚠".yellow(), message);
        }
    }

    /// Print an info message
    pub fn info(message: &str) {
        if !is_quiet() {
            eprintln!("{} {}", "ℹ".blue(), message);
        }
    }

    /// Print a hint below an error
    pub fn hint(message: &str) {
        eprintln!("  {} {}", "→".dimmed(), message.dimmed());
    }

    /// Print a report header
    pub fn header(message: &str) {
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }

    /// Print a report subheader
    pub fn subheader(message: &str) {
        println!();
        println!("{}", message.bold().dimmed());
    }

    /// Print an aligned `label value` report row
    pub fn field(label: &str, value: &str, width: usize) {
        let padded = format!("{:<width$}", label, width = width);
        println!("  {} {}", padded.dimmed(), value);
    }
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs % 60.0;
        format!("{}m {:.0}s", mins, remaining_secs)
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}
