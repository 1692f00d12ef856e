//! Utility functions and helpers for the CLI

use colored::*;
use std::time::Duration;

/// Format duration in human-readable format
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let nanos = duration.subsec_nanos();

    if total_secs > 0 {
        format!("{}.{:03}s", total_secs, nanos / 1_000_000)
    } else if nanos >= 1_000_000 {
        format!("{:.1}ms", nanos as f64 / 1_000_000.0)
    } else if nanos >= 1_000 {
        format!("{:.1}μs", nanos as f64 / 1_000.0)
    } else {
        format!("{}ns", nanos)
    }
}

/// Print a styled subheader
pub fn print_subheader(title: &str) {
    println!();
    println!("{}", title.bold());
}

/// Print a success message with consistent styling
pub fn print_success(message: &str) {
    println!("{} {}", "Success:".green().bold(), message);
}

/// Print an error message with consistent styling
pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}
