//! Human readable output

use colored::Colorize;
use serde_json::Value;

use crate::errors::FreightError;
use crate::models::deploy::DeployStatus;

/// Pretty JSON with a trailing newline
pub fn pretty_json(value: &Value) -> Result<String, FreightError> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}

const VALUE_WIDTH: usize = 25;

fn row(label: &str, value: &str) -> String {
    format!("{:<12} {}\n", label, value)
}

fn cell(value: &str) -> String {
    format!("{:<width$}", value, width = VALUE_WIDTH)
}

/// Padded status cell, colored when `color` is set.
/// Padding is applied before coloring so escape codes do not skew alignment.
pub fn status_cell(status: &str, color: bool) -> String {
    let padded = cell(status);
    if !color {
        return padded;
    }
    match status {
        "finished" => padded.green().to_string(),
        "failed" | "cancelled" => padded.red().to_string(),
        "in_progress" => padded.blue().to_string(),
        "pending" => padded.yellow().to_string(),
        _ => padded,
    }
}

/// Status block of a deploy
pub fn status_block(status: &DeployStatus, color: bool) -> String {
    let mut out = format!("[{}/{} #{}]\n", status.app, status.env, status.number);
    out.push_str(&row("Status:", &status_cell(&status.status, color)));
    out.push_str(&row("Created:", &cell(&status.date_created)));
    if let Some((started, finished)) = &status.timings {
        out.push_str(&row("Started:", &cell(started)));
        out.push_str(&row("Finished:", &cell(finished)));
    }
    out
}
