//! Human-readable output: one block per swap, one summary per wallet.

use crate::api::{SwapResult, UserStats};
use chrono::{DateTime, Local, TimeZone};
use colored::*;
use serde_json::Value;
use tracing::info;

/// Totals for one wallet's swap loop. Only exists when at least one swap
/// completed.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub swaps_completed: usize,
    pub points_earned: f64,
    /// Snapshot from the last swap
    pub final_user: UserStats,
}

impl RunSummary {
    pub fn from_results(results: &[SwapResult]) -> Option<Self> {
        let last = results.last()?;
        Some(Self {
            swaps_completed: results.len(),
            points_earned: results.iter().map(|r| r.points_earned).sum(),
            final_user: last.user.clone(),
        })
    }
}

pub fn display_transaction(result: &SwapResult) {
    let tx = &result.transaction;
    let user = &result.user;
    let last_claim = user
        .last_faucet_claim
        .as_ref()
        .and_then(format_timestamp)
        .unwrap_or_else(|| "Never".to_string());

    info!(target: "task_result", "=== Transaction Details ===");
    info!(target: "task_result", "Transaction ID: {}", tx.id);
    info!(target: "task_result", "Type: {}", tx.kind);
    info!(
        target: "task_result",
        "Amount: {} {} to {}",
        tx.amount, tx.token_from, tx.token_to
    );
    info!(
        target: "task_result",
        "Points Earned: {}",
        result.points_earned.to_string().yellow()
    );
    info!(target: "task_result", "Status: {}", color_status(&tx.status));
    info!(
        target: "task_result",
        "Timestamp: {}",
        tx.timestamp
            .as_ref()
            .and_then(format_timestamp)
            .unwrap_or_else(|| "unknown".to_string())
    );
    info!(target: "task_result", "TX Hash: {}", tx.tx_hash);
    info!(target: "task_result", "=== User Stats ===");
    info!(target: "task_result", "User ID: {}", user.id);
    info!(target: "task_result", "Address: {}", user.address);
    info!(target: "task_result", "Total Points: {}", user.total_points);
    info!(target: "task_result", "Daily Points: {}", user.daily_points);
    info!(target: "task_result", "Last Faucet Claim: {}", last_claim);
}

pub fn display_summary(summary: &RunSummary) {
    info!(target: "task_result", "====== Summary ======");
    info!(
        target: "task_result",
        "Total Swaps Completed: {}",
        summary.swaps_completed.to_string().green().bold()
    );
    info!(target: "task_result", "Total Points Earned: {}", summary.points_earned);
    info!(
        target: "task_result",
        "Final Total Points: {}",
        summary.final_user.total_points
    );
    info!(
        target: "task_result",
        "Final Daily Points: {}",
        summary.final_user.daily_points
    );
}

fn color_status(status: &str) -> ColoredString {
    match status.to_ascii_lowercase().as_str() {
        "completed" | "success" => status.green().bold(),
        "failed" | "error" => status.red().bold(),
        _ => status.normal(),
    }
}

/// Renders an RFC 3339 string or epoch milliseconds in local time.
pub fn format_timestamp(value: &Value) -> Option<String> {
    let parsed: DateTime<Local> = match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()?
            .with_timezone(&Local),
        Value::Number(n) => Local.timestamp_millis_opt(n.as_i64()?).single()?,
        _ => return None,
    };
    Some(parsed.format("%Y-%m-%d %H:%M:%S").to_string())
}
