//! Display utilities for the CLI

use agentpulse_core::phrases;
use agentpulse_types::{ActivityRecord, Language, MetricsSnapshot, RecordKind};
use colored::*;

/// Print a section header
pub fn section(title: &str) {
    println!();
    println!("{}", "━".repeat(60).bright_black());
    println!(" {}", title.bright_white().bold());
    println!("{}", "━".repeat(60).bright_black());
}

/// Print a success message
pub fn success(message: &str) {
    println!("  {} {}", "✓".bright_green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    println!("  {} {}", "✗".bright_red(), message.bright_red());
}

/// Print an info message
pub fn info(message: &str) {
    println!("  {} {}", "→".bright_blue(), message);
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("      {}: {}", key, value.bright_cyan());
}

/// Print one stream record
pub fn record(record: &ActivityRecord) {
    let label = format!("[{}]", record.kind().label());
    let label = match record.kind() {
        RecordKind::Thought => label.magenta(),
        RecordKind::Action(_) => label.cyan(),
        RecordKind::User => label.yellow(),
        RecordKind::Agent => label.green(),
        RecordKind::Error => label.red(),
    };
    let time = record.timestamp().format("%H:%M:%S").to_string();
    println!("  {} {} {}", time.bright_black(), label, record.content());
}

/// Print the stats panel
pub fn metrics(metrics: &MetricsSnapshot, language: Language) {
    let labels = &phrases(language).labels;
    kv(labels.earned, &format!("${:.2}", metrics.earned));
    kv(labels.spent, &format!("${:.2}", metrics.spent));
    kv(labels.nfts_owned, &metrics.nfts_owned.to_string());
    kv(labels.tokens_owned, &metrics.tokens_owned.to_string());
    kv(labels.transactions, &metrics.transactions.to_string());
    kv(labels.thoughts, &metrics.thoughts.to_string());
    kv(labels.wallet_balance, &format!("${:.2}", metrics.wallet_balance));
}
