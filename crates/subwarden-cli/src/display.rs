//! Terminal rendering for submissions and the admin dashboard.

use subwarden_core::StoredApplication;
use subwarden_intake::{Dashboard, Origin, Submission};

const MAX_LIST_ITEMS: usize = 5;
const MOTIVATION_PREVIEW_CHARS: usize = 120;

pub fn print_submission(submission: &Submission) {
    println!("{}", submission.notice());
    println!("  {:<18} {}", "id", submission.id);
    println!("  {:<18} {}", "name", submission.stored.record.name());
    if !submission.backup_saved {
        println!("  {:<18} not written", "local backup");
    }
}

pub fn print_dashboard(dashboard: &Dashboard) {
    let summary = dashboard.summary();
    println!(
        "=== Applications: {} total ({} record store, {} local) ===",
        summary.total, summary.remote, summary.local
    );
    if let Some(err) = &dashboard.remote_error {
        println!("  record store unavailable: {err}");
    }
    println!();
    for (origin, entry) in dashboard.rows() {
        print_card(origin, entry);
    }
}

fn print_card(origin: Origin, entry: &StoredApplication) {
    let record = &entry.record;
    let origin = match origin {
        Origin::RecordStore => "record store",
        Origin::LocalStore => "local store",
    };
    println!("--- {} [{}] ---", record.name(), origin);
    println!("  {:<18} {}", "id", entry.id);
    println!("  {:<18} {}", "email", record.email());
    print_optional("student number", record.student_number());
    print_optional("phone", record.phone());
    println!("  {:<18} {}", "position", record.position_applied_for());
    print_list("leadership", record.leadership());
    print_list("education", record.education());
    println!("  {:<18} {}", "motivation", preview(record.why_interested()));
    println!("  {:<18} {}", "cv", record.file_name());
    println!(
        "  {:<18} {}",
        "submitted",
        entry.submitted_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!();
}

fn print_optional(label: &str, value: Option<&str>) {
    if let Some(value) = value {
        println!("  {label:<18} {value}");
    }
}

fn print_list(label: &str, items: &[String]) {
    if items.is_empty() {
        println!("  {label:<18} -");
        return;
    }
    let shown = items.len().min(MAX_LIST_ITEMS);
    let mut line = items[..shown].join("; ");
    if items.len() > shown {
        line.push_str(&format!(" (+{} more)", items.len() - shown));
    }
    println!("  {label:<18} {line}");
}

fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(MOTIVATION_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
