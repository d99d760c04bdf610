//! Plain-text rendering for terminal shells.

use std::fmt::Write;

use tradeassoc_domain::ReviewDomain;

use crate::presentation::view_models::{status_label, DetailView, ListRow};
use crate::state::{Notice, NoticeLevel};

pub fn render_list(domain: ReviewDomain, rows: &[ListRow]) -> String {
    if rows.is_empty() {
        return format!("No {} change requests.\n", domain);
    }

    let mut out = String::new();
    for row in rows {
        let marker = if row.deciding { " (deciding)" } else { "" };
        let _ = writeln!(
            out,
            "#{:<6} {:<9} {:<10} {} change(s) by {} {}{}",
            row.id,
            status_label(row.status),
            row.subject,
            row.change_count,
            row.proposed_by,
            row.proposed_at,
            marker
        );
        let _ = writeln!(out, "        {}", row.summary);
    }
    out
}

pub fn render_detail(view: &DetailView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Change request #{} for {} ({})",
        view.id,
        view.subject,
        status_label(view.status)
    );
    let _ = writeln!(out, "Proposed by {} {}", view.proposed_by, view.proposed_at);

    if view.changes.is_empty() {
        let _ = writeln!(out, "  No reportable changes");
    }
    for change in &view.changes {
        let _ = writeln!(out, "  - {}", change.description);
    }

    if let Some(note) = &view.note {
        let _ = writeln!(out, "Note: {}", note);
    }
    if let Some(decided_by) = &view.decided_by {
        let _ = writeln!(out, "Decided by {}", decided_by);
    }
    if let Some(error) = &view.error {
        let _ = writeln!(out, "Error: {}", error);
    }
    out
}

pub fn render_notice(notice: &Notice) -> String {
    let prefix = match notice.level {
        NoticeLevel::Success => "ok",
        NoticeLevel::Error => "error",
    };
    if notice.retryable {
        format!("[{}] {} (retry to try again)", prefix, notice.message)
    } else {
        format!("[{}] {}", prefix, notice.message)
    }
}
