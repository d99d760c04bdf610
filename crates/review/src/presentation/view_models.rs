//! View models derived from the review session.

use serde::Serialize;
use tradeassoc_domain::common::CALENDAR_DATE_FORMAT;
use tradeassoc_domain::{
    extract_changes, ApprovalStatus, ChangeDescriptor, ChangeRequest, DomainError, DomainProfile,
    RecordId, ReviewPhase,
};

use crate::state::{DeclineDraft, ReviewSession};

/// Filter choices offered above a history list; `None` shows everything.
pub const STATUS_FILTERS: [Option<ApprovalStatus>; 4] = [
    None,
    Some(ApprovalStatus::Pending),
    Some(ApprovalStatus::Approved),
    Some(ApprovalStatus::Declined),
];

pub fn status_label(status: ApprovalStatus) -> &'static str {
    match status {
        ApprovalStatus::Pending => "Pending",
        ApprovalStatus::Approved => "Approved",
        ApprovalStatus::Declined => "Declined",
    }
}

/// Parses a filter as typed by a user; `all` clears the filter.
pub fn parse_status_filter(raw: &str) -> Result<Option<ApprovalStatus>, DomainError> {
    if raw.trim().eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    raw.parse().map(Some)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListRow {
    pub id: String,
    pub subject: String,
    pub status: ApprovalStatus,
    pub proposed_by: String,
    pub proposed_at: String,
    pub change_count: usize,
    /// First change description, or a placeholder when nothing is reportable
    pub summary: String,
    pub deciding: bool,
    pub actions_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub id: String,
    pub subject: String,
    pub status: ApprovalStatus,
    pub proposed_by: String,
    pub proposed_at: String,
    pub changes: Vec<ChangeDescriptor>,
    pub note: Option<String>,
    pub decided_by: Option<String>,
    /// Last failed decision on this request, until the next action clears it
    pub error: Option<String>,
    pub deciding: bool,
    pub actions_enabled: bool,
    pub decline_note: Option<String>,
    pub decline_error: Option<String>,
}

pub fn list_rows(session: &ReviewSession, profile: &DomainProfile) -> Vec<ListRow> {
    session
        .visible_requests()
        .map(|request| {
            let changes = extract_changes(profile, &request.proposed_patch);
            let phase = phase_of(session, &request.id);
            ListRow {
                id: request.id.to_string(),
                subject: request.subject_id.to_string(),
                status: request.approval_status,
                proposed_by: proposed_by(request),
                proposed_at: proposed_at(request),
                change_count: changes.len(),
                summary: changes
                    .first()
                    .map(|c| c.description.clone())
                    .unwrap_or_else(|| "No reportable changes".to_string()),
                deciding: phase.is_deciding(),
                actions_enabled: phase.accepts_decision(),
            }
        })
        .collect()
}

pub fn detail_view(
    session: &ReviewSession,
    profile: &DomainProfile,
    id: &RecordId,
) -> Option<DetailView> {
    let request = session.get(id)?;
    let phase = phase_of(session, id);
    let draft: Option<&DeclineDraft> = session
        .decline_draft()
        .filter(|draft| &draft.request_id == id);

    Some(DetailView {
        id: request.id.to_string(),
        subject: request.subject_id.to_string(),
        status: request.approval_status,
        proposed_by: proposed_by(request),
        proposed_at: proposed_at(request),
        changes: extract_changes(profile, &request.proposed_patch),
        note: request.note.clone(),
        decided_by: request.decided_by.clone(),
        error: session.decision_error(id).map(|e| e.user_message()),
        deciding: phase.is_deciding(),
        actions_enabled: phase.accepts_decision(),
        decline_note: draft.map(|d| d.note.clone()),
        decline_error: draft.and_then(|d| d.error.clone()),
    })
}

fn phase_of(session: &ReviewSession, id: &RecordId) -> ReviewPhase {
    session.phase(id).unwrap_or_default()
}

fn proposed_by(request: &ChangeRequest) -> String {
    request
        .modified_by
        .clone()
        .unwrap_or_else(|| "Unknown".to_string())
}

fn proposed_at(request: &ChangeRequest) -> String {
    request
        .modified_at
        .map(|at| at.format(&format!("{} %H:%M", CALENDAR_DATE_FORMAT)).to_string())
        .unwrap_or_default()
}
