//! Review Service - load, inspect, approve, and decline change requests
//! for one review domain.
//!
//! The session lock is only ever held between awaits: every network call
//! happens with the lock released, and the result is applied under a fresh
//! lock afterwards. Concurrent decisions on the same request are rejected by
//! the session's in-flight marker, not by holding the lock.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tradeassoc_domain::{
    extract_changes, ApprovalStatus, ChangeDescriptor, ChangeRequest, Decision, DeclineNote,
    DomainProfile, RecordId, ResolutionPolicy, ReviewDomain, Verdict,
};
use tradeassoc_shared::{parse_change_requests, DecisionBody, ReviewEndpoints};

use crate::application::ReviewError;
use crate::ports::outbound::{AccessToken, ReviewApiPort, SessionPort};
use crate::state::{DeclineDraft, Notice, ReviewSession};

/// Result of a successful load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOutcome {
    pub loaded: usize,
    pub filter: Option<ApprovalStatus>,
}

/// Result of a confirmed decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionOutcome {
    pub request_id: RecordId,
    pub verdict: Verdict,
    /// True when the request left the held list (queue resolution)
    pub removed: bool,
}

pub struct ReviewService {
    profile: DomainProfile,
    endpoints: ReviewEndpoints,
    api: Arc<dyn ReviewApiPort>,
    session: Arc<dyn SessionPort>,
    state: Mutex<ReviewSession>,
}

impl ReviewService {
    pub fn new(
        profile: DomainProfile,
        endpoints: ReviewEndpoints,
        api: Arc<dyn ReviewApiPort>,
        session: Arc<dyn SessionPort>,
    ) -> Self {
        let state = Mutex::new(ReviewSession::new(profile.resolution()));
        Self {
            profile,
            endpoints,
            api,
            session,
            state,
        }
    }

    pub fn domain(&self) -> ReviewDomain {
        self.profile.domain()
    }

    pub fn profile(&self) -> &DomainProfile {
        &self.profile
    }

    pub fn endpoints(&self) -> &ReviewEndpoints {
        &self.endpoints
    }

    /// Locks the session state for reading by the presentation layer.
    ///
    /// Drop the guard before calling any other async method on the service.
    pub async fn state(&self) -> MutexGuard<'_, ReviewSession> {
        self.state.lock().await
    }

    fn token(&self) -> Result<AccessToken, ReviewError> {
        self.session.access_token().ok_or(ReviewError::AuthRequired)
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Fetches the list and replaces the held requests.
    ///
    /// On failure the previous list stays in place and the error is kept for
    /// display.
    pub async fn load(&self, filter: Option<ApprovalStatus>) -> Result<ListOutcome, ReviewError> {
        let domain = self.domain();
        let result = self.fetch(filter).await;

        let mut state = self.state.lock().await;
        match result {
            Ok(requests) => {
                let loaded = requests.len();
                state.replace_requests(requests, filter);
                tracing::debug!(%domain, loaded, ?filter, "Change requests loaded");
                Ok(ListOutcome { loaded, filter })
            }
            Err(e) => {
                tracing::warn!(%domain, error = %e, "Failed to load change requests");
                state.fail_load(e.clone());
                Err(e)
            }
        }
    }

    /// Reloads with the filter of the last successful load.
    pub async fn reload(&self) -> Result<ListOutcome, ReviewError> {
        let filter = self.state.lock().await.filter();
        self.load(filter).await
    }

    async fn fetch(
        &self,
        filter: Option<ApprovalStatus>,
    ) -> Result<Vec<ChangeRequest>, ReviewError> {
        let token = self.token()?;
        let path = self.endpoints.list_path_with_filter(filter);
        let payload = self
            .api
            .get_json(&path, &token)
            .await
            .map_err(|e| ReviewError::from_api(e, &self.profile.messages().load))?;
        parse_change_requests(payload).map_err(|e| ReviewError::InvalidResponse(e.to_string()))
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Selects a request and returns it with its derived changes.
    pub async fn select(
        &self,
        id: &RecordId,
    ) -> Result<(ChangeRequest, Vec<ChangeDescriptor>), ReviewError> {
        let mut state = self.state.lock().await;
        let request = state.select(id)?.clone();
        let changes = self.changes_for(&request);
        Ok((request, changes))
    }

    pub async fn clear_selection(&self) {
        self.state.lock().await.clear_selection();
    }

    /// The selected request and its derived changes, if any.
    pub async fn selected_changes(&self) -> Option<(ChangeRequest, Vec<ChangeDescriptor>)> {
        let state = self.state.lock().await;
        state.selected().map(|request| {
            let changes = self.changes_for(request);
            (request.clone(), changes)
        })
    }

    /// Derives the change descriptors of a request. Never fails; malformed
    /// fields are simply not reported.
    pub fn changes_for(&self, request: &ChangeRequest) -> Vec<ChangeDescriptor> {
        extract_changes(&self.profile, &request.proposed_patch)
    }

    // =========================================================================
    // Decisions
    // =========================================================================

    pub async fn approve(&self, id: &RecordId) -> Result<DecisionOutcome, ReviewError> {
        self.decide(id, Decision::Approve).await
    }

    /// Opens the decline dialog. No network call is made.
    pub async fn request_decline_reason(&self, id: &RecordId) -> Result<DeclineDraft, ReviewError> {
        let mut state = self.state.lock().await;
        state.open_decline_draft(id).cloned()
    }

    /// Updates the text typed into the decline dialog.
    pub async fn set_decline_reason(&self, note: &str) {
        self.state.lock().await.set_decline_note(note);
    }

    pub async fn cancel_decline(&self) {
        self.state.lock().await.close_decline_draft();
    }

    /// Declines with a justification.
    ///
    /// A blank note is rejected before anything is sent; the dialog stays
    /// open showing the validation message.
    pub async fn submit_decline(
        &self,
        id: &RecordId,
        note: &str,
    ) -> Result<DecisionOutcome, ReviewError> {
        let note_value = match DeclineNote::new(note) {
            Ok(note) => note,
            Err(e) => {
                let error = ReviewError::from(e);
                self.state
                    .lock()
                    .await
                    .reject_decline_note(id, note, error.user_message());
                return Err(error);
            }
        };
        self.decide(id, Decision::Decline(note_value)).await
    }

    async fn decide(
        &self,
        id: &RecordId,
        decision: Decision,
    ) -> Result<DecisionOutcome, ReviewError> {
        let domain = self.domain();
        let verdict = decision.verdict();

        let token = match self.token() {
            Ok(token) => token,
            Err(e) => {
                self.state.lock().await.push_notice(Notice::error(&e));
                return Err(e);
            }
        };

        let request = self.state.lock().await.begin_decision(id)?;
        let body = DecisionBody::new(self.endpoints.identifier.target_for(&request), &decision);

        tracing::debug!(%domain, request_id = %id, %verdict, "Submitting decision");
        let result = match serde_json::to_value(&body) {
            Ok(body) => self
                .api
                .post_json(&self.endpoints.decision_path, &body, &token)
                .await
                .map_err(|e| ReviewError::from_api(e, self.fallback_message(verdict))),
            Err(e) => Err(ReviewError::InvalidResponse(e.to_string())),
        };

        let mut state = self.state.lock().await;
        match result {
            Ok(_) => {
                let decided_by = self.session.acting_user().map(|user| user.label().to_string());
                state.complete_decision(id, &decision, decided_by)?;
                state.push_notice(Notice::success(match verdict {
                    Verdict::Approved => "Changes approved",
                    Verdict::Declined => "Changes declined",
                }));
                tracing::info!(%domain, request_id = %id, %verdict, "Decision recorded");
                Ok(DecisionOutcome {
                    request_id: id.clone(),
                    verdict,
                    removed: self.profile.resolution() == ResolutionPolicy::Queue,
                })
            }
            Err(e) => {
                tracing::warn!(%domain, request_id = %id, %verdict, error = %e, "Decision failed");
                state.fail_decision(id, e.clone());
                Err(e)
            }
        }
    }

    fn fallback_message(&self, verdict: Verdict) -> &str {
        match verdict {
            Verdict::Approved => &self.profile.messages().approve,
            Verdict::Declined => &self.profile.messages().decline,
        }
    }

    // =========================================================================
    // Errors and notices
    // =========================================================================

    pub async fn clear_errors(&self) {
        self.state.lock().await.clear_errors();
    }

    pub async fn take_notices(&self) -> Vec<Notice> {
        self.state.lock().await.take_notices()
    }
}
