//! Review session state: the held list, selection, in-flight decisions,
//! the decline dialog, and pending notices.

use std::collections::{HashMap, HashSet};

use tradeassoc_domain::{
    ApprovalStatus, ChangeRequest, Decision, RecordId, ResolutionPolicy, ReviewPhase,
};

use crate::application::ReviewError;
use crate::state::notices::Notice;

/// The open decline dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclineDraft {
    pub request_id: RecordId,
    pub note: String,
    /// Validation or submit error shown inside the dialog
    pub error: Option<String>,
}

impl DeclineDraft {
    fn new(request_id: RecordId) -> Self {
        Self {
            request_id,
            note: String::new(),
            error: None,
        }
    }
}

#[derive(Debug)]
pub struct ReviewSession {
    resolution: ResolutionPolicy,
    requests: Vec<ChangeRequest>,
    filter: Option<ApprovalStatus>,
    in_flight: HashSet<RecordId>,
    selected: Option<RecordId>,
    decline_draft: Option<DeclineDraft>,
    decision_errors: HashMap<RecordId, ReviewError>,
    load_error: Option<ReviewError>,
    notices: Vec<Notice>,
    loaded: bool,
}

impl ReviewSession {
    pub fn new(resolution: ResolutionPolicy) -> Self {
        Self {
            resolution,
            requests: Vec::new(),
            filter: None,
            in_flight: HashSet::new(),
            selected: None,
            decline_draft: None,
            decision_errors: HashMap::new(),
            load_error: None,
            notices: Vec::new(),
            loaded: false,
        }
    }

    pub fn resolution(&self) -> ResolutionPolicy {
        self.resolution
    }

    /// Whether a load has ever succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn filter(&self) -> Option<ApprovalStatus> {
        self.filter
    }

    // =========================================================================
    // Held list
    // =========================================================================

    /// Replaces the held list after a successful load.
    ///
    /// Selection, the decline dialog, in-flight markers, and decision errors
    /// survive only for requests still present.
    pub fn replace_requests(
        &mut self,
        requests: Vec<ChangeRequest>,
        filter: Option<ApprovalStatus>,
    ) {
        let present: HashSet<RecordId> = requests.iter().map(|r| r.id.clone()).collect();

        self.requests = requests;
        self.filter = filter;
        self.loaded = true;
        self.load_error = None;
        self.in_flight.retain(|id| present.contains(id));
        self.decision_errors.retain(|id, _| present.contains(id));
        if self.selected.as_ref().is_some_and(|id| !present.contains(id)) {
            self.selected = None;
        }
        if self
            .decline_draft
            .as_ref()
            .is_some_and(|draft| !present.contains(&draft.request_id))
        {
            self.decline_draft = None;
        }
    }

    /// Every held request, in backend order.
    pub fn requests(&self) -> &[ChangeRequest] {
        &self.requests
    }

    /// Held requests matching the active status filter.
    ///
    /// A history list keeps decided requests, so a request approved under a
    /// `PENDING` filter drops out of view here while staying held.
    pub fn visible_requests(&self) -> impl Iterator<Item = &ChangeRequest> {
        let filter = self.filter;
        self.requests
            .iter()
            .filter(move |r| filter.map_or(true, |status| r.approval_status == status))
    }

    pub fn get(&self, id: &RecordId) -> Option<&ChangeRequest> {
        self.requests.iter().find(|r| &r.id == id)
    }

    /// Looks up a request by the id as typed by a user.
    pub fn find_by_raw_id(&self, raw: &str) -> Option<&ChangeRequest> {
        self.requests.iter().find(|r| r.id.matches(raw))
    }

    pub fn phase(&self, id: &RecordId) -> Option<ReviewPhase> {
        self.get(id).map(|request| self.phase_of(request))
    }

    fn phase_of(&self, request: &ChangeRequest) -> ReviewPhase {
        if self.in_flight.contains(&request.id) {
            ReviewPhase::Deciding
        } else {
            ReviewPhase::from_status(request.approval_status)
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn select(&mut self, id: &RecordId) -> Result<&ChangeRequest, ReviewError> {
        let index = self
            .requests
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| ReviewError::NotFound(id.clone()))?;
        self.selected = Some(id.clone());
        Ok(&self.requests[index])
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&ChangeRequest> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    // =========================================================================
    // Decisions
    // =========================================================================

    /// Marks a decision as in flight and returns the request to submit.
    pub fn begin_decision(&mut self, id: &RecordId) -> Result<ChangeRequest, ReviewError> {
        let request = self
            .get(id)
            .ok_or_else(|| ReviewError::NotFound(id.clone()))?;
        let phase = self.phase_of(request);
        if phase.begin().is_err() {
            return Err(if phase.is_deciding() {
                ReviewError::DecisionInFlight(id.clone())
            } else {
                ReviewError::AlreadyDecided(id.clone())
            });
        }

        let request = request.clone();
        self.in_flight.insert(id.clone());
        self.decision_errors.remove(id);
        Ok(request)
    }

    /// The backend confirmed a decision.
    ///
    /// A request that disappeared from the list meanwhile (a reload raced the
    /// call) has nothing left to update.
    pub fn complete_decision(
        &mut self,
        id: &RecordId,
        decision: &Decision,
        decided_by: Option<String>,
    ) -> Result<(), ReviewError> {
        self.in_flight.remove(id);
        match self.apply_decision(id, decision, decided_by) {
            Err(ReviewError::NotFound(_)) => Ok(()),
            other => other,
        }
    }

    /// The decision call failed; the request is reviewable again and the
    /// error stays on display until the next action on it.
    pub fn fail_decision(&mut self, id: &RecordId, error: ReviewError) {
        self.in_flight.remove(id);
        if let Some(draft) = self
            .decline_draft
            .as_mut()
            .filter(|draft| &draft.request_id == id)
        {
            draft.error = Some(error.user_message());
        }
        self.notices.push(Notice::error(&error));
        self.decision_errors.insert(id.clone(), error);
    }

    /// Applies a confirmed decision to the held list according to the
    /// resolution policy.
    pub fn apply_decision(
        &mut self,
        id: &RecordId,
        decision: &Decision,
        decided_by: Option<String>,
    ) -> Result<(), ReviewError> {
        match self.resolution {
            ResolutionPolicy::Queue => {
                let index = self
                    .requests
                    .iter()
                    .position(|r| &r.id == id)
                    .ok_or_else(|| ReviewError::NotFound(id.clone()))?;
                self.requests.remove(index);
                if self.selected.as_ref() == Some(id) {
                    self.selected = None;
                }
            }
            ResolutionPolicy::History => {
                let request = self
                    .requests
                    .iter_mut()
                    .find(|r| &r.id == id)
                    .ok_or_else(|| ReviewError::NotFound(id.clone()))?;
                request
                    .record_decision(decision, decided_by)
                    .map_err(|_| ReviewError::AlreadyDecided(id.clone()))?;
            }
        }

        self.decision_errors.remove(id);
        if self
            .decline_draft
            .as_ref()
            .is_some_and(|draft| &draft.request_id == id)
        {
            self.decline_draft = None;
        }
        Ok(())
    }

    pub fn decision_error(&self, id: &RecordId) -> Option<&ReviewError> {
        self.decision_errors.get(id)
    }

    // =========================================================================
    // Decline dialog
    // =========================================================================

    /// Opens the decline dialog for a pending request. Reopening for the
    /// same request keeps what was typed.
    pub fn open_decline_draft(&mut self, id: &RecordId) -> Result<&DeclineDraft, ReviewError> {
        let request = self
            .get(id)
            .ok_or_else(|| ReviewError::NotFound(id.clone()))?;
        match self.phase_of(request) {
            ReviewPhase::Pending => {}
            ReviewPhase::Deciding => return Err(ReviewError::DecisionInFlight(id.clone())),
            ReviewPhase::Decided(_) => return Err(ReviewError::AlreadyDecided(id.clone())),
        }

        self.decision_errors.remove(id);
        let draft = match self.decline_draft.take() {
            Some(draft) if &draft.request_id == id => draft,
            _ => DeclineDraft::new(id.clone()),
        };
        let draft = self.decline_draft.insert(draft);
        Ok(&*draft)
    }

    pub fn set_decline_note(&mut self, note: &str) {
        if let Some(draft) = self.decline_draft.as_mut() {
            draft.note = note.to_string();
            draft.error = None;
        }
    }

    /// Keeps the dialog open for `id` with `message` shown in it.
    pub fn reject_decline_note(&mut self, id: &RecordId, note: &str, message: String) {
        let draft = match self.decline_draft.take() {
            Some(draft) if &draft.request_id == id => draft,
            _ => DeclineDraft::new(id.clone()),
        };
        self.decline_draft = Some(DeclineDraft {
            note: note.to_string(),
            error: Some(message),
            ..draft
        });
    }

    pub fn close_decline_draft(&mut self) {
        self.decline_draft = None;
    }

    pub fn decline_draft(&self) -> Option<&DeclineDraft> {
        self.decline_draft.as_ref()
    }

    // =========================================================================
    // Errors and notices
    // =========================================================================

    /// A load failed; the held list is left as it was.
    pub fn fail_load(&mut self, error: ReviewError) {
        self.notices.push(Notice::error(&error));
        self.load_error = Some(error);
    }

    pub fn load_error(&self) -> Option<&ReviewError> {
        self.load_error.as_ref()
    }

    /// Dismisses every displayed error.
    pub fn clear_errors(&mut self) {
        self.load_error = None;
        self.decision_errors.clear();
        if let Some(draft) = self.decline_draft.as_mut() {
            draft.error = None;
        }
    }

    pub fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
