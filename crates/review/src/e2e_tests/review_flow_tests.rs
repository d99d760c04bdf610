//! Full review flows: config, HTTP adapter, and services together.

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use tradeassoc_domain::{ApprovalStatus, RecordId, ReviewPhase};

use super::{CannedResponse, FakeBackend};
use crate::application::ReviewError;
use crate::infrastructure::config::ReviewConfig;
use crate::infrastructure::http_client::HttpReviewApi;
use crate::infrastructure::session::CredentialStore;
use crate::infrastructure::testing::fixtures::bill_list_payload;
use crate::ReviewApp;

fn app_for(backend: &FakeBackend) -> ReviewApp {
    let base_url = backend.base_url();
    let config = ReviewConfig::from_lookup(move |key| match key {
        "TRADEASSOC_API_URL" => Some(base_url.clone()),
        "TRADEASSOC_API_TOKEN" => Some("e2e-token".to_string()),
        "TRADEASSOC_USER_ID" => Some("secretary".to_string()),
        _ => None,
    })
    .unwrap();
    ReviewApp::from_config(&config)
}

#[tokio::test]
async fn bill_approval_round_trip() {
    let backend = FakeBackend::start().await;
    backend
        .respond_to_list(CannedResponse::json(StatusCode::OK, bill_list_payload()))
        .await;
    let app = app_for(&backend);

    app.bill.load(None).await.unwrap();
    let (_, changes) = app.bill.select(&RecordId::numeric(42)).await.unwrap();
    assert_eq!(changes[0].description, "Paid Amount changed to ₹4500");

    app.bill.approve(&RecordId::numeric(42)).await.unwrap();

    let posts = backend.recorded_posts().await;
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].path, "/api/billing/approve-changes");
    assert_eq!(posts[0].authorization.as_deref(), Some("Bearer e2e-token"));
    assert_eq!(posts[0].body, Some(json!({ "id": 42, "action": "APPROVED" })));

    let state = app.bill.state().await;
    assert!(state.get(&RecordId::numeric(42)).is_none());
    assert!(state.selected().is_none());
}

#[tokio::test]
async fn plain_text_approval_response_still_resolves_request() {
    let backend = FakeBackend::start().await;
    backend
        .respond_to_list(CannedResponse::json(StatusCode::OK, bill_list_payload()))
        .await;
    backend
        .respond_to_decision(CannedResponse::text(StatusCode::OK, "Changes approved"))
        .await;
    let app = app_for(&backend);

    app.bill.load(None).await.unwrap();
    app.bill.approve(&RecordId::numeric(42)).await.unwrap();

    assert_eq!(backend.recorded_posts().await.len(), 1);
    let state = app.bill.state().await;
    assert!(state.get(&RecordId::numeric(42)).is_none());
    assert!(state.decision_error(&RecordId::numeric(42)).is_none());
}

#[tokio::test]
async fn membership_decline_failure_keeps_request_pending() {
    let backend = FakeBackend::start().await;
    backend
        .respond_to_list(CannedResponse::json(
            StatusCode::OK,
            json!([{
                "id": 7,
                "membershipId": "M-21",
                "approvalStatus": "PENDING",
                "updatedData": { "firmName": "Shree Metals" }
            }]),
        ))
        .await;
    backend
        .respond_to_decision(CannedResponse::json(
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({ "message": "Membership is locked for renewal" }),
        ))
        .await;
    let app = app_for(&backend);
    let id = RecordId::numeric(7);

    app.membership.load(None).await.unwrap();
    app.membership.request_decline_reason(&id).await.unwrap();
    let err = app
        .membership
        .submit_decline(&id, " Incomplete KYC ")
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Membership is locked for renewal");

    let posts = backend.recorded_posts().await;
    assert_eq!(
        posts[0].body,
        Some(json!({ "membershipId": "M-21", "action": "DECLINED", "note": "Incomplete KYC" }))
    );

    let state = app.membership.state().await;
    assert_eq!(state.phase(&id), Some(ReviewPhase::Pending));
    assert_eq!(
        state.decline_draft().and_then(|d| d.error.as_deref()),
        Some("Membership is locked for renewal")
    );
}

#[tokio::test]
async fn invoice_history_keeps_decided_requests() {
    let backend = FakeBackend::start().await;
    backend
        .respond_to_list(CannedResponse::json(
            StatusCode::OK,
            json!({ "data": [
                { "id": 42, "invoiceId": 900, "status": "PENDING", "changes": { "gstRate": 18 } },
                { "id": 43, "invoiceId": 901, "status": "APPROVED", "changes": {} }
            ]}),
        ))
        .await;
    let app = app_for(&backend);

    app.invoice.load(None).await.unwrap();
    app.invoice
        .submit_decline(&RecordId::numeric(42), "Rate not applicable")
        .await
        .unwrap();

    let state = app.invoice.state().await;
    let request = state.get(&RecordId::numeric(42)).unwrap();
    assert_eq!(request.approval_status, ApprovalStatus::Declined);
    assert_eq!(request.note.as_deref(), Some("Rate not applicable"));
    assert_eq!(request.decided_by.as_deref(), Some("secretary"));
    assert_eq!(state.requests().len(), 2);
}

#[tokio::test]
async fn signed_out_session_never_reaches_backend() {
    let backend = FakeBackend::start().await;
    let config = ReviewConfig::from_lookup(|_| None).unwrap();
    let app = ReviewApp::with_ports(
        &config,
        Arc::new(HttpReviewApi::new(&backend.base_url(), None)),
        Arc::new(CredentialStore::new()),
    );

    assert_eq!(app.bill.load(None).await.unwrap_err(), ReviewError::AuthRequired);
    assert!(backend.recorded().await.is_empty());
}
