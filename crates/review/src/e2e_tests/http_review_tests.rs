//! HTTP adapter behaviour against the fake backend.

use axum::http::StatusCode;
use serde_json::{json, Value};

use super::{CannedResponse, FakeBackend};
use crate::infrastructure::http_client::HttpReviewApi;
use crate::infrastructure::testing::fixtures::{bill_list_payload, token};
use crate::ports::outbound::{ApiError, ReviewApiPort};

#[tokio::test]
async fn get_sends_bearer_token_and_correlation_id() {
    let backend = FakeBackend::start().await;
    backend
        .respond_to_list(CannedResponse::json(StatusCode::OK, bill_list_payload()))
        .await;
    let api = HttpReviewApi::new(&backend.base_url(), None);

    let payload = api
        .get_json("/billing/pending-changes?status=PENDING", &token())
        .await
        .unwrap();
    assert_eq!(payload, bill_list_payload());

    let recorded = backend.recorded().await;
    assert_eq!(recorded.len(), 1);
    let request = &recorded[0];
    assert_eq!(request.path, "/api/billing/pending-changes");
    assert_eq!(request.query.as_deref(), Some("status=PENDING"));
    assert_eq!(request.authorization.as_deref(), Some("Bearer test-token"));
    assert_eq!(request.correlation_id.as_ref().map(String::len), Some(36));
}

#[tokio::test]
async fn post_sends_json_body() {
    let backend = FakeBackend::start().await;
    let api = HttpReviewApi::new(&backend.base_url(), None);

    let body = json!({ "id": 42, "action": "APPROVED" });
    api.post_json("/billing/approve-changes", &body, &token())
        .await
        .unwrap();

    let posts = backend.recorded_posts().await;
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].path, "/api/billing/approve-changes");
    assert_eq!(posts[0].body, Some(body));
}

#[tokio::test]
async fn rejected_credentials_are_unauthorized() {
    let backend = FakeBackend::start().await;
    let api = HttpReviewApi::new(&backend.base_url(), None);

    for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
        backend
            .respond_to_list(CannedResponse::json(status, json!({ "message": "Token expired" })))
            .await;
        let err = api.get_json("/billing/pending-changes", &token()).await.unwrap_err();
        assert_eq!(err, ApiError::Unauthorized);
    }
}

#[tokio::test]
async fn server_error_carries_body_message() {
    let backend = FakeBackend::start().await;
    let api = HttpReviewApi::new(&backend.base_url(), None);

    backend
        .respond_to_decision(CannedResponse::json(
            StatusCode::CONFLICT,
            json!({ "message": "Bill already settled" }),
        ))
        .await;
    let err = api
        .post_json("/billing/approve-changes", &json!({}), &token())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Server {
            status: 409,
            message: Some("Bill already settled".to_string())
        }
    );

    backend
        .respond_to_decision(CannedResponse::text(StatusCode::BAD_GATEWAY, "Upstream down"))
        .await;
    let err = api
        .post_json("/billing/approve-changes", &json!({}), &token())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Server {
            status: 502,
            message: Some("Upstream down".to_string())
        }
    );

    backend
        .respond_to_decision(CannedResponse::empty(StatusCode::INTERNAL_SERVER_ERROR))
        .await;
    let err = api
        .post_json("/billing/approve-changes", &json!({}), &token())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Server {
            status: 500,
            message: None
        }
    );
}

#[tokio::test]
async fn empty_success_body_is_null() {
    let backend = FakeBackend::start().await;
    backend
        .respond_to_decision(CannedResponse::empty(StatusCode::NO_CONTENT))
        .await;
    let api = HttpReviewApi::new(&backend.base_url(), None);

    let value = api
        .post_json("/invoice/change-requests/decision", &json!({}), &token())
        .await
        .unwrap();
    assert_eq!(value, Value::Null);
}

#[tokio::test]
async fn plain_text_decision_success_is_accepted() {
    let backend = FakeBackend::start().await;
    backend
        .respond_to_decision(CannedResponse::text(StatusCode::OK, "Changes approved"))
        .await;
    let api = HttpReviewApi::new(&backend.base_url(), None);

    let value = api
        .post_json("/billing/approve-changes", &json!({ "id": 42 }), &token())
        .await
        .unwrap();
    assert_eq!(value, Value::Null);
}

#[tokio::test]
async fn malformed_success_body_is_parse_error() {
    let backend = FakeBackend::start().await;
    backend
        .respond_to_list(CannedResponse::text(StatusCode::OK, "<html>maintenance</html>"))
        .await;
    let api = HttpReviewApi::new(&backend.base_url(), None);

    let err = api.get_json("/billing/pending-changes", &token()).await.unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)));
}

#[tokio::test]
async fn unreachable_backend_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = HttpReviewApi::new(&format!("http://{}/api", addr), None);
    let err = api.get_json("/billing/pending-changes", &token()).await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}
