use std::sync::Arc;

use serde_json::json;

use super::common::{
    applicant, fixture_today, recording_service, FailingClient, FailureKind, RecordingClient,
};
use crate::workflows::screening::client::DecisionError;
use crate::workflows::screening::domain::{ApplicantRecord, EvaluationResponse};
use crate::workflows::screening::outcome::OutcomeCategory;
use crate::workflows::screening::service::{ScreeningError, ScreeningService};

#[tokio::test]
async fn invalid_records_never_reach_the_decision_api() {
    let (service, client) = recording_service("approved");

    let result = service
        .evaluate_as_of(&ApplicantRecord::default(), fixture_today())
        .await;

    match result {
        Err(ScreeningError::Rejected(errors)) => assert_eq!(errors.len(), 9),
        other => panic!("expected validation rejection, got {other:?}"),
    }
    assert!(
        client.submissions().is_empty(),
        "rejected records must not be submitted"
    );
}

#[tokio::test]
async fn valid_records_submit_the_mapped_payload_once() {
    let (service, client) = recording_service("approved");

    service
        .evaluate_as_of(&applicant(), fixture_today())
        .await
        .expect("evaluation succeeds");

    let submissions = client.submissions();
    assert_eq!(submissions.len(), 1);

    let payload = &submissions[0];
    assert_eq!(
        payload.get("document_ssn").map(String::as_str),
        Some("123456789")
    );
    assert_eq!(
        payload.get("email_address").map(String::as_str),
        Some("avery.quinn@example.com")
    );
    assert_eq!(payload.get("address_state").map(String::as_str), Some("IA"));
    assert_eq!(
        payload.get("address_country_code").map(String::as_str),
        Some("US")
    );
    assert!(payload.get("ssn").is_none());
}

#[tokio::test]
async fn receipt_carries_decision_token_and_summary() {
    let (service, _) = recording_service("approved");

    let receipt = service
        .evaluate_as_of(&applicant(), fixture_today())
        .await
        .expect("evaluation succeeds");

    assert_eq!(receipt.decision.category, OutcomeCategory::Approved);
    assert_eq!(receipt.decision.message, "Congratulations! You are approved.");
    assert_eq!(receipt.evaluation_token.as_deref(), Some("EVL-TEST-0001"));
    assert_eq!(receipt.summary.outcome.as_deref(), Some("approved"));
    assert_eq!(receipt.summary.score, Some(json!(0.93)));
}

#[tokio::test]
async fn review_synonyms_normalize_in_the_receipt() {
    let (service, _) = recording_service("manual_review");

    let receipt = service
        .evaluate_as_of(&applicant(), fixture_today())
        .await
        .expect("evaluation succeeds");

    assert_eq!(receipt.decision.category, OutcomeCategory::ManualReview);
    assert_eq!(receipt.decision.label, "Manual Review");
}

#[tokio::test]
async fn missing_summary_degrades_to_unknown() {
    let client = RecordingClient::with_response(EvaluationResponse {
        evaluation_token: None,
        summary: None,
    });
    let service = ScreeningService::new(Arc::new(client));

    let receipt = service
        .evaluate_as_of(&applicant(), fixture_today())
        .await
        .expect("evaluation succeeds");

    assert_eq!(receipt.decision.category, OutcomeCategory::Unknown);
    assert_eq!(receipt.decision.message, "Unexpected outcome: Unknown");
    assert!(receipt.evaluation_token.is_none());
}

#[tokio::test]
async fn decision_failures_surface_unchanged() {
    let client = Arc::new(FailingClient::new(FailureKind::Timeout));
    let service = ScreeningService::new(Arc::clone(&client));

    let result = service.evaluate_as_of(&applicant(), fixture_today()).await;

    match result {
        Err(ScreeningError::Decision(DecisionError::Timeout)) => {}
        other => panic!("expected timeout passthrough, got {other:?}"),
    }
    assert_eq!(client.call_count(), 1, "a failed call is not retried");
}

#[tokio::test]
async fn connection_failures_are_not_retried() {
    let client = Arc::new(FailingClient::new(FailureKind::Connection));
    let service = ScreeningService::new(Arc::clone(&client));

    let result = service.evaluate_as_of(&applicant(), fixture_today()).await;

    assert!(matches!(
        result,
        Err(ScreeningError::Decision(DecisionError::Connection(_)))
    ));
    assert_eq!(client.call_count(), 1);
}

#[tokio::test]
async fn preflight_passes_metadata_through() {
    let (service, _) = recording_service("approved");

    let parameters = service.preflight().await.expect("preflight succeeds");

    assert!(parameters.get("required").is_some());
}
