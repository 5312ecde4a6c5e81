use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde_json::Value;
use tracing::info;

use super::client::{DecisionClient, DecisionError};
use super::domain::{ApplicantRecord, DecisionSummary};
use super::outcome::Decision;
use super::payload::evaluation_payload;
use super::validation::validation_errors;

/// Composes the validator, payload builder, decision client, and outcome
/// normalizer behind the single entry point every front end shares.
pub struct ScreeningService<C> {
    client: Arc<C>,
}

impl<C> ScreeningService<C>
where
    C: DecisionClient + 'static,
{
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Validate and evaluate a record against today's calendar date.
    pub async fn evaluate(
        &self,
        record: &ApplicantRecord,
    ) -> Result<EvaluationReceipt, ScreeningError> {
        self.evaluate_as_of(record, Local::now().date_naive()).await
    }

    /// Like [`Self::evaluate`], with the age-check date injected so callers
    /// and tests stay deterministic across midnight.
    pub async fn evaluate_as_of(
        &self,
        record: &ApplicantRecord,
        today: NaiveDate,
    ) -> Result<EvaluationReceipt, ScreeningError> {
        let errors = validation_errors(record, today);
        if !errors.is_empty() {
            return Err(ScreeningError::Rejected(errors));
        }

        let payload = evaluation_payload(record);
        let response = self.client.submit_evaluation(&payload).await?;

        let summary = response.summary.unwrap_or_default();
        let decision = Decision::from_summary(&summary);
        info!(outcome = %decision.label, "applicant evaluation completed");

        Ok(EvaluationReceipt {
            decision,
            evaluation_token: response.evaluation_token,
            summary,
        })
    }

    /// Connectivity and credential preflight: fetch the workflow metadata
    /// under its short timeout without touching applicant data.
    pub async fn preflight(&self) -> Result<Value, DecisionError> {
        self.client.workflow_parameters().await
    }
}

/// Everything a front end needs to render a completed evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationReceipt {
    pub decision: Decision,
    pub evaluation_token: Option<String>,
    pub summary: DecisionSummary,
}

/// Error surfaced by [`ScreeningService`].
#[derive(Debug, thiserror::Error)]
pub enum ScreeningError {
    /// The record failed validation; the decision API was never called.
    #[error("submission failed validation")]
    Rejected(Vec<String>),
    #[error(transparent)]
    Decision(#[from] DecisionError),
}
