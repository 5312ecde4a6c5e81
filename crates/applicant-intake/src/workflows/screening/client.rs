//! Outbound client for the Alloy sandbox workflow API.
//!
//! Two operations, two deadlines: the `GET /parameters` metadata preflight
//! runs under the short timeout, the `POST /evaluations` submission under the
//! long one. Nothing here retries; a failed call surfaces to the caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::Value;

use crate::config::AlloyConfig;

use super::domain::EvaluationResponse;
use super::payload::EvaluationPayload;

/// Transport seam for the decision API, kept narrow so services and tests
/// can swap in fakes.
#[async_trait]
pub trait DecisionClient: Send + Sync {
    /// Fetch the workflow's parameter metadata. Doubles as the connectivity
    /// and credential preflight for the terminal flow.
    async fn workflow_parameters(&self) -> Result<Value, DecisionError>;

    /// Submit one applicant evaluation. Exactly one attempt; whether anyone
    /// retries is a human decision.
    async fn submit_evaluation(
        &self,
        payload: &EvaluationPayload,
    ) -> Result<EvaluationResponse, DecisionError>;
}

/// Failure taxonomy for decision API calls. Callers match on variants, so
/// each failure mode stays distinguishable end to end.
#[derive(Debug, thiserror::Error)]
pub enum DecisionError {
    #[error("request to Alloy timed out")]
    Timeout,
    #[error("could not connect to Alloy: {0}")]
    Connection(String),
    #[error("transport failure talking to Alloy: {0}")]
    Transport(String),
    #[error("Alloy returned HTTP {status}")]
    Upstream { status: u16, body: String },
    #[error("non-JSON response from Alloy")]
    MalformedResponse {
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

/// `reqwest`-backed implementation holding the sandbox credentials.
pub struct AlloyClient {
    http: HttpClient,
    base_url: String,
    workflow_token: String,
    workflow_secret: String,
    metadata_timeout: Duration,
    evaluation_timeout: Duration,
}

impl AlloyClient {
    pub fn new(config: &AlloyConfig) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: config.base_url.clone(),
            workflow_token: config.workflow_token.clone(),
            workflow_secret: config.workflow_secret.clone(),
            metadata_timeout: config.metadata_timeout,
            evaluation_timeout: config.evaluation_timeout,
        }
    }
}

#[async_trait]
impl DecisionClient for AlloyClient {
    async fn workflow_parameters(&self) -> Result<Value, DecisionError> {
        let url = format!("{}/parameters", self.base_url);
        let response = self
            .http
            .get(&url)
            .basic_auth(&self.workflow_token, Some(&self.workflow_secret))
            .timeout(self.metadata_timeout)
            .send()
            .await
            .map_err(classify_transport)?;

        decode_response(response).await
    }

    async fn submit_evaluation(
        &self,
        payload: &EvaluationPayload,
    ) -> Result<EvaluationResponse, DecisionError> {
        let url = format!("{}/evaluations", self.base_url);
        let response = self
            .http
            .post(&url)
            .basic_auth(&self.workflow_token, Some(&self.workflow_secret))
            .timeout(self.evaluation_timeout)
            .json(payload)
            .send()
            .await
            .map_err(classify_transport)?;

        decode_response(response).await
    }
}

/// Drain a reply into `T`: non-2xx statuses keep their body for passthrough,
/// and a 2xx body that is not valid JSON is its own failure mode.
async fn decode_response<T>(response: reqwest::Response) -> Result<T, DecisionError>
where
    T: serde::de::DeserializeOwned,
{
    let status = response.status();
    let body = response.text().await.map_err(classify_transport)?;

    if !status.is_success() {
        return Err(DecisionError::Upstream {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body)
        .map_err(|source| DecisionError::MalformedResponse { body, source })
}

fn classify_transport(err: reqwest::Error) -> DecisionError {
    if err.is_timeout() {
        DecisionError::Timeout
    } else if err.is_connect() {
        DecisionError::Connection(err.to_string())
    } else {
        DecisionError::Transport(err.to_string())
    }
}
