use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Applicant details exactly as collected from a form or prompt session.
///
/// Every field defaults to empty so a sparse submission still deserializes
/// and reaches the validator, which reports each gap as its own error
/// instead of the transport rejecting the request wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    #[serde(default)]
    pub name_first: String,
    #[serde(default)]
    pub name_last: String,
    /// ISO `YYYY-MM-DD`, kept as text until validation.
    #[serde(default)]
    pub birth_date: String,
    #[serde(default)]
    pub ssn: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: Option<String>,
    #[serde(default)]
    pub address_city: String,
    #[serde(default)]
    pub address_state: String,
    #[serde(default)]
    pub address_postal_code: String,
}

/// Body of a successful evaluation reply from the decision API.
///
/// Unknown top-level fields are ignored; a summary that is missing or not an
/// object degrades to `None` rather than failing the whole response.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationResponse {
    #[serde(default)]
    pub evaluation_token: Option<String>,
    #[serde(default, deserialize_with = "lenient_summary")]
    pub summary: Option<DecisionSummary>,
}

/// The decision summary restricted to the five keys this system understands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome_reasons: Option<Value>,
}

fn lenient_summary<'de, D>(deserializer: D) -> Result<Option<DecisionSummary>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| serde_json::from_value(value).ok()))
}
