//! Applicant identity screening: intake validation, payload mapping, the
//! sandbox decision client, and outcome normalization.
//!
//! One validator, one payload builder, and one normalizer serve every front
//! end; the HTTP router and the terminal flow differ only in presentation.

pub mod client;
pub mod domain;
pub mod outcome;
pub mod payload;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use client::{AlloyClient, DecisionClient, DecisionError};
pub use domain::{ApplicantRecord, DecisionSummary, EvaluationResponse};
pub use outcome::{Decision, OutcomeCategory};
pub use payload::{evaluation_payload, EvaluationPayload};
pub use router::screening_router;
pub use service::{EvaluationReceipt, ScreeningError, ScreeningService};
pub use validation::{validation_errors, SUPPORTED_STATE_CODES};
