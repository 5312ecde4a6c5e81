//! Normalizes the vendor's free-text outcome into one of four categories and
//! the fixed message shown to applicants.

use serde::{Deserialize, Serialize};

use super::domain::DecisionSummary;

const APPROVED_MESSAGE: &str = "Congratulations! You are approved.";
const MANUAL_REVIEW_MESSAGE: &str =
    "Your application is under review. Please wait for further updates.";
const DENIED_MESSAGE: &str = "Unfortunately, we cannot approve your application at this time.";

/// Canonical decision buckets. Anything outside the synonym table lands in
/// `Unknown` rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeCategory {
    Approved,
    ManualReview,
    Denied,
    Unknown,
}

impl OutcomeCategory {
    /// Case-insensitive synonym mapping over the trimmed raw outcome.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "approve" | "approved" => Self::Approved,
            "manual review" | "manual_review" | "review" => Self::ManualReview,
            "deny" | "denied" | "declined" | "rejected" => Self::Denied,
            _ => Self::Unknown,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::ManualReview => "Manual Review",
            Self::Denied => "Denied",
            Self::Unknown => "Unknown",
        }
    }
}

/// A normalized decision ready for display.
///
/// `label` is the user-visible outcome; for unrecognized values it echoes
/// the vendor's raw string so nothing is silently rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub category: OutcomeCategory,
    pub label: String,
    pub message: String,
}

impl Decision {
    /// Derive the decision from a summary. Never fails: a missing or blank
    /// outcome becomes `Unknown` with its explanatory message.
    pub fn from_summary(summary: &DecisionSummary) -> Self {
        let raw = summary.outcome.as_deref().unwrap_or("").trim();
        let category = OutcomeCategory::from_raw(raw);

        let label = if category == OutcomeCategory::Unknown && !raw.is_empty() {
            raw.to_string()
        } else {
            category.label().to_string()
        };

        let message = match category {
            OutcomeCategory::Approved => APPROVED_MESSAGE.to_string(),
            OutcomeCategory::ManualReview => MANUAL_REVIEW_MESSAGE.to_string(),
            OutcomeCategory::Denied => DENIED_MESSAGE.to_string(),
            OutcomeCategory::Unknown => format!("Unexpected outcome: {label}"),
        };

        Self {
            category,
            label,
            message,
        }
    }
}
