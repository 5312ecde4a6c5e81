//! Field-level intake checks. Every rule runs on every call so a caller sees
//! the complete problem list at once instead of fixing one field per attempt.

use chrono::{Datelike, NaiveDate};

use super::domain::ApplicantRecord;

/// Two-letter postal abbreviations accepted for `address_state`: the fifty
/// states plus the District of Columbia.
pub const SUPPORTED_STATE_CODES: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY", "DC",
];

/// Check every field and return one message per failing rule, in stable
/// field order. An empty vector means the record is ready to submit.
pub fn validation_errors(record: &ApplicantRecord, today: NaiveDate) -> Vec<String> {
    let mut errors = Vec::new();

    if record.name_first.trim().is_empty() {
        errors.push("First name is required.".to_string());
    }
    if record.name_last.trim().is_empty() {
        errors.push("Last name is required.".to_string());
    }
    if !valid_birth_date(&record.birth_date, today) {
        errors.push("DOB must be YYYY-MM-DD and age between 18–120.".to_string());
    }
    if !valid_ssn(&record.ssn) {
        errors.push("SSN must be exactly 9 digits (numbers only).".to_string());
    }
    if !valid_email(&record.email) {
        errors.push("Email must look like name@example.com.".to_string());
    }
    if record.address_line1.trim().is_empty() {
        errors.push("Address Line 1 is required.".to_string());
    }
    if record.address_city.trim().is_empty() {
        errors.push("City is required.".to_string());
    }
    if !valid_state(&record.address_state) {
        errors.push("State must be a valid 2-letter US code (e.g., NY, CA).".to_string());
    }
    if record.address_postal_code.trim().is_empty() {
        errors.push("Zip/Postal Code is required.".to_string());
    }

    errors
}

/// `YYYY-MM-DD` with an age between 18 and 120 as of `today`. Unparseable
/// input fails the same rule, so one message covers both problems.
pub fn valid_birth_date(raw: &str, today: NaiveDate) -> bool {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map(|dob| (18..=120).contains(&age_on(dob, today)))
        .unwrap_or(false)
}

/// Calendar age: one year per birthday that has already passed.
fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

pub fn valid_ssn(raw: &str) -> bool {
    let ssn = raw.trim();
    ssn.len() == 9 && ssn.bytes().all(|byte| byte.is_ascii_digit())
}

/// Shape check only: something before the `@`, a domain with an interior
/// dot, and no whitespace anywhere. Deliverability is the vendor's problem.
pub fn valid_email(raw: &str) -> bool {
    let email = raw.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(index, ch)| ch == '.' && index > 0 && index + 1 < domain.len())
}

pub fn valid_state(raw: &str) -> bool {
    let code = raw.trim().to_ascii_uppercase();
    SUPPORTED_STATE_CODES.contains(&code.as_str())
}
