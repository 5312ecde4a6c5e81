//! Maps collected applicant fields onto the decision API's schema. Blank
//! fields are dropped entirely; the vendor treats empty strings as data.

use std::collections::BTreeMap;

use super::domain::ApplicantRecord;

/// External field names and their cleaned values, deterministically ordered.
pub type EvaluationPayload = BTreeMap<&'static str, String>;

/// Build the `POST /evaluations` body for a record.
///
/// Trims every value, lowercases the email, uppercases the state, renames
/// fields to the vendor's spelling, and pins `address_country_code` to `US`.
/// Assumes the record passed validation but stays total if it did not.
pub fn evaluation_payload(record: &ApplicantRecord) -> EvaluationPayload {
    let mut payload = EvaluationPayload::new();

    insert_trimmed(&mut payload, "name_first", &record.name_first);
    insert_trimmed(&mut payload, "name_last", &record.name_last);
    insert_trimmed(&mut payload, "birth_date", &record.birth_date);
    insert_trimmed(&mut payload, "document_ssn", &record.ssn);
    insert_trimmed(&mut payload, "email_address", &record.email.to_lowercase());
    insert_trimmed(&mut payload, "address_line_1", &record.address_line1);
    if let Some(line2) = record.address_line2.as_deref() {
        insert_trimmed(&mut payload, "address_line_2", line2);
    }
    insert_trimmed(&mut payload, "address_city", &record.address_city);
    insert_trimmed(
        &mut payload,
        "address_state",
        &record.address_state.to_uppercase(),
    );
    insert_trimmed(
        &mut payload,
        "address_postal_code",
        &record.address_postal_code,
    );
    payload.insert("address_country_code", "US".to_string());

    payload
}

fn insert_trimmed(payload: &mut EvaluationPayload, field: &'static str, raw: &str) {
    let value = raw.trim();
    if !value.is_empty() {
        payload.insert(field, value.to_string());
    }
}
