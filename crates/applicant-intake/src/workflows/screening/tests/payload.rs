use super::common::applicant;

use crate::workflows::screening::evaluation_payload;
use crate::workflows::screening::ApplicantRecord;

#[test]
fn maps_internal_names_to_vendor_names() {
    let payload = evaluation_payload(&applicant());

    assert_eq!(payload.get("name_first").map(String::as_str), Some("Avery"));
    assert_eq!(payload.get("name_last").map(String::as_str), Some("Quinn"));
    assert_eq!(
        payload.get("birth_date").map(String::as_str),
        Some("1992-04-09")
    );
    assert_eq!(
        payload.get("document_ssn").map(String::as_str),
        Some("123456789")
    );
    assert_eq!(
        payload.get("address_line_1").map(String::as_str),
        Some("41 Cherry Lane")
    );
    assert!(!payload.contains_key("ssn"));
    assert!(!payload.contains_key("email"));
    assert!(!payload.contains_key("address_line1"));
}

#[test]
fn email_is_lowercased_and_state_uppercased() {
    let payload = evaluation_payload(&applicant());

    assert_eq!(
        payload.get("email_address").map(String::as_str),
        Some("avery.quinn@example.com")
    );
    assert_eq!(payload.get("address_state").map(String::as_str), Some("IA"));
}

#[test]
fn country_code_is_pinned_to_us() {
    let payload = evaluation_payload(&applicant());
    assert_eq!(
        payload.get("address_country_code").map(String::as_str),
        Some("US")
    );
}

#[test]
fn values_are_trimmed() {
    let mut record = applicant();
    record.name_first = "  Avery  ".to_string();
    record.address_postal_code = " 50309 ".to_string();

    let payload = evaluation_payload(&record);
    assert_eq!(payload.get("name_first").map(String::as_str), Some("Avery"));
    assert_eq!(
        payload.get("address_postal_code").map(String::as_str),
        Some("50309")
    );
}

#[test]
fn blank_fields_are_dropped_not_sent_empty() {
    let mut record = applicant();
    record.address_line2 = Some("   ".to_string());
    record.address_postal_code = String::new();

    let payload = evaluation_payload(&record);
    assert!(!payload.contains_key("address_line_2"));
    assert!(!payload.contains_key("address_postal_code"));
}

#[test]
fn second_address_line_is_kept_when_present() {
    let mut record = applicant();
    record.address_line2 = Some("Unit 4B".to_string());

    let payload = evaluation_payload(&record);
    assert_eq!(
        payload.get("address_line_2").map(String::as_str),
        Some("Unit 4B")
    );
}

#[test]
fn empty_record_still_carries_the_country_constant() {
    let payload = evaluation_payload(&ApplicantRecord::default());
    assert_eq!(payload.len(), 1);
    assert_eq!(
        payload.get("address_country_code").map(String::as_str),
        Some("US")
    );
}
