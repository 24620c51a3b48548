//! Test data factories for creating valid test fixtures.
//!
//! Each factory function creates a complete, valid object with sensible defaults.
//! Use the closure parameter to override specific fields as needed.

use crate::{
    application::validators::RegistrationInput,
    domain::entities::{document_type::DocumentType, waitlist_entry::NewWaitlistEntry},
};

/// Create a stored-ready entry with sensible defaults.
pub fn create_test_entry(overrides: impl FnOnce(&mut NewWaitlistEntry)) -> NewWaitlistEntry {
    let mut entry = NewWaitlistEntry {
        document_type: DocumentType::CC,
        document_number: "1234567890".to_string(),
        country_code: "+57".to_string(),
        phone_number: "3001234567".to_string(),
        first_name: None,
        last_name: None,
        email: None,
        city: None,
        referral: None,
        accepts_terms: true,
        registration_ip: None,
    };
    overrides(&mut entry);
    entry
}

/// Raw registration body with only the required fields set.
pub fn registration_input(document_type: &str, document_number: &str) -> RegistrationInput {
    RegistrationInput {
        document_type: Some(document_type.to_string()),
        document_number: Some(document_number.to_string()),
        country_code: Some("+57".to_string()),
        phone_number: Some("3001234567".to_string()),
        accepts_terms: Some(true),
        ..Default::default()
    }
}
