use std::{fmt, ops::RangeInclusive, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::VariantNames;
use validator::ValidateEmail;

use crate::domain::entities::{
    document_type::DocumentType, referral::Referral, waitlist_entry::NewWaitlistEntry,
};

/// Used when a registration omits `countryCode`.
pub const DEFAULT_COUNTRY_CODE: &str = "+57";
const COUNTRY_CODE_DIGITS: RangeInclusive<usize> = 1..=3;
const NAME_LENGTH: RangeInclusive<usize> = 2..=100;
const CITY_MAX_LENGTH: usize = 100;
const EMAIL_MAX_LENGTH: usize = 255;

// ============================================================================
// Rules
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRule {
    pub numeric_only: bool,
    pub length: RangeInclusive<usize>,
}

/// Format rules per Colombian document type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRules {
    pub cc: DocumentRule,
    pub ce: DocumentRule,
    pub ti: DocumentRule,
    pub pa: DocumentRule,
}

impl Default for DocumentRules {
    fn default() -> Self {
        Self {
            cc: DocumentRule { numeric_only: true, length: 6..=10 },
            ce: DocumentRule { numeric_only: false, length: 6..=7 },
            ti: DocumentRule { numeric_only: true, length: 10..=11 },
            pa: DocumentRule { numeric_only: false, length: 5..=15 },
        }
    }
}

impl DocumentRules {
    pub fn for_type(&self, document_type: DocumentType) -> &DocumentRule {
        match document_type {
            DocumentType::CC => &self.cc,
            DocumentType::CE => &self.ce,
            DocumentType::TI => &self.ti,
            DocumentType::PA => &self.pa,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneRules {
    pub digits: RangeInclusive<usize>,
}

impl Default for PhoneRules {
    fn default() -> Self {
        Self { digits: 7..=15 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationRules {
    pub documents: DocumentRules,
    pub phone: PhoneRules,
}

// ============================================================================
// Input / Errors
// ============================================================================

/// Registration body as received. Every field is optional here so that a
/// missing field is reported together with the malformed ones.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "RawRegistrationInput")]
pub struct RegistrationInput {
    pub document_type: Option<String>,
    pub document_number: Option<String>,
    pub country_code: Option<String>,
    pub phone_number: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
    pub referral: Option<String>,
    pub accepts_terms: Option<bool>,
    /// Fields that were present with the wrong JSON type.
    pub type_errors: Vec<FieldError>,
}

/// Untyped body so that a wrong JSON type becomes a field error instead of
/// rejecting the whole request.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRegistrationInput {
    document_type: Option<Value>,
    document_number: Option<Value>,
    country_code: Option<Value>,
    phone_number: Option<Value>,
    first_name: Option<Value>,
    last_name: Option<Value>,
    email: Option<Value>,
    city: Option<Value>,
    referral: Option<Value>,
    accepts_terms: Option<Value>,
}

impl From<RawRegistrationInput> for RegistrationInput {
    fn from(raw: RawRegistrationInput) -> Self {
        let mut type_errors = Vec::new();
        let mut text = |field: &'static str, value: Option<Value>| match value {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(_) => {
                type_errors.push(FieldError { field, reason: "must be a string".into() });
                None
            }
        };

        let document_type = text("documentType", raw.document_type);
        let document_number = text("documentNumber", raw.document_number);
        let country_code = text("countryCode", raw.country_code);
        let phone_number = text("phoneNumber", raw.phone_number);
        let first_name = text("firstName", raw.first_name);
        let last_name = text("lastName", raw.last_name);
        let email = text("email", raw.email);
        let city = text("city", raw.city);
        let referral = text("referral", raw.referral);

        let accepts_terms = match raw.accepts_terms {
            None | Some(Value::Null) => None,
            Some(Value::Bool(b)) => Some(b),
            Some(_) => {
                type_errors.push(FieldError {
                    field: "acceptsTerms",
                    reason: "must be true or false".into(),
                });
                None
            }
        };

        Self {
            document_type,
            document_number,
            country_code,
            phone_number,
            first_name,
            last_name,
            email,
            city,
            referral,
            accepts_terms,
            type_errors,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, field: &'static str, reason: impl Into<String>) {
        self.0.push(FieldError { field, reason: reason.into() });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{} {}", e.field, e.reason))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Validates and normalizes a registration, reporting every failing field.
pub fn validate_registration(
    input: &RegistrationInput,
    rules: &ValidationRules,
) -> Result<NewWaitlistEntry, ValidationErrors> {
    let mut fields = FieldCollector {
        errors: ValidationErrors::default(),
        type_errors: &input.type_errors,
    };

    let document_type = fields.check(
        "documentType",
        parse_document_type(input.document_type.as_deref()),
    );
    let document_number = fields.check(
        "documentNumber",
        check_document_number(document_type, input.document_number.as_deref(), &rules.documents),
    );
    let country_code = fields.check("countryCode", check_country_code(input.country_code.as_deref()));
    let phone_number = fields.check(
        "phoneNumber",
        check_phone_number(input.phone_number.as_deref(), &rules.phone),
    );
    let first_name = fields.check("firstName", check_name(input.first_name.as_deref()));
    let last_name = fields.check("lastName", check_name(input.last_name.as_deref()));
    let email = fields.check("email", check_email(input.email.as_deref()));
    let city = fields.check("city", check_city(input.city.as_deref()));
    let referral = fields.check("referral", parse_referral(input.referral.as_deref()));
    let accepts_terms = fields.check("acceptsTerms", check_terms(input.accepts_terms));
    let errors = fields.errors;

    match (document_type, document_number, country_code, phone_number, accepts_terms) {
        (Some(document_type), Some(document_number), Some(country_code), Some(phone_number), Some(accepts_terms))
            if errors.is_empty() =>
        {
            Ok(NewWaitlistEntry {
                document_type,
                document_number,
                country_code,
                phone_number,
                first_name: first_name.flatten(),
                last_name: last_name.flatten(),
                email: email.flatten(),
                city: city.flatten(),
                referral: referral.flatten(),
                accepts_terms,
                registration_ip: None,
            })
        }
        _ => Err(errors),
    }
}

/// Lowercases and trims an email so lookups match stored values.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Records one error per field. A wrong JSON type takes precedence over the
/// content check, which only saw the field as absent.
struct FieldCollector<'a> {
    errors: ValidationErrors,
    type_errors: &'a [FieldError],
}

impl FieldCollector<'_> {
    fn check<T>(&mut self, field: &'static str, result: Result<T, String>) -> Option<T> {
        if let Some(mistyped) = self.type_errors.iter().find(|e| e.field == field) {
            self.errors.push(field, mistyped.reason.clone());
            return None;
        }
        result.map_err(|reason| self.errors.push(field, reason)).ok()
    }
}

fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_document_type(raw: Option<&str>) -> Result<DocumentType, String> {
    let raw = present(raw).ok_or("is required")?;
    DocumentType::from_str(&raw.to_uppercase())
        .map_err(|_| format!("must be one of {}", DocumentType::VARIANTS.join(", ")))
}

fn check_document_number(
    document_type: Option<DocumentType>,
    raw: Option<&str>,
    rules: &DocumentRules,
) -> Result<String, String> {
    let number: String = raw
        .unwrap_or_default()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.'))
        .collect::<String>()
        .to_uppercase();
    if number.is_empty() {
        return Err("is required".into());
    }

    // Without a known type there is nothing more to check; the type error
    // is already reported.
    let Some(document_type) = document_type else {
        return Ok(number);
    };
    let rule = rules.for_type(document_type);

    if rule.numeric_only && !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("must contain only digits for a {}", document_type.label()));
    }
    if !number.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(format!("must be alphanumeric for a {}", document_type.label()));
    }
    if !rule.length.contains(&number.len()) {
        return Err(format!(
            "must have between {} and {} characters for a {}",
            rule.length.start(),
            rule.length.end(),
            document_type.label()
        ));
    }
    Ok(number)
}

fn check_country_code(raw: Option<&str>) -> Result<String, String> {
    let Some(code) = present(raw) else {
        return Ok(DEFAULT_COUNTRY_CODE.to_string());
    };
    let digits = code.strip_prefix('+').unwrap_or(code);
    if !COUNTRY_CODE_DIGITS.contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!(
            "must be '+' followed by {} to {} digits (e.g. +57, +1, +34)",
            COUNTRY_CODE_DIGITS.start(),
            COUNTRY_CODE_DIGITS.end()
        ));
    }
    Ok(format!("+{digits}"))
}

fn check_phone_number(raw: Option<&str>, rules: &PhoneRules) -> Result<String, String> {
    let phone: String = raw
        .unwrap_or_default()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
        .collect();
    if phone.is_empty() {
        return Err("is required".into());
    }
    if !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err("must contain only digits".into());
    }
    if !rules.digits.contains(&phone.len()) {
        return Err(format!(
            "must have between {} and {} digits",
            rules.digits.start(),
            rules.digits.end()
        ));
    }
    Ok(phone)
}

fn check_name(raw: Option<&str>) -> Result<Option<String>, String> {
    let Some(name) = present(raw) else {
        return Ok(None);
    };
    if !NAME_LENGTH.contains(&name.chars().count()) {
        return Err(format!(
            "must have between {} and {} characters",
            NAME_LENGTH.start(),
            NAME_LENGTH.end()
        ));
    }
    if !name
        .chars()
        .all(|c| c.is_alphabetic() || c.is_whitespace() || c == '-' || c == '\'')
    {
        return Err("may only contain letters, spaces, hyphens and apostrophes".into());
    }
    Ok(Some(capitalize_words(name)))
}

fn check_email(raw: Option<&str>) -> Result<Option<String>, String> {
    let Some(email) = present(raw) else {
        return Ok(None);
    };
    let email = normalize_email(email);
    if email.len() > EMAIL_MAX_LENGTH || !email.as_str().validate_email() {
        return Err("must be a valid email address".into());
    }
    Ok(Some(email))
}

fn check_city(raw: Option<&str>) -> Result<Option<String>, String> {
    let Some(city) = present(raw) else {
        return Ok(None);
    };
    if city.chars().count() > CITY_MAX_LENGTH {
        return Err(format!("must have at most {CITY_MAX_LENGTH} characters"));
    }
    Ok(Some(capitalize_words(city)))
}

fn parse_referral(raw: Option<&str>) -> Result<Option<Referral>, String> {
    let Some(referral) = present(raw) else {
        return Ok(None);
    };
    Referral::from_str(&referral.to_lowercase())
        .map(Some)
        .map_err(|_| format!("must be one of {}", Referral::VARIANTS.join(", ")))
}

fn check_terms(accepted: Option<bool>) -> Result<bool, String> {
    match accepted {
        Some(false) => Err(
            "must be accepted to consent to personal data processing (Law 1581 of 2012)".into(),
        ),
        Some(true) => Ok(true),
        None => Ok(false),
    }
}

/// "maría  JOSÉ" -> "María José"
fn capitalize_words(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
