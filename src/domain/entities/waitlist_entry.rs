use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{document_type::DocumentType, referral::Referral};

/// A waitlist signup as stored in the `waitlist` table.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistEntry {
    pub id: i64,
    pub document_type: DocumentType,
    pub document_number: String,
    pub country_code: String,
    pub phone_number: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
    pub referral: Option<Referral>,
    pub accepts_terms: bool,
    /// Kept for auditing, never returned to clients.
    #[serde(skip_serializing)]
    pub registration_ip: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A validated and normalized signup that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWaitlistEntry {
    pub document_type: DocumentType,
    pub document_number: String,
    pub country_code: String,
    pub phone_number: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
    pub referral: Option<Referral>,
    pub accepts_terms: bool,
    pub registration_ip: Option<String>,
}

impl WaitlistEntry {
    /// Builds the stored form of `entry` once the storage layer has assigned
    /// its identity and timestamp.
    pub fn from_new(id: i64, created_at: DateTime<Utc>, entry: NewWaitlistEntry) -> Self {
        Self {
            id,
            document_type: entry.document_type,
            document_number: entry.document_number,
            country_code: entry.country_code,
            phone_number: entry.phone_number,
            first_name: entry.first_name,
            last_name: entry.last_name,
            email: entry.email,
            city: entry.city,
            referral: entry.referral,
            accepts_terms: entry.accepts_terms,
            registration_ip: entry.registration_ip,
            created_at,
        }
    }
}
