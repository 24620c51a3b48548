use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr, VariantNames};

/// Colombian identity document categories accepted on the waitlist.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    sqlx::Type,
    Display,
    EnumString,
    IntoStaticStr,
    VariantNames,
)]
#[sqlx(type_name = "document_type")]
pub enum DocumentType {
    /// Cédula de ciudadanía
    CC,
    /// Cédula de extranjería
    CE,
    /// Tarjeta de identidad
    TI,
    /// Pasaporte
    PA,
}

impl DocumentType {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::CC => "citizenship card",
            DocumentType::CE => "foreigner ID card",
            DocumentType::TI => "identity card",
            DocumentType::PA => "passport",
        }
    }
}
