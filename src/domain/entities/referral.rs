use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr, VariantNames};

/// How a registrant heard about the devotional.
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
#[sqlx(type_name = "referral_source", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Referral {
    SocialMedia,
    Friend,
    Parish,
    Community,
    Other,
}
