pub mod access_gate;
pub mod app_error;
pub mod data_policy;
pub mod use_cases;
pub mod validators;
