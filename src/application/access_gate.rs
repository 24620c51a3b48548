//! Static-secret access checks for the API key header and the admin login.
//!
//! Both sides of every comparison are hashed with SHA-256 and the digests are
//! compared with `subtle`, so neither the content nor the length of a
//! configured secret leaks through response timing.

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use subtle::{Choice, ConstantTimeEq};

use crate::app_error::{AppError, AppResult};

pub const API_KEY_HEADER: &str = "x-api-key";

pub struct AccessGate {
    api_key: SecretString,
    admin_username: SecretString,
    admin_password: SecretString,
}

impl AccessGate {
    pub fn new(
        api_key: SecretString,
        admin_username: SecretString,
        admin_password: SecretString,
    ) -> Self {
        Self {
            api_key,
            admin_username,
            admin_password,
        }
    }

    /// Checks the value of the API key header, if one was sent.
    pub fn verify_api_key(&self, presented: Option<&str>) -> AppResult<()> {
        let Some(presented) = presented else {
            return Err(AppError::InvalidApiKey);
        };
        if bool::from(secrets_match(self.api_key.expose_secret(), presented)) {
            Ok(())
        } else {
            Err(AppError::InvalidApiKey)
        }
    }

    /// Checks admin credentials. Username and password are always both
    /// compared.
    pub fn verify_admin(&self, username: &str, password: &str) -> AppResult<()> {
        let username_ok = secrets_match(self.admin_username.expose_secret(), username);
        let password_ok = secrets_match(self.admin_password.expose_secret(), password);
        if bool::from(username_ok & password_ok) {
            Ok(())
        } else {
            Err(AppError::InvalidCredentials)
        }
    }

    /// The shared key handed to an admin after a successful login.
    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }
}

fn secrets_match(expected: &str, presented: &str) -> Choice {
    let expected = Sha256::digest(expected.as_bytes());
    let presented = Sha256::digest(presented.as_bytes());
    expected.as_slice().ct_eq(presented.as_slice())
}
