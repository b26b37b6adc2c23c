/*
[INPUT]:  Caller-supplied API key and secret
[OUTPUT]: Validated, immutable credential pair
[POS]:    Auth layer - long-lived identity material
[UPDATE]: When credential validation rules change
*/

use std::fmt;

use crate::http::{B2BinPayError, Result};

/// API key/secret pair used to obtain tokens
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    key: String,
    secret: String,
}

impl Credentials {
    /// Validate and wrap a key/secret pair. Empty values are rejected.
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let secret = secret.into();
        if key.is_empty() || secret.is_empty() {
            return Err(B2BinPayError::InvalidCredentials);
        }
        Ok(Self { key, secret })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}
