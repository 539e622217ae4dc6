//! Access token decoding.
//!
//! Two codecs share one trait. [`VerifyingCodec`] checks the HS256 signature
//! and expiry with the secret shared with the backend. [`TrustingCodec`] only
//! decodes the payload, which is what the legacy front end did; it exists for
//! parity and must not be used where the role claim has to be trusted.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

use crate::models::Claims;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("token expired")]
    Expired,
    #[error("invalid token signature")]
    InvalidSignature,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::Malformed(err.to_string()),
        }
    }
}

pub trait TokenCodec: Send + Sync {
    fn decode(&self, token: &str) -> Result<Claims, TokenError>;

    /// Name used in startup logs.
    fn name(&self) -> &'static str;
}

/// Payload-only decoding. Expired tokens are still rejected when they carry
/// an `exp` claim.
pub struct TrustingCodec {
    key: DecodingKey,
    validation: Validation,
}

impl TrustingCodec {
    pub fn new() -> Self {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.required_spec_claims.clear();
        validation.validate_aud = false;
        Self {
            key: DecodingKey::from_secret(&[]),
            validation,
        }
    }
}

impl Default for TrustingCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenCodec for TrustingCodec {
    fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        Ok(decode::<Claims>(token, &self.key, &self.validation)?.claims)
    }

    fn name(&self) -> &'static str {
        "trusting"
    }
}

/// HS256 signature and expiry validation.
pub struct VerifyingCodec {
    key: DecodingKey,
    validation: Validation,
}

impl VerifyingCodec {
    pub fn new(secret: &str) -> Self {
        // Tokens are issued for the platform as a whole; no audience is pinned.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

impl TokenCodec for VerifyingCodec {
    fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        Ok(decode::<Claims>(token, &self.key, &self.validation)?.claims)
    }

    fn name(&self) -> &'static str {
        "verifying"
    }
}

/// Which codec the gate runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenMode {
    Trusting,
    Verifying,
}

impl FromStr for TokenMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trusting" | "decode-only" => Ok(TokenMode::Trusting),
            "verifying" | "verify" => Ok(TokenMode::Verifying),
            other => Err(format!("unknown token verification mode '{}'", other)),
        }
    }
}

pub fn codec_for(mode: TokenMode, secret: &str) -> Arc<dyn TokenCodec> {
    match mode {
        TokenMode::Trusting => Arc::new(TrustingCodec::new()),
        TokenMode::Verifying => Arc::new(VerifyingCodec::new(secret)),
    }
}
