//! Services organized by domain concern.

pub mod auth_backend;
pub mod token_codec;

pub use auth_backend::{AuthBackend, HttpAuthBackend};
pub use token_codec::{codec_for, TokenCodec, TokenError, TokenMode, TrustingCodec, VerifyingCodec};
