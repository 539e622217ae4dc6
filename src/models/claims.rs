//! Access token claims.

use serde::{Deserialize, Serialize};

use crate::models::{Role, Session};

/// Decoded access token payload. Only `role` is mandatory.
///
/// Backends name the subject `sub`, `id` or `_id`, sometimes several at
/// once, so each is kept as its own field.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, rename = "_id", skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    /// NumericDate; some issuers write fractional seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<f64>,
}

impl Claims {
    /// Subject id, preferring `sub` over `id` over `_id`.
    pub fn subject(&self) -> Option<&str> {
        self.sub
            .as_deref()
            .or(self.id.as_deref())
            .or(self.object_id.as_deref())
    }

    /// A token and a session record belong together unless both name a
    /// subject and the subjects differ.
    pub fn matches_session(&self, session: &Session) -> bool {
        match self.subject() {
            Some(subject) => subject == session.id,
            None => true,
        }
    }
}
