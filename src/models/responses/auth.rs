//! Authentication response models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Session;

/// Successful login payload returned by the backend.
#[derive(Debug, Deserialize, Clone)]
pub struct BackendLogin {
    #[serde(rename = "accessToken", alias = "token")]
    pub access_token: String,
    pub user: Session,
}

/// Error payload returned by the backend.
#[derive(Debug, Deserialize, Default)]
pub struct BackendError {
    #[serde(default)]
    pub message: Option<String>,
}

/// Login result: where the client should navigate next.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[schema(example = "/restaurant/dashboard")]
    pub redirect_to: String,
    pub user: Session,
}

/// Logout result.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    #[schema(example = "/")]
    pub redirect_to: String,
}

/// Backends answer either with the payload itself or wrapped in `data`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LoginEnvelope {
    Wrapped { data: BackendLogin },
    Bare(BackendLogin),
}

impl LoginEnvelope {
    pub fn into_inner(self) -> BackendLogin {
        match self {
            LoginEnvelope::Wrapped { data } => data,
            LoginEnvelope::Bare(login) => login,
        }
    }
}

/// Profile payload: `{data: ...}`, `{user: ...}` or the record itself.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ProfileEnvelope {
    Data { data: Session },
    User { user: Session },
    Bare(Session),
}

impl ProfileEnvelope {
    pub fn into_inner(self) -> Session {
        match self {
            ProfileEnvelope::Data { data } => data,
            ProfileEnvelope::User { user } => user,
            ProfileEnvelope::Bare(session) => session,
        }
    }
}
