//! Authentication request models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Role;

/// Request payload for login
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// User's email address
    #[serde(alias = "identifier")]
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "owner@cravings.io")]
    pub email: String,
    /// User's password
    #[serde(alias = "secret")]
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "securePassword123")]
    pub password: String,
    /// Portal the user is signing in through
    #[serde(default)]
    pub role: Option<Role>,
    /// Local path to land on instead of the role's dashboard
    #[serde(default)]
    #[schema(example = "/restaurant/menu")]
    pub redirect_path: Option<String>,
}

/// Body forwarded to the backend `POST /auth/login`.
#[derive(Debug, Serialize)]
pub struct BackendLoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl<'a> From<&'a LoginRequest> for BackendLoginRequest<'a> {
    fn from(req: &'a LoginRequest) -> Self {
        Self {
            email: &req.email,
            password: &req.password,
            role: req.role,
        }
    }
}
