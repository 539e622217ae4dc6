//! Client for the platform's REST backend.
//!
//! The gateway never checks credentials itself. Login and profile lookups are
//! forwarded to the backend and the answers are turned into session state.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

use crate::constants::{
    CODE_BACKEND_RESPONSE, CODE_BACKEND_UNAVAILABLE, CODE_INVALID_CREDENTIALS, CODE_INVALID_TOKEN,
    ERR_BACKEND_RESPONSE, ERR_BACKEND_UNAVAILABLE, ERR_INVALID_CREDENTIALS, ERR_INVALID_TOKEN,
};
use crate::errors::ApiError;
use crate::models::{
    BackendError, BackendLogin, BackendLoginRequest, LoginEnvelope, LoginRequest,
    ProfileEnvelope, Session,
};
use crate::utils::log_sanitizer::mask_email;

/// Authentication collaborator.
///
/// Implementations exchange credentials for an access token and look up the
/// current profile for a token.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// `POST /auth/login` semantics: credentials in, `{accessToken, user}` out.
    async fn login(&self, req: &LoginRequest) -> Result<BackendLogin, ApiError>;

    /// `GET /auth/profile` with the bearer token.
    async fn fetch_profile(&self, token: &str) -> Result<Session, ApiError>;

    /// Returns the name of this backend for logging/debugging.
    fn name(&self) -> &'static str;
}

pub struct HttpAuthBackend {
    client: Client,
    base_url: String,
}

impl HttpAuthBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Map a non-success backend answer. Client errors mean the caller was
/// rejected; anything else means the backend is in trouble.
pub(crate) fn failure(status: StatusCode, body: BackendError, rejected: (&str, &str)) -> ApiError {
    if status.is_client_error() {
        let (code, default_message) = rejected;
        ApiError::Unauthorized {
            code: code.to_string(),
            message: body.message.unwrap_or_else(|| default_message.to_string()),
        }
    } else {
        warn!("Auth backend answered {}", status);
        ApiError::BadGateway {
            code: CODE_BACKEND_UNAVAILABLE.to_string(),
            message: ERR_BACKEND_UNAVAILABLE.to_string(),
        }
    }
}

fn unexpected_body(err: reqwest::Error) -> ApiError {
    warn!("Could not parse auth backend response: {}", err);
    ApiError::BadGateway {
        code: CODE_BACKEND_RESPONSE.to_string(),
        message: ERR_BACKEND_RESPONSE.to_string(),
    }
}

async fn error_body(response: Response) -> BackendError {
    response.json::<BackendError>().await.unwrap_or_default()
}

#[async_trait]
impl AuthBackend for HttpAuthBackend {
    async fn login(&self, req: &LoginRequest) -> Result<BackendLogin, ApiError> {
        debug!("Forwarding login for {}", mask_email(&req.email));
        let response = self
            .client
            .post(self.url("/auth/login"))
            .json(&BackendLoginRequest::from(req))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response).await;
            return Err(failure(
                status,
                body,
                (CODE_INVALID_CREDENTIALS, ERR_INVALID_CREDENTIALS),
            ));
        }

        let envelope: LoginEnvelope = response.json().await.map_err(unexpected_body)?;
        Ok(envelope.into_inner())
    }

    async fn fetch_profile(&self, token: &str) -> Result<Session, ApiError> {
        let response = self
            .client
            .get(self.url("/auth/profile"))
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response).await;
            return Err(failure(status, body, (CODE_INVALID_TOKEN, ERR_INVALID_TOKEN)));
        }

        let envelope: ProfileEnvelope = response.json().await.map_err(unexpected_body)?;
        Ok(envelope.into_inner())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn test_url_join_trims_trailing_slash() {
        let backend =
            HttpAuthBackend::new("http://localhost:5000/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(backend.url("/auth/login"), "http://localhost:5000/api/auth/login");
        assert_eq!(backend.name(), "http");
    }

    #[test]
    fn test_client_error_uses_backend_message() {
        let err = failure(
            StatusCode::UNAUTHORIZED,
            BackendError {
                message: Some("Account pending".to_string()),
            },
            (CODE_INVALID_CREDENTIALS, ERR_INVALID_CREDENTIALS),
        );
        match err {
            ApiError::Unauthorized { code, message } => {
                assert_eq!(code, CODE_INVALID_CREDENTIALS);
                assert_eq!(message, "Account pending");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_client_error_default_message() {
        let err = failure(
            StatusCode::BAD_REQUEST,
            BackendError::default(),
            (CODE_INVALID_TOKEN, ERR_INVALID_TOKEN),
        );
        assert_eq!(err.to_string(), format!("Unauthorized [{}]: {}", CODE_INVALID_TOKEN, ERR_INVALID_TOKEN));
    }

    #[test]
    fn test_server_error_is_bad_gateway() {
        let err = failure(
            StatusCode::SERVICE_UNAVAILABLE,
            BackendError::default(),
            (CODE_INVALID_CREDENTIALS, ERR_INVALID_CREDENTIALS),
        );
        assert_eq!(err.code(), CODE_BACKEND_UNAVAILABLE);
    }

    #[test]
    fn test_login_envelopes() {
        let bare = r#"{"accessToken":"t1","user":{"_id":"u1","role":"user"}}"#;
        let login = serde_json::from_str::<LoginEnvelope>(bare).unwrap().into_inner();
        assert_eq!(login.access_token, "t1");
        assert_eq!(login.user.role, Role::Customer);

        let wrapped = r#"{"data":{"token":"t2","user":{"_id":"r1","role":"restaurant_owner","isApproved":true}}}"#;
        let login = serde_json::from_str::<LoginEnvelope>(wrapped).unwrap().into_inner();
        assert_eq!(login.access_token, "t2");
        assert!(login.user.is_approved);
    }

    #[test]
    fn test_profile_envelopes() {
        for raw in [
            r#"{"_id":"d1","role":"delivery_agent","isApproved":true}"#,
            r#"{"user":{"_id":"d1","role":"delivery_agent","isApproved":true}}"#,
            r#"{"data":{"_id":"d1","role":"delivery_agent","isApproved":true}}"#,
        ] {
            let profile = serde_json::from_str::<ProfileEnvelope>(raw).unwrap().into_inner();
            assert_eq!(profile.id, "d1");
            assert!(profile.is_approved);
        }
    }
}
