//! Session handlers: login, logout, current session and approval refresh.

use actix_web::{web, HttpRequest, HttpResponse, HttpResponseBuilder};
use log::{info, warn};
use validator::Validate;

use crate::constants::{
    CODE_INVALID_CREDENTIALS, CODE_SESSION_NOT_FOUND, ERR_INVALID_CREDENTIALS, ERR_NO_SESSION,
    MSG_LOGIN_SUCCESS, MSG_LOGOUT_SUCCESS, MSG_SESSION_FOUND, MSG_SESSION_REFRESHED,
};
use crate::errors::ApiError;
use crate::models::{ApiResponse, LoginRequest, LoginResponse, LogoutResponse};
use crate::routing::RouteGate;
use crate::services::AuthBackend;
use crate::session::{CookieSessionStore, CookieSettings, SessionManager};
use crate::utils::log_sanitizer::mask_email;
use crate::validators::{validate_local_path, validation_errors_to_api_error};

fn session_manager(
    req: &HttpRequest,
    gate: &RouteGate,
    cookies: &CookieSettings,
) -> SessionManager<CookieSessionStore> {
    SessionManager::new(CookieSessionStore::from_request(req, cookies), gate.table())
}

fn attach_cookies(
    mut builder: HttpResponseBuilder,
    manager: SessionManager<CookieSessionStore>,
) -> HttpResponseBuilder {
    for cookie in manager.into_store().into_cookies() {
        builder.cookie(cookie);
    }
    builder
}

fn no_session() -> ApiError {
    ApiError::NotFound {
        code: CODE_SESSION_NOT_FOUND.to_string(),
        message: ERR_NO_SESSION.to_string(),
    }
}

/// Log in through the backend and start a session
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful; session cookies set", body = LoginResponse),
        (status = 400, description = "Validation error", body = crate::models::ErrorResponse),
        (status = 401, description = "Invalid credentials", body = crate::models::ErrorResponse),
        (status = 502, description = "Backend unavailable", body = crate::models::ErrorResponse)
    )
)]
pub async fn login(
    req: HttpRequest,
    backend: web::Data<dyn AuthBackend>,
    gate: web::Data<RouteGate>,
    cookies: web::Data<CookieSettings>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate().map_err(validation_errors_to_api_error)?;
    let body = body.into_inner();
    if let Some(path) = body.redirect_path.as_deref() {
        validate_local_path(path)?;
    }

    let login = backend.login(&body).await?;

    // A restaurant owner signing in through the customer portal is refused
    // rather than silently switched to another portal.
    if let Some(expected) = body.role {
        if login.user.role != expected {
            warn!(
                "Login for {} via {} portal returned role {}",
                mask_email(&body.email),
                expected,
                login.user.role
            );
            return Err(ApiError::Unauthorized {
                code: CODE_INVALID_CREDENTIALS.to_string(),
                message: ERR_INVALID_CREDENTIALS.to_string(),
            });
        }
    }

    let user = login.user.normalized();
    let mut manager = session_manager(&req, &gate, &cookies);
    let redirect_to = manager.login(&login.access_token, user.clone(), body.redirect_path.as_deref())?;

    Ok(attach_cookies(HttpResponse::Ok(), manager)
        .json(ApiResponse::success(MSG_LOGIN_SUCCESS, LoginResponse { redirect_to, user })))
}

/// End the current session
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Authentication",
    responses(
        (status = 200, description = "Logout successful; session cookies expired", body = LogoutResponse)
    )
)]
pub async fn logout(
    req: HttpRequest,
    gate: web::Data<RouteGate>,
    cookies: web::Data<CookieSettings>,
) -> HttpResponse {
    let mut manager = session_manager(&req, &gate, &cookies);
    let redirect_to = manager.logout().to_string();

    attach_cookies(HttpResponse::Ok(), manager)
        .json(ApiResponse::success(MSG_LOGOUT_SUCCESS, LogoutResponse { redirect_to }))
}

/// Get the session stored in the caller's cookies
#[utoipa::path(
    get,
    path = "/api/auth/session",
    tag = "Authentication",
    responses(
        (status = 200, description = "Active session", body = crate::models::Session),
        (status = 404, description = "No active session", body = crate::models::ErrorResponse)
    )
)]
pub async fn current_session(
    req: HttpRequest,
    gate: web::Data<RouteGate>,
    cookies: web::Data<CookieSettings>,
) -> Result<HttpResponse, ApiError> {
    let manager = session_manager(&req, &gate, &cookies);
    let session = manager.current_session().ok_or_else(no_session)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_SESSION_FOUND, session)))
}

/// Re-read the profile from the backend and pick up approval changes
///
/// Restaurant owners and delivery agents stay on their setup pages until an
/// admin approves them. This refreshes the stored approval flag without a new
/// login.
#[utoipa::path(
    post,
    path = "/api/auth/session/refresh",
    tag = "Authentication",
    responses(
        (status = 200, description = "Session refreshed", body = crate::models::Session),
        (status = 401, description = "Token rejected by backend", body = crate::models::ErrorResponse),
        (status = 404, description = "No active session", body = crate::models::ErrorResponse),
        (status = 502, description = "Backend unavailable", body = crate::models::ErrorResponse)
    )
)]
pub async fn refresh_session(
    req: HttpRequest,
    backend: web::Data<dyn AuthBackend>,
    gate: web::Data<RouteGate>,
    cookies: web::Data<CookieSettings>,
) -> Result<HttpResponse, ApiError> {
    let mut manager = session_manager(&req, &gate, &cookies);
    let token = manager.current_token().ok_or_else(no_session)?;
    if manager.current_session().is_none() {
        return Err(no_session());
    }

    let profile = backend.fetch_profile(&token).await?;
    let session = manager
        .update_approval(profile.is_approved)?
        .ok_or_else(no_session)?;
    info!(
        "Refreshed session for {} (approved: {})",
        mask_email(&session.email),
        session.is_approved
    );

    Ok(attach_cookies(HttpResponse::Ok(), manager)
        .json(ApiResponse::success(MSG_SESSION_REFRESHED, session)))
}
