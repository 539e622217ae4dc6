//! On-demand gate evaluation for client-side navigation.

use actix_web::{web, HttpRequest, HttpResponse};

use crate::constants::{HOME_PATH, MSG_GATE_DECISION};
use crate::errors::ApiError;
use crate::models::{ApiResponse, GateDecisionResponse, GateQuery};
use crate::routing::{GateDecision, RouteGate};
use crate::session::{CookieSessionStore, CookieSettings, SessionStore};
use crate::validators::validate_local_path;

/// Evaluate the route gate for a path with the caller's cookies
///
/// Lets a single-page client apply the same decision the page middleware
/// would, before it replaces the route.
#[utoipa::path(
    get,
    path = "/api/gate/decision",
    tag = "Gate",
    params(GateQuery),
    responses(
        (status = 200, description = "Gate decision", body = GateDecisionResponse),
        (status = 400, description = "Path is not a local absolute path", body = crate::models::ErrorResponse)
    )
)]
pub async fn gate_decision(
    req: HttpRequest,
    gate: web::Data<RouteGate>,
    cookies: web::Data<CookieSettings>,
    query: web::Query<GateQuery>,
) -> Result<HttpResponse, ApiError> {
    validate_local_path(&query.path)?;
    let path = query
        .path
        .split(&['?', '#'][..])
        .next()
        .unwrap_or(HOME_PATH);

    let store = CookieSessionStore::from_request(&req, &cookies);
    let verdict = gate.evaluate(path, store.read_token().as_deref(), store.read().as_ref());

    let (decision, location) = match verdict.decision {
        GateDecision::Allow => ("allow", None),
        GateDecision::Redirect(location) => ("redirect", Some(location)),
    };

    let mut response = HttpResponse::Ok();
    if verdict.clear_credentials {
        for cookie in cookies.removal_cookies() {
            response.cookie(cookie);
        }
    }
    Ok(response.json(ApiResponse::success(
        MSG_GATE_DECISION,
        GateDecisionResponse {
            path: path.to_string(),
            decision: decision.to_string(),
            location,
            state: verdict.state.label().to_string(),
        },
    )))
}
