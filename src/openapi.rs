use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::constants::DEFAULT_TOKEN_COOKIE;
use crate::models::{
    ErrorResponse, GateDecisionResponse, HealthResponse, LoginRequest, LoginResponse,
    LogoutResponse, Role, Session,
};

/// OpenAPI documentation for the Cravings gateway API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cravings Gateway API",
        version = "0.1.0",
        description = "Session broker and role-based route gate for the Cravings food delivery platform.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Authentication", description = "Login, logout and session endpoints"),
        (name = "Gate", description = "Route access decisions")
    ),
    paths(
        crate::handlers::login,
        crate::handlers::logout,
        crate::handlers::current_session,
        crate::handlers::refresh_session,
        crate::handlers::gate_decision,
        crate::routes::health_check
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            LogoutResponse,
            Role,
            Session,
            GateDecisionResponse,
            ErrorResponse,
            HealthResponse
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Session cookie set by `/api/auth/login`
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    DEFAULT_TOKEN_COOKIE,
                    "Access token cookie set by the /api/auth/login endpoint",
                ))),
            );
        }
    }
}
