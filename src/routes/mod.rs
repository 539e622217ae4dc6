use std::sync::Arc;

use actix_governor::Governor;
use actix_web::middleware::Condition;
use actix_web::{web, HttpResponse};
use utoipa::OpenApi;

use crate::handlers;
use crate::middleware::{LoginRateLimit, RouteGateMiddleware};
use crate::models::{HealthResponse, Role};
use crate::openapi::ApiDoc;
use crate::routing::RouteGate;
use crate::session::CookieSettings;

/// Shared pieces the route tree is built from.
#[derive(Clone)]
pub struct RouteOptions {
    pub gate: Arc<RouteGate>,
    pub cookies: CookieSettings,
    pub login_limiter: LoginRateLimit,
    pub rate_limit_login: bool,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig, options: &RouteOptions) {
    cfg.service(
        web::scope("/api")
            // Health check
            .route("/health", web::get().to(health_check))
            .route("/openapi.json", web::get().to(openapi_spec))
            // Session routes (public)
            .service(
                web::scope("/auth")
                    .service(
                        web::resource("/login")
                            .wrap(Condition::new(
                                options.rate_limit_login,
                                Governor::new(&options.login_limiter),
                            ))
                            .route(web::post().to(handlers::login)),
                    )
                    .route("/logout", web::post().to(handlers::logout))
                    .route("/session", web::get().to(handlers::current_session))
                    .route("/session/refresh", web::post().to(handlers::refresh_session)),
            )
            .route("/gate/decision", web::get().to(handlers::gate_decision)),
    );

    // Gated pages, one scope per role portal. Portal roots are fixed when the
    // app is built; a swapped table only changes what the gate decides.
    let table = options.gate.table();
    for role in Role::ALL {
        cfg.service(
            web::scope(table.base_route(role))
                .wrap(RouteGateMiddleware::new(
                    options.gate.clone(),
                    options.cookies.clone(),
                ))
                .route("/unauthorised", web::get().to(handlers::unauthorised_page))
                .route("", web::get().to(handlers::render_page))
                .route("/{page:.*}", web::get().to(handlers::render_page)),
        );
    }
}

/// Health check
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Gateway is running", body = HealthResponse)
    )
)]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        message: "Gateway is running".to_string(),
        timestamp: chrono::Utc::now(),
    })
}

async fn openapi_spec() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
