//! Route gate middleware for page navigation.

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpMessage, HttpResponse,
};
use futures::future::{ok, LocalBoxFuture, Ready};
use log::{debug, warn};
use std::rc::Rc;
use std::sync::Arc;

use crate::routing::{GateDecision, RouteGate};
use crate::session::{CookieSessionStore, CookieSettings, SessionStore};

/// Route gate middleware.
///
/// Reads the token and session cookies, asks the [`RouteGate`] for a verdict
/// and either passes the request on or answers with a `302 Found`. The
/// resolved [`AccessState`](crate::routing::AccessState) is stored in the
/// request extensions for the page handlers. Rejected credentials are expired
/// on whatever response goes back.
#[derive(Clone)]
pub struct RouteGateMiddleware {
    gate: Arc<RouteGate>,
    cookies: CookieSettings,
}

impl RouteGateMiddleware {
    pub fn new(gate: Arc<RouteGate>, cookies: CookieSettings) -> Self {
        Self { gate, cookies }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RouteGateMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RouteGateMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(RouteGateMiddlewareService {
            service: Rc::new(service),
            gate: Arc::clone(&self.gate),
            cookies: self.cookies.clone(),
        })
    }
}

pub struct RouteGateMiddlewareService<S> {
    service: Rc<S>,
    gate: Arc<RouteGate>,
    cookies: CookieSettings,
}

impl<S, B> Service<ServiceRequest> for RouteGateMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let gate = Arc::clone(&self.gate);
        let cookies = self.cookies.clone();

        Box::pin(async move {
            let store = CookieSessionStore::from_request(req.request(), &cookies);
            let token = store.read_token();
            let session = store.read();
            let verdict = gate.evaluate(req.path(), token.as_deref(), session.as_ref());

            req.extensions_mut().insert(verdict.state);

            match verdict.decision {
                GateDecision::Redirect(location) => {
                    debug!("Redirecting {} to {}", req.path(), location);
                    let mut response = HttpResponse::Found();
                    response.insert_header((header::LOCATION, location));
                    if verdict.clear_credentials {
                        for cookie in cookies.removal_cookies() {
                            response.cookie(cookie);
                        }
                    }
                    Ok(req.into_response(response.finish()).map_into_right_body())
                }
                GateDecision::Allow => {
                    let mut res = service.call(req).await?;
                    if verdict.clear_credentials {
                        for cookie in cookies.removal_cookies() {
                            if let Err(e) = res.response_mut().add_cookie(&cookie) {
                                warn!("Could not expire cookie {}: {}", cookie.name(), e);
                            }
                        }
                    }
                    Ok(res.map_into_left_body())
                }
            }
        })
    }
}
