//! HTTP middleware and request helpers.

pub mod rate_limiter;
pub mod request_ext;
pub mod route_gate;

pub use rate_limiter::{create_login_rate_limiter_config, LoginRateLimit};
pub use request_ext::RequestExt;
pub use route_gate::RouteGateMiddleware;
