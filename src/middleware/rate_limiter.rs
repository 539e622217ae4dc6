//! Rate limiting for the login endpoint.
//!
//! Every login is forwarded to the backend, so the gateway throttles
//! brute-force attempts before they leave the process.

use actix_governor::{GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor};
use actix_governor::governor::clock::QuantaInstant;
use actix_governor::governor::middleware::NoOpMiddleware;

pub type LoginRateLimit = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>>;

/// Create rate limiter configuration for the login endpoint.
///
/// Allows a burst of 5 requests with 1 request replenished every 6 seconds
/// (10 per minute) per peer IP.
///
/// Usage:
/// ```ignore
/// let config = create_login_rate_limiter_config();
/// web::resource("/login").wrap(Governor::new(&config))
/// ```
pub fn create_login_rate_limiter_config() -> LoginRateLimit {
    GovernorConfigBuilder::default()
        .seconds_per_request(6)
        .burst_size(5)
        .finish()
        .expect("Failed to create login rate limiter config")
}
