//! Role-based route gate and session broker for the Cravings platform.
//!
//! Every page request under a role portal is checked against the route
//! table before it is served. Login and logout are brokered against the
//! REST backend and the resulting session is kept in two cookies.

pub mod config;
pub mod constants;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod routing;
pub mod services;
pub mod session;
pub mod utils;
pub mod validators;
