//! Response models for API endpoints.

mod api;
mod auth;
mod gate;

pub use api::*;
pub use auth::*;
pub use gate::*;
