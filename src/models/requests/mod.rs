//! Request models for API endpoints.

mod auth;
mod gate;

pub use auth::*;
pub use gate::*;
