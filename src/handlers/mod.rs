//! HTTP request handlers organized by domain.

pub mod auth_handler;
pub mod gate_handler;
pub mod page_handler;

pub use auth_handler::*;
pub use gate_handler::*;
pub use page_handler::*;
