//! Application constants module.
//!
//! This module centralizes the constant strings used throughout the gateway:
//! error messages, success messages, error codes, cookie names and fixed paths.

pub mod cookies;
pub mod error_codes;
pub mod errors;
pub mod messages;
pub mod paths;

pub use cookies::*;
pub use error_codes::*;
pub use errors::*;
pub use messages::*;
pub use paths::*;
