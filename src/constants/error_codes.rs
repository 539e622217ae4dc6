//! Error code constants for API responses.
//!
//! These codes provide a machine-readable identifier for each error type,
//! making it easier for API clients to handle errors programmatically.

// Validation errors
pub const CODE_VALIDATION_FAILED: &str = "VALIDATION_FAILED";
pub const CODE_INVALID_REDIRECT: &str = "INVALID_REDIRECT";

// Authentication errors
pub const CODE_INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
pub const CODE_SESSION_NOT_FOUND: &str = "SESSION_NOT_FOUND";
pub const CODE_INVALID_TOKEN: &str = "INVALID_TOKEN";

// Backend errors
pub const CODE_BACKEND_UNAVAILABLE: &str = "BACKEND_UNAVAILABLE";
pub const CODE_BACKEND_RESPONSE: &str = "BACKEND_RESPONSE";

// Generic errors
pub const CODE_INTERNAL_ERROR: &str = "INTERNAL_ERROR";
