//! Error message constants used throughout the application.

// Authentication errors
pub const ERR_INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const ERR_NO_SESSION: &str = "No active session";
pub const ERR_INVALID_TOKEN: &str = "Invalid or expired token";

// Backend errors
pub const ERR_BACKEND_UNAVAILABLE: &str = "Authentication service is unavailable";
pub const ERR_BACKEND_RESPONSE: &str = "Unexpected response from authentication service";

// Validation errors
pub const ERR_INVALID_REDIRECT: &str = "Redirect path must be a local absolute path";
pub const ERR_VALIDATION_FAILED: &str = "Validation failed";

