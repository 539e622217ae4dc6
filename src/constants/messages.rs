//! Success message constants used throughout the application.

pub const MSG_LOGIN_SUCCESS: &str = "Login successful";
pub const MSG_LOGOUT_SUCCESS: &str = "Logout successful";
pub const MSG_SESSION_FOUND: &str = "Active session";
pub const MSG_SESSION_REFRESHED: &str = "Session refreshed";
pub const MSG_GATE_DECISION: &str = "Gate decision";

// Unauthorised page
pub const MSG_ACCESS_DENIED_TITLE: &str = "Access Denied";
pub const MSG_ACCESS_DENIED_BODY: &str = "You do not have permission to view this page.";
