//! Fixed navigation paths.

/// Anonymous landing page; also the logout target.
pub const HOME_PATH: &str = "/";

/// Segment appended to a role's base route for the unapproved landing page.
pub const UNAUTHORISED_SEGMENT: &str = "unauthorised";
