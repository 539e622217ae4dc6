//! Default cookie names shared with the front end.

pub const DEFAULT_TOKEN_COOKIE: &str = "token";
pub const DEFAULT_USER_COOKIE: &str = "user";
pub const COOKIE_PATH: &str = "/";
