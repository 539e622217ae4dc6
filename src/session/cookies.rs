//! Cookie attributes shared by every cookie the gateway sets.

use actix_web::cookie::{Cookie, SameSite};

use crate::constants::{COOKIE_PATH, DEFAULT_TOKEN_COOKIE, DEFAULT_USER_COOKIE};

#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub token_cookie: String,
    pub user_cookie: String,
    pub secure: bool,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            token_cookie: DEFAULT_TOKEN_COOKIE.to_string(),
            user_cookie: DEFAULT_USER_COOKIE.to_string(),
            secure: false,
        }
    }
}

impl CookieSettings {
    /// Site-wide, lax cookie. Not `HttpOnly`: the front end reads the token
    /// to build its `Authorization` header.
    pub fn session_cookie(&self, name: &str, value: String) -> Cookie<'static> {
        Cookie::build(name.to_string(), value)
            .path(COOKIE_PATH)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .http_only(false)
            .finish()
    }

    /// Expired copies of both session cookies.
    pub fn removal_cookies(&self) -> Vec<Cookie<'static>> {
        [&self.token_cookie, &self.user_cookie]
            .into_iter()
            .map(|name| {
                let mut cookie = self.session_cookie(name, String::new());
                cookie.make_removal();
                cookie
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let settings = CookieSettings {
            secure: true,
            ..CookieSettings::default()
        };
        let cookie = settings.session_cookie("token", "abc".to_string());
        assert_eq!(cookie.name(), "token");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }

    #[test]
    fn test_removal_cookies_expire_both() {
        let removals = CookieSettings::default().removal_cookies();
        let names: Vec<&str> = removals.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["token", "user"]);
        for cookie in &removals {
            assert_eq!(cookie.value(), "");
            assert_eq!(cookie.max_age(), Some(actix_web::cookie::time::Duration::ZERO));
        }
    }
}
