use std::env;
use std::time::Duration;

use lazy_static::lazy_static;

use crate::constants::{DEFAULT_TOKEN_COOKIE, DEFAULT_USER_COOKIE};
use crate::services::TokenMode;
use crate::session::CookieSettings;

lazy_static! {
    pub static ref CONFIG: Config = Config::from_env();
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub jwt_secret: String,
    pub token_mode: TokenMode,
    pub auth_backend_url: String,
    pub backend_timeout: Duration,
    pub token_cookie: String,
    pub user_cookie: String,
    pub cookie_secure: bool,
    pub route_table_path: Option<String>,
    pub login_rate_limit: bool,
}

fn flag(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("SERVER_PORT must be a valid number"),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-super-secret-jwt-key-change-in-production".to_string()),
            token_mode: env::var("TOKEN_VERIFICATION")
                .unwrap_or_else(|_| "verifying".to_string())
                .parse()
                .expect("TOKEN_VERIFICATION must be 'verifying' or 'trusting'"),
            auth_backend_url: env::var("AUTH_BACKEND_URL")
                .unwrap_or_else(|_| "http://localhost:5000/api".to_string()),
            backend_timeout: Duration::from_secs(
                env::var("AUTH_BACKEND_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .expect("AUTH_BACKEND_TIMEOUT_SECS must be a valid number"),
            ),
            token_cookie: env::var("TOKEN_COOKIE")
                .unwrap_or_else(|_| DEFAULT_TOKEN_COOKIE.to_string()),
            user_cookie: env::var("USER_COOKIE").unwrap_or_else(|_| DEFAULT_USER_COOKIE.to_string()),
            cookie_secure: flag("COOKIE_SECURE", false),
            route_table_path: env::var("ROUTE_TABLE_PATH")
                .ok()
                .filter(|path| !path.trim().is_empty()),
            login_rate_limit: flag("LOGIN_RATE_LIMIT", true),
        }
    }

    pub fn cookie_settings(&self) -> CookieSettings {
        CookieSettings {
            token_cookie: self.token_cookie.clone(),
            user_cookie: self.user_cookie.clone(),
            secure: self.cookie_secure,
        }
    }
}
