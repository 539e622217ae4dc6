//! Durable storage for the access token and the session record.
//!
//! The record is persisted as base64url-encoded JSON so it survives cookie
//! value restrictions. Plain JSON written by the legacy front end is still
//! accepted on read.

use actix_web::cookie::Cookie;
use actix_web::HttpRequest;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use log::warn;

use crate::errors::ApiError;
use crate::models::Session;

use super::cookies::CookieSettings;

/// Key-value capability behind which the session lives. Reads never fail:
/// anything missing or unreadable is reported as no session.
pub trait SessionStore {
    fn read_token(&self) -> Option<String>;
    fn read(&self) -> Option<Session>;
    fn write(&mut self, token: &str, session: &Session) -> Result<(), ApiError>;
    fn clear(&mut self);
}

pub fn encode_session(session: &Session) -> Result<String, ApiError> {
    let json = serde_json::to_vec(session)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

pub fn decode_session(raw: &str) -> Option<Session> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.starts_with('{') {
        return match serde_json::from_str(raw) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!("Discarding corrupt session record: {}", e);
                None
            }
        };
    }
    let bytes = match URL_SAFE_NO_PAD.decode(raw) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Discarding undecodable session record: {}", e);
            return None;
        }
    };
    match serde_json::from_slice(&bytes) {
        Ok(session) => Some(session),
        Err(e) => {
            warn!("Discarding corrupt session record: {}", e);
            None
        }
    }
}

/// In-process store, used by tests and anything that does not speak HTTP.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    token: Option<String>,
    record: Option<String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an arbitrary raw record, corrupt or not.
    pub fn with_raw(token: Option<&str>, record: Option<&str>) -> Self {
        Self {
            token: token.map(str::to_string),
            record: record.map(str::to_string),
        }
    }

    pub fn raw_record(&self) -> Option<&str> {
        self.record.as_deref()
    }
}

impl SessionStore for MemorySessionStore {
    fn read_token(&self) -> Option<String> {
        self.token.clone()
    }

    fn read(&self) -> Option<Session> {
        self.record.as_deref().and_then(decode_session)
    }

    fn write(&mut self, token: &str, session: &Session) -> Result<(), ApiError> {
        self.record = Some(encode_session(session)?);
        self.token = Some(token.to_string());
        Ok(())
    }

    fn clear(&mut self) {
        self.token = None;
        self.record = None;
    }
}

/// Store backed by the request's cookies. Writes are collected as
/// `Set-Cookie` values for the response; later reads see the new values.
pub struct CookieSessionStore {
    settings: CookieSettings,
    token: Option<String>,
    record: Option<String>,
    pending: Vec<Cookie<'static>>,
}

impl CookieSessionStore {
    pub fn from_request(req: &HttpRequest, settings: &CookieSettings) -> Self {
        let read = |name: &str| {
            req.cookie(name)
                .map(|cookie| cookie.value().to_string())
                .filter(|value| !value.is_empty())
        };
        Self {
            token: read(&settings.token_cookie),
            record: read(&settings.user_cookie),
            settings: settings.clone(),
            pending: Vec::new(),
        }
    }

    /// Cookies to attach to the response.
    pub fn into_cookies(self) -> Vec<Cookie<'static>> {
        self.pending
    }

    fn stage(&mut self, cookie: Cookie<'static>) {
        self.pending.retain(|c| c.name() != cookie.name());
        self.pending.push(cookie);
    }
}

impl SessionStore for CookieSessionStore {
    fn read_token(&self) -> Option<String> {
        self.token.clone()
    }

    fn read(&self) -> Option<Session> {
        self.record.as_deref().and_then(decode_session)
    }

    fn write(&mut self, token: &str, session: &Session) -> Result<(), ApiError> {
        let record = encode_session(session)?;
        let token_cookie = self
            .settings
            .session_cookie(&self.settings.token_cookie, token.to_string());
        let user_cookie = self
            .settings
            .session_cookie(&self.settings.user_cookie, record.clone());
        self.stage(token_cookie);
        self.stage(user_cookie);
        self.token = Some(token.to_string());
        self.record = Some(record);
        Ok(())
    }

    fn clear(&mut self) {
        for cookie in self.settings.removal_cookies() {
            self.stage(cookie);
        }
        self.token = None;
        self.record = None;
    }
}
