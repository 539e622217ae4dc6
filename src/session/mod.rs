//! Client-side session state: the token and user record kept in cookies.

pub mod cookies;
pub mod manager;
pub mod store;

pub use cookies::CookieSettings;
pub use manager::SessionManager;
pub use store::{decode_session, encode_session, CookieSessionStore, MemorySessionStore, SessionStore};
