//! Session lifecycle: login, logout, approval refresh.

use log::{info, warn};
use std::sync::Arc;

use crate::constants::HOME_PATH;
use crate::errors::ApiError;
use crate::models::{Role, Session};
use crate::routing::RouteTable;
use crate::utils::log_sanitizer::mask_email;

use super::store::SessionStore;

/// Owns the session for one client. Navigation side effects are returned as
/// target paths; the caller decides how to deliver them.
pub struct SessionManager<S: SessionStore> {
    store: S,
    table: Arc<RouteTable>,
}

impl<S: SessionStore> SessionManager<S> {
    pub fn new(store: S, table: Arc<RouteTable>) -> Self {
        Self { store, table }
    }

    /// Persist the token and record, then return where to navigate:
    /// `redirect_path` when given, otherwise the role's landing page.
    pub fn login(
        &mut self,
        token: &str,
        session: Session,
        redirect_path: Option<&str>,
    ) -> Result<String, ApiError> {
        let session = session.normalized();
        self.store.write(token, &session)?;
        info!(
            "Session started for {} as {} (approved: {})",
            mask_email(&session.email),
            session.role,
            session.is_approved
        );
        let target = match redirect_path {
            Some(path) => path.to_string(),
            None => self.dashboard_for(session.role, session.is_approved).to_string(),
        };
        Ok(target)
    }

    /// Drop the session and return the anonymous landing page.
    pub fn logout(&mut self) -> &'static str {
        if let Some(session) = self.store.read() {
            info!("Session ended for {}", mask_email(&session.email));
        }
        self.store.clear();
        HOME_PATH
    }

    pub fn current_session(&self) -> Option<Session> {
        self.store.read()
    }

    pub fn current_token(&self) -> Option<String> {
        self.store.read_token()
    }

    /// Rewrite the stored record with a new approval flag, keeping the token.
    /// Returns `None` when there is no session to update.
    pub fn update_approval(&mut self, is_approved: bool) -> Result<Option<Session>, ApiError> {
        let (Some(token), Some(session)) = (self.store.read_token(), self.store.read()) else {
            warn!("Approval update requested without an active session");
            return Ok(None);
        };
        let updated = session.with_approval(is_approved);
        if updated.is_approved != session.is_approved {
            info!(
                "Approval for {} changed to {}",
                mask_email(&updated.email),
                updated.is_approved
            );
        }
        self.store.write(&token, &updated)?;
        Ok(Some(updated))
    }

    pub fn dashboard_for(&self, role: Role, is_approved: bool) -> &str {
        self.table.dashboard_for(role, is_approved)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
