//! Per-request route access decision.
//!
//! The gate keeps no state between requests. Each evaluation is derived from
//! the requested path, the access token, the stored session record and the
//! current route table snapshot, and always ends in allow or redirect.

use log::{debug, warn};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

use crate::constants::HOME_PATH;
use crate::models::{Role, Session};
use crate::services::TokenCodec;
use crate::utils::log_sanitizer::mask_token;

use super::prefix::normalize_path;
use super::route_table::{RouteTable, RouteTableError};

/// Who is asking, as far as the gate can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessState {
    Anonymous,
    Unapproved(Role),
    Approved(Role),
}

impl AccessState {
    pub fn role(&self) -> Option<Role> {
        match self {
            AccessState::Anonymous => None,
            AccessState::Unapproved(role) | AccessState::Approved(role) => Some(*role),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccessState::Anonymous => "anonymous",
            AccessState::Unapproved(_) => "unapproved",
            AccessState::Approved(_) => "approved",
        }
    }
}

impl fmt::Display for AccessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.role() {
            Some(role) => write!(f, "{}({})", self.label(), role),
            None => f.write_str(self.label()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Redirect(String),
}

impl GateDecision {
    pub fn is_allow(&self) -> bool {
        matches!(self, GateDecision::Allow)
    }
}

/// Decision plus what the middleware needs to finish the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateVerdict {
    pub state: AccessState,
    pub decision: GateDecision,
    /// A token was presented but could not be trusted; the cookies should be
    /// expired so the next request starts clean.
    pub clear_credentials: bool,
}

/// Redirect unless the target is the page being requested, in which case the
/// table is inconsistent and looping would be worse than letting it through.
fn redirect(from: &str, to: &str) -> GateDecision {
    if normalize_path(to) == from {
        warn!("Suppressed redirect loop on {}; check the route table", from);
        GateDecision::Allow
    } else {
        GateDecision::Redirect(to.to_string())
    }
}

/// Decide access for `path`. `identity` is the role from the token and the
/// approval flag from the session record, or `None` when anonymous.
pub fn decide(table: &RouteTable, path: &str, identity: Option<(Role, bool)>) -> GateDecision {
    let path = normalize_path(path);

    let Some((role, is_approved)) = identity else {
        if table.is_login_path(path) {
            return GateDecision::Allow;
        }
        return redirect(path, HOME_PATH);
    };

    let Some(routes) = table.routes_for(role) else {
        warn!("No route table entry for role {}", role);
        return redirect(path, HOME_PATH);
    };

    if role.requires_approval() && !is_approved {
        if routes.unapproved_prefixes.matches(path) {
            return GateDecision::Allow;
        }
        return redirect(path, &table.unauthorised_path(role));
    }

    let dashboard = routes.dashboard.as_str();
    if table.is_landing_key(path) && path != normalize_path(dashboard) {
        return redirect(path, dashboard);
    }

    let is_login = table.is_login_path(path);
    let has_access = routes.allowed_prefixes.matches(path);
    if !has_access && !is_login {
        return redirect(path, dashboard);
    }

    if is_login {
        return redirect(path, dashboard);
    }

    GateDecision::Allow
}

/// Route gate shared by every worker. The table sits behind a lock only so a
/// validated replacement can be swapped in; evaluations clone the current
/// snapshot and never hold the lock while deciding.
pub struct RouteGate {
    table: RwLock<Arc<RouteTable>>,
    codec: Arc<dyn TokenCodec>,
}

impl RouteGate {
    pub fn new(table: RouteTable, codec: Arc<dyn TokenCodec>) -> Self {
        Self {
            table: RwLock::new(Arc::new(table)),
            codec,
        }
    }

    pub fn table(&self) -> Arc<RouteTable> {
        Arc::clone(&self.table.read())
    }

    /// Install a new table after validating it. The old table stays in place
    /// when validation fails.
    pub fn replace_table(&self, table: RouteTable) -> Result<(), RouteTableError> {
        table.validate()?;
        *self.table.write() = Arc::new(table);
        Ok(())
    }

    pub fn codec_name(&self) -> &'static str {
        self.codec.name()
    }

    /// Resolve who is asking. The second value is true when a presented token
    /// had to be discarded.
    pub fn resolve(&self, token: Option<&str>, session: Option<&Session>) -> (AccessState, bool) {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return (AccessState::Anonymous, false);
        };

        let claims = match self.codec.decode(token) {
            Ok(claims) => claims,
            Err(e) => {
                warn!("Rejected access token {}: {}", mask_token(token), e);
                return (AccessState::Anonymous, true);
            }
        };

        let Some(session) = session else {
            warn!(
                "Token for role {} has no session record; possible storage desync",
                claims.role
            );
            return (AccessState::Anonymous, true);
        };

        if !claims.matches_session(session) {
            warn!(
                "Token subject does not match session {}; treating as logged out",
                session.id
            );
            return (AccessState::Anonymous, true);
        }

        let role = claims.role;
        if session.is_approved_as(role) {
            (AccessState::Approved(role), false)
        } else {
            (AccessState::Unapproved(role), false)
        }
    }

    pub fn evaluate(&self, path: &str, token: Option<&str>, session: Option<&Session>) -> GateVerdict {
        let (state, clear_credentials) = self.resolve(token, session);
        let identity = match state {
            AccessState::Anonymous => None,
            AccessState::Unapproved(role) => Some((role, false)),
            AccessState::Approved(role) => Some((role, true)),
        };
        let table = self.table();
        let decision = decide(&table, path, identity);
        debug!("Gate {} {} -> {:?}", state, path, decision);
        GateVerdict {
            state,
            decision,
            clear_credentials,
        }
    }
}
