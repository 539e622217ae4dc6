//! Role to page-ownership table.
//!
//! One entry per role: its dashboard, its login page, the prefixes it may
//! visit, and the subset it may visit while waiting for approval. The table
//! is validated once at startup and never mutated afterwards.

use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::constants::{HOME_PATH, UNAUTHORISED_SEGMENT};
use crate::models::Role;

use super::prefix::{normalize_path, PrefixSet};

#[derive(Debug, Error)]
pub enum RouteTableError {
    #[error("route table has no entry for role '{0}'")]
    MissingRole(Role),
    #[error("role '{role}': path '{path}' must be absolute")]
    RelativePath { role: Role, path: String },
    #[error("role '{role}': dashboard '{dashboard}' is not in its allowed prefixes")]
    DashboardNotAllowed { role: Role, dashboard: String },
    #[error("role '{role}': unapproved prefix '{prefix}' is not in its allowed prefixes")]
    UnapprovedNotAllowed { role: Role, prefix: String },
    #[error("role '{role}': '{path}' must be reachable while unapproved")]
    UnapprovedLandingMissing { role: Role, path: String },
    #[error("role '{0}' requires approval but has no pending path")]
    MissingPendingPath(Role),
    #[error("role '{role}': allowed prefix '{path}' is another role's landing path")]
    ForeignLandingPath { role: Role, path: String },
    #[error("role '{role}': base route '{path}' is already used by another role")]
    DuplicateBaseRoute { role: Role, path: String },
    #[error("failed to read route table: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse route table: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Pages owned by a single role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRoutes {
    /// Portal root. Defaults to the role's conventional base route when a
    /// table file leaves it out.
    #[serde(default)]
    pub base_route: String,
    pub dashboard: String,
    pub login_path: String,
    /// Landing page while unapproved; required for roles that need approval.
    #[serde(default)]
    pub pending_path: Option<String>,
    pub allowed_prefixes: PrefixSet,
    #[serde(default)]
    pub unapproved_prefixes: PrefixSet,
}

impl RoleRoutes {
    fn new(
        base_route: &str,
        dashboard: &str,
        login_path: &str,
        pending_path: Option<&str>,
        allowed: &[&str],
        unapproved: &[&str],
    ) -> Self {
        Self {
            base_route: base_route.to_string(),
            dashboard: dashboard.to_string(),
            login_path: login_path.to_string(),
            pending_path: pending_path.map(str::to_string),
            allowed_prefixes: PrefixSet::new(allowed.iter().copied()),
            unapproved_prefixes: PrefixSet::new(unapproved.iter().copied()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "HashMap<Role, RoleRoutes>",
    into = "HashMap<Role, RoleRoutes>"
)]
pub struct RouteTable {
    roles: HashMap<Role, RoleRoutes>,
}

impl From<HashMap<Role, RoleRoutes>> for RouteTable {
    fn from(roles: HashMap<Role, RoleRoutes>) -> Self {
        Self::from_roles(roles)
    }
}

impl From<RouteTable> for HashMap<Role, RoleRoutes> {
    fn from(table: RouteTable) -> Self {
        table.roles
    }
}

impl RouteTable {
    /// Table matching the pages the Cravings front end ships.
    pub fn builtin() -> Self {
        let mut roles = HashMap::new();
        roles.insert(
            Role::Admin,
            RoleRoutes::new(
                "/admin",
                "/admin/dashboard",
                "/admin/login",
                None,
                &[
                    "/admin/dashboard",
                    "/admin/delivery-agents",
                    "/admin/orders",
                    "/admin/restaurants",
                    "/admin/users",
                ],
                &[],
            ),
        );
        roles.insert(
            Role::Customer,
            RoleRoutes::new(
                "/user",
                "/user/home",
                "/user/login",
                None,
                &[
                    "/user/home",
                    "/user/cart",
                    "/user/history",
                    "/user/orders",
                    "/user/restaurant",
                    "/user/profile",
                ],
                &[],
            ),
        );
        roles.insert(
            Role::DeliveryAgent,
            RoleRoutes::new(
                "/delivery",
                "/delivery/orders",
                "/delivery/login",
                Some("/delivery/profile"),
                &[
                    "/delivery/orders",
                    "/delivery/my-deliveries",
                    "/delivery/history",
                    "/delivery/profile",
                    "/delivery/unauthorised",
                ],
                &["/delivery/profile", "/delivery/unauthorised"],
            ),
        );
        roles.insert(
            Role::RestaurantOwner,
            RoleRoutes::new(
                "/restaurant",
                "/restaurant/dashboard",
                "/restaurant/login",
                Some("/restaurant/setup"),
                &[
                    "/restaurant/dashboard",
                    "/restaurant/orders",
                    "/restaurant/menu",
                    "/restaurant/financials",
                    "/restaurant/profile",
                    "/restaurant/setup",
                    "/restaurant/unauthorised",
                ],
                &["/restaurant/setup", "/restaurant/unauthorised"],
            ),
        );
        Self { roles }
    }

    /// Build a table from per-role entries, filling in missing base routes.
    pub fn from_roles(mut roles: HashMap<Role, RoleRoutes>) -> Self {
        for (role, routes) in roles.iter_mut() {
            if routes.base_route.is_empty() {
                routes.base_route = role.base_route().to_string();
            }
        }
        Self { roles }
    }

    /// Parse and validate a JSON table keyed by role wire name.
    pub fn from_json(raw: &str) -> Result<Self, RouteTableError> {
        let table: RouteTable = serde_json::from_str(raw)?;
        table.validate()?;
        Ok(table)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, RouteTableError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let table = Self::from_json(&raw)?;
        info!("Loaded route table from {}", path.display());
        Ok(table)
    }

    /// Check the structural invariants the gate relies on to never loop.
    pub fn validate(&self) -> Result<(), RouteTableError> {
        for role in Role::ALL {
            let routes = self
                .roles
                .get(&role)
                .ok_or(RouteTableError::MissingRole(role))?;

            let fixed = [
                Some(&routes.base_route),
                Some(&routes.dashboard),
                Some(&routes.login_path),
                routes.pending_path.as_ref(),
            ];
            let listed = routes
                .allowed_prefixes
                .iter()
                .chain(routes.unapproved_prefixes.iter());
            for path in fixed.into_iter().flatten().map(String::as_str).chain(listed) {
                if !path.starts_with('/') {
                    return Err(RouteTableError::RelativePath {
                        role,
                        path: path.to_string(),
                    });
                }
            }

            if !routes.allowed_prefixes.matches(&routes.dashboard) {
                return Err(RouteTableError::DashboardNotAllowed {
                    role,
                    dashboard: routes.dashboard.clone(),
                });
            }

            if let Some(prefix) = routes
                .unapproved_prefixes
                .iter()
                .find(|prefix| !routes.allowed_prefixes.matches(prefix))
            {
                return Err(RouteTableError::UnapprovedNotAllowed {
                    role,
                    prefix: prefix.to_string(),
                });
            }

            if role.requires_approval() {
                let unauthorised = self.unauthorised_path(role);
                if !routes.unapproved_prefixes.matches(&unauthorised) {
                    return Err(RouteTableError::UnapprovedLandingMissing {
                        role,
                        path: unauthorised,
                    });
                }
                let pending = routes
                    .pending_path
                    .as_deref()
                    .ok_or(RouteTableError::MissingPendingPath(role))?;
                if !routes.unapproved_prefixes.matches(pending) {
                    return Err(RouteTableError::UnapprovedLandingMissing {
                        role,
                        path: pending.to_string(),
                    });
                }
            }

            let base_route = normalize_path(&routes.base_route);
            if self
                .roles
                .iter()
                .any(|(other, theirs)| *other != role && normalize_path(&theirs.base_route) == base_route)
            {
                return Err(RouteTableError::DuplicateBaseRoute {
                    role,
                    path: routes.base_route.clone(),
                });
            }

            let foreign: Vec<&str> = self
                .roles
                .iter()
                .filter(|(other, _)| **other != role)
                .flat_map(|(_, theirs)| {
                    [
                        normalize_path(&theirs.base_route),
                        normalize_path(&theirs.dashboard),
                    ]
                })
                .collect();
            if let Some(path) = routes
                .allowed_prefixes
                .iter()
                .find(|path| foreign.contains(&normalize_path(path)))
            {
                return Err(RouteTableError::ForeignLandingPath {
                    role,
                    path: path.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn routes_for(&self, role: Role) -> Option<&RoleRoutes> {
        self.roles.get(&role)
    }

    /// Portal root for `role`.
    pub fn base_route(&self, role: Role) -> &str {
        self.roles
            .get(&role)
            .map(|routes| routes.base_route.as_str())
            .unwrap_or_else(|| role.base_route())
    }

    /// Where an unapproved member of `role` is sent when they wander off the
    /// allowlist.
    pub fn unauthorised_path(&self, role: Role) -> String {
        format!(
            "{}/{}",
            normalize_path(self.base_route(role)),
            UNAUTHORISED_SEGMENT
        )
    }

    /// Landing page after login: the pending page for roles still awaiting
    /// approval, otherwise the dashboard.
    pub fn dashboard_for(&self, role: Role, is_approved: bool) -> &str {
        let Some(routes) = self.roles.get(&role) else {
            return HOME_PATH;
        };
        if role.requires_approval() && !is_approved {
            if let Some(pending) = routes.pending_path.as_deref() {
                return pending;
            }
        }
        &routes.dashboard
    }

    pub fn is_login_path(&self, path: &str) -> bool {
        let path = normalize_path(path);
        self.roles
            .values()
            .any(|routes| normalize_path(&routes.login_path) == path)
    }

    /// Role base routes and dashboards: the shapes a stale bookmark tends to
    /// point at.
    pub fn is_landing_key(&self, path: &str) -> bool {
        let path = normalize_path(path);
        self.roles
            .values()
            .any(|routes| {
                normalize_path(&routes.base_route) == path || normalize_path(&routes.dashboard) == path
            })
    }

    pub fn login_paths(&self) -> impl Iterator<Item = &str> {
        self.roles.values().map(|routes| routes.login_path.as_str())
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_is_valid() {
        RouteTable::builtin().validate().unwrap();
    }

    #[test]
    fn test_dashboard_for() {
        let table = RouteTable::builtin();
        assert_eq!(table.dashboard_for(Role::Customer, false), "/user/home");
        assert_eq!(table.dashboard_for(Role::Admin, false), "/admin/dashboard");
        assert_eq!(
            table.dashboard_for(Role::RestaurantOwner, false),
            "/restaurant/setup"
        );
        assert_eq!(
            table.dashboard_for(Role::RestaurantOwner, true),
            "/restaurant/dashboard"
        );
        assert_eq!(table.dashboard_for(Role::DeliveryAgent, false), "/delivery/profile");
        assert_eq!(table.dashboard_for(Role::DeliveryAgent, true), "/delivery/orders");
    }

    #[test]
    fn test_missing_role_falls_back_home() {
        let mut roles = RouteTable::builtin().roles;
        roles.remove(&Role::Admin);
        let table = RouteTable::from_roles(roles);
        assert_eq!(table.dashboard_for(Role::Admin, true), "/");
        assert!(matches!(
            table.validate(),
            Err(RouteTableError::MissingRole(Role::Admin))
        ));
    }

    #[test]
    fn test_login_and_landing_keys() {
        let table = RouteTable::builtin();
        assert!(table.is_login_path("/restaurant/login"));
        assert!(table.is_login_path("/user/login/"));
        assert!(!table.is_login_path("/user/login/extra"));
        assert!(table.is_landing_key("/admin"));
        assert!(table.is_landing_key("/delivery/orders"));
        assert!(!table.is_landing_key("/user/cart"));
        assert_eq!(table.login_paths().count(), 4);
    }

    #[test]
    fn test_rejects_dashboard_outside_allowed() {
        let mut roles = RouteTable::builtin().roles;
        roles.get_mut(&Role::Admin).unwrap().dashboard = "/admin/overview".to_string();
        let err = RouteTable::from_roles(roles).validate().unwrap_err();
        assert!(matches!(err, RouteTableError::DashboardNotAllowed { role: Role::Admin, .. }));
    }

    #[test]
    fn test_rejects_unapproved_outside_allowed() {
        let mut roles = RouteTable::builtin().roles;
        roles.get_mut(&Role::RestaurantOwner).unwrap().unapproved_prefixes =
            PrefixSet::new(["/restaurant/setup", "/restaurant/unauthorised", "/restaurant/help"]);
        let err = RouteTable::from_roles(roles).validate().unwrap_err();
        assert!(matches!(err, RouteTableError::UnapprovedNotAllowed { .. }));
    }

    #[test]
    fn test_rejects_missing_unauthorised_page() {
        let mut roles = RouteTable::builtin().roles;
        roles.get_mut(&Role::DeliveryAgent).unwrap().unapproved_prefixes =
            PrefixSet::new(["/delivery/profile"]);
        let err = RouteTable::from_roles(roles).validate().unwrap_err();
        assert!(matches!(
            err,
            RouteTableError::UnapprovedLandingMissing { role: Role::DeliveryAgent, .. }
        ));
    }

    #[test]
    fn test_rejects_missing_pending_path() {
        let mut roles = RouteTable::builtin().roles;
        roles.get_mut(&Role::RestaurantOwner).unwrap().pending_path = None;
        let err = RouteTable::from_roles(roles).validate().unwrap_err();
        assert!(matches!(err, RouteTableError::MissingPendingPath(Role::RestaurantOwner)));
    }

    #[test]
    fn test_rejects_foreign_landing_path() {
        let mut roles = RouteTable::builtin().roles;
        let admin = roles.get_mut(&Role::Admin).unwrap();
        admin.allowed_prefixes = PrefixSet::new(["/admin/dashboard", "/user/home"]);
        let err = RouteTable::from_roles(roles).validate().unwrap_err();
        assert!(matches!(err, RouteTableError::ForeignLandingPath { role: Role::Admin, .. }));
    }

    #[test]
    fn test_rejects_relative_paths() {
        let mut roles = RouteTable::builtin().roles;
        roles.get_mut(&Role::Customer).unwrap().login_path = "user/login".to_string();
        let err = RouteTable::from_roles(roles).validate().unwrap_err();
        assert!(matches!(err, RouteTableError::RelativePath { role: Role::Customer, .. }));
    }

    #[test]
    fn test_json_round_trip_through_config_file_shape() {
        let json = serde_json::to_string_pretty(&RouteTable::builtin()).unwrap();
        assert!(json.contains("\"restaurant_owner\""));
        assert!(json.contains("\"pendingPath\""));
        let table = RouteTable::from_json(&json).unwrap();
        assert_eq!(table, RouteTable::builtin());
    }

    #[test]
    fn test_from_json_reports_parse_errors() {
        assert!(matches!(
            RouteTable::from_json("{ not json"),
            Err(RouteTableError::Parse(_))
        ));
    }

    /// Move a portal by rewriting every path of `role` from `from` to `to`.
    fn moved(mut routes: RoleRoutes, from: &str, to: &str) -> RoleRoutes {
        let swap = |path: &str| path.replacen(from, to, 1);
        routes.base_route = to.to_string();
        routes.dashboard = swap(&routes.dashboard);
        routes.login_path = swap(&routes.login_path);
        routes.pending_path = routes.pending_path.as_deref().map(swap);
        routes.allowed_prefixes = PrefixSet::new(routes.allowed_prefixes.iter().map(swap));
        routes.unapproved_prefixes = PrefixSet::new(routes.unapproved_prefixes.iter().map(swap));
        routes
    }

    #[test]
    fn test_own_base_route_may_be_allowed() {
        let mut roles = RouteTable::builtin().roles;
        let owner = roles.get_mut(&Role::RestaurantOwner).unwrap();
        owner.allowed_prefixes = PrefixSet::new(["/restaurant"]);
        RouteTable::from_roles(roles).validate().unwrap();
    }

    #[test]
    fn test_trailing_slash_dashboard_is_not_foreign() {
        let mut value: serde_json::Value =
            serde_json::to_value(RouteTable::builtin()).unwrap();
        value["admin"]["dashboard"] = serde_json::json!("/admin/dashboard/");
        let table = RouteTable::from_json(&value.to_string()).unwrap();
        assert!(table.is_landing_key("/admin/dashboard"));
        assert_eq!(table.dashboard_for(Role::Admin, true), "/admin/dashboard/");
    }

    #[test]
    fn test_missing_base_routes_default_per_role() {
        let mut value: serde_json::Value =
            serde_json::to_value(RouteTable::builtin()).unwrap();
        for entry in value.as_object_mut().unwrap().values_mut() {
            entry.as_object_mut().unwrap().remove("baseRoute");
        }
        let table = RouteTable::from_json(&value.to_string()).unwrap();
        assert_eq!(table, RouteTable::builtin());
        assert_eq!(table.base_route(Role::Customer), "/user");
    }

    #[test]
    fn test_portal_can_move() {
        let mut roles = RouteTable::builtin().roles;
        let delivery = roles.remove(&Role::DeliveryAgent).unwrap();
        roles.insert(Role::DeliveryAgent, moved(delivery, "/delivery", "/courier"));
        let table = RouteTable::from_roles(roles);
        table.validate().unwrap();

        assert_eq!(table.base_route(Role::DeliveryAgent), "/courier");
        assert_eq!(table.unauthorised_path(Role::DeliveryAgent), "/courier/unauthorised");
        assert!(table.is_landing_key("/courier"));
        assert!(!table.is_landing_key("/delivery"));
        assert_eq!(table.unauthorised_path(Role::RestaurantOwner), "/restaurant/unauthorised");
    }

    #[test]
    fn test_rejects_shared_base_route() {
        let mut roles = RouteTable::builtin().roles;
        roles.get_mut(&Role::Admin).unwrap().base_route = "/user/".to_string();
        let err = RouteTable::from_roles(roles).validate().unwrap_err();
        assert!(matches!(err, RouteTableError::DuplicateBaseRoute { .. }));
    }
}
