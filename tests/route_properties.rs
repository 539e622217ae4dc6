//! Access properties checked exhaustively over the built-in route table.

use cravings_gate::models::Role;
use cravings_gate::routing::{decide, GateDecision, RouteTable};

fn redirect(to: &str) -> GateDecision {
    GateDecision::Redirect(to.to_string())
}

/// Every allowed prefix of every role, plus a nested page under each.
fn all_pages(table: &RouteTable) -> Vec<(Role, String)> {
    let mut pages = Vec::new();
    for role in Role::ALL {
        let routes = table.routes_for(role).unwrap();
        for prefix in routes.allowed_prefixes.iter() {
            pages.push((role, prefix.to_string()));
            pages.push((role, format!("{}/42", prefix)));
        }
    }
    pages
}

#[test]
fn test_anonymous_is_sent_home_from_every_page() {
    let table = RouteTable::builtin();
    for (_, page) in all_pages(&table) {
        assert_eq!(decide(&table, &page, None), redirect("/"), "{page}");
    }
}

#[test]
fn test_login_pages_are_reachable_anonymously() {
    let table = RouteTable::builtin();
    for login in table.login_paths() {
        assert_eq!(decide(&table, login, None), GateDecision::Allow, "{login}");
        assert_eq!(
            decide(&table, &format!("{}/", login), None),
            GateDecision::Allow,
            "{login}/"
        );
    }
}

#[test]
fn test_unapproved_roles_are_contained() {
    let table = RouteTable::builtin();
    for role in Role::ALL.into_iter().filter(Role::requires_approval) {
        let routes = table.routes_for(role).unwrap();
        let denied = table.unauthorised_path(role);
        for (_, page) in all_pages(&table) {
            let expected = if routes.unapproved_prefixes.matches(&page) {
                GateDecision::Allow
            } else {
                redirect(&denied)
            };
            assert_eq!(decide(&table, &page, Some((role, false))), expected, "{role} {page}");
        }
        let pending = table.dashboard_for(role, false);
        assert_eq!(decide(&table, pending, Some((role, false))), GateDecision::Allow);
    }
}

#[test]
fn test_approved_roles_reach_their_pages() {
    let table = RouteTable::builtin();
    for (role, page) in all_pages(&table) {
        assert_eq!(decide(&table, &page, Some((role, true))), GateDecision::Allow, "{role} {page}");
    }
}

#[test]
fn test_other_portals_send_back_to_own_dashboard() {
    let table = RouteTable::builtin();
    for role in Role::ALL {
        let dashboard = table.dashboard_for(role, true);
        for (owner, page) in all_pages(&table) {
            if owner == role {
                continue;
            }
            assert_eq!(
                decide(&table, &page, Some((role, true))),
                redirect(dashboard),
                "{role} {page}"
            );
        }
    }
}

#[test]
fn test_dashboards_never_redirect_to_themselves() {
    let table = RouteTable::builtin();
    for role in Role::ALL {
        let dashboard = table.dashboard_for(role, true);
        assert_eq!(decide(&table, dashboard, Some((role, true))), GateDecision::Allow);
        assert_eq!(
            decide(&table, &format!("{}/", dashboard), Some((role, true))),
            GateDecision::Allow
        );
    }
}

#[test]
fn test_login_pages_bounce_signed_in_users() {
    let table = RouteTable::builtin();
    for role in Role::ALL {
        let dashboard = table.dashboard_for(role, true);
        for login in table.login_paths() {
            assert_eq!(
                decide(&table, login, Some((role, true))),
                redirect(dashboard),
                "{role} {login}"
            );
        }
    }
}
