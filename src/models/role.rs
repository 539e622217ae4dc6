//! Platform roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Actor type carried in the access token.
///
/// Wire names match the front end (`user` for customers); the descriptive
/// names are accepted on input as aliases.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, ToSchema)]
pub enum Role {
    #[serde(rename = "user", alias = "customer")]
    Customer,
    #[serde(rename = "restaurant_owner", alias = "restaurant")]
    RestaurantOwner,
    #[serde(rename = "delivery_agent", alias = "delivery")]
    DeliveryAgent,
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Customer,
        Role::RestaurantOwner,
        Role::DeliveryAgent,
        Role::Admin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "user",
            Role::RestaurantOwner => "restaurant_owner",
            Role::DeliveryAgent => "delivery_agent",
            Role::Admin => "admin",
        }
    }

    /// Restaurant owners and delivery agents must be approved by an admin
    /// before they get past their setup pages.
    pub fn requires_approval(&self) -> bool {
        matches!(self, Role::RestaurantOwner | Role::DeliveryAgent)
    }

    /// Conventional portal root. A route table entry may override it.
    pub fn base_route(&self) -> &'static str {
        match self {
            Role::Customer => "/user",
            Role::RestaurantOwner => "/restaurant",
            Role::DeliveryAgent => "/delivery",
            Role::Admin => "/admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_and_aliases() {
        assert_eq!(serde_json::to_string(&Role::Customer).unwrap(), "\"user\"");
        let parsed: Role = serde_json::from_str("\"customer\"").unwrap();
        assert_eq!(parsed, Role::Customer);
        let parsed: Role = serde_json::from_str("\"restaurant\"").unwrap();
        assert_eq!(parsed, Role::RestaurantOwner);
        let parsed: Role = serde_json::from_str("\"delivery_agent\"").unwrap();
        assert_eq!(parsed, Role::DeliveryAgent);
        assert!(serde_json::from_str::<Role>("\"superuser\"").is_err());
    }

    #[test]
    fn test_approval_requirement() {
        assert!(Role::RestaurantOwner.requires_approval());
        assert!(Role::DeliveryAgent.requires_approval());
        assert!(!Role::Customer.requires_approval());
        assert!(!Role::Admin.requires_approval());
    }
}
