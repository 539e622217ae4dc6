//! Session record shared with the front end through the `user` cookie.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Role;

/// Authenticated actor as returned by the backend login endpoint.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(rename = "_id", alias = "id")]
    #[schema(example = "65f1c0ffee0000000000beef")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub role: Role,
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_photo: Option<String>,
}

impl Session {
    /// Approval as the gate sees it when acting as `role`: exempt roles are
    /// always approved, the rest read the stored flag.
    pub fn is_approved_as(&self, role: Role) -> bool {
        !role.requires_approval() || self.is_approved
    }

    /// Copy with `is_approved` forced on for roles that never wait for approval.
    pub fn normalized(mut self) -> Self {
        if !self.role.requires_approval() {
            self.is_approved = true;
        }
        self
    }

    pub fn with_approval(&self, is_approved: bool) -> Self {
        Self {
            is_approved,
            ..self.clone()
        }
        .normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_front_end_shape() {
        let raw = r#"{"_id":"abc","name":"Rita","email":"rita@cravings.io","phone":"555",
            "role":"restaurant_owner","isApproved":false,"profilePhoto":"https://cdn/p.png"}"#;
        let session: Session = serde_json::from_str(raw).unwrap();
        assert_eq!(session.id, "abc");
        assert_eq!(session.role, Role::RestaurantOwner);
        assert!(!session.is_approved);
        assert_eq!(session.profile_photo.as_deref(), Some("https://cdn/p.png"));
        assert!(session.id_photo.is_none());
    }

    #[test]
    fn test_exempt_roles_are_always_approved() {
        let raw = r#"{"id":"u1","role":"user"}"#;
        let session: Session = serde_json::from_str(raw).unwrap();
        assert!(!session.is_approved);
        assert!(session.is_approved_as(Role::Customer));
        assert!(session.is_approved_as(Role::Admin));
        assert!(!session.is_approved_as(Role::RestaurantOwner));
        assert!(session.normalized().is_approved);
    }

    #[test]
    fn test_with_approval_keeps_identity() {
        let raw = r#"{"_id":"d1","name":"Dee","role":"delivery_agent","isApproved":false}"#;
        let session: Session = serde_json::from_str(raw).unwrap();
        let approved = session.with_approval(true);
        assert!(approved.is_approved);
        assert_eq!(approved.id, session.id);
        assert_eq!(approved.name, "Dee");
    }
}
