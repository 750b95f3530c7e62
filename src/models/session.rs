//! Session and role models matching the persisted session layout.

use serde::{Deserialize, Serialize};

use super::Route;

/// User role assigned by the auth service.
///
/// Roles form a closed set: every role has exactly one designated home
/// route, so an unrecognized role is unrepresentable rather than a
/// runtime fallback.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Standard,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Standard => "standard",
            Role::Admin => "admin",
        }
    }

    /// The landing screen for this role after login or a denied navigation.
    pub fn home_route(&self) -> Route {
        match self {
            Role::Standard => Route::MemberDashboard,
            Role::Admin => Route::AdminDashboard,
        }
    }
}

/// The authenticated identity held for the duration of a visit.
///
/// Exists only after a successful login; owned exclusively by the
/// `SessionStore` and destroyed on logout or on a failed parse of the
/// persisted representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub identity: String,
    pub role: Role,
}

impl Session {
    pub fn new(identity: impl Into<String>, role: Role) -> Self {
        Self {
            identity: identity.into(),
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        let json = serde_json::to_string(&Role::Admin).unwrap();
        assert_eq!(json, "\"admin\"");
        let role: Role = serde_json::from_str("\"standard\"").unwrap();
        assert_eq!(role, Role::Standard);
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        // Corrupted persisted roles must fail the parse so the store can
        // self-heal rather than carry a bogus session.
        assert!(serde_json::from_str::<Role>("\"superuser\"").is_err());
    }

    #[test]
    fn test_every_role_has_a_home() {
        assert_eq!(Role::Standard.home_route(), Route::MemberDashboard);
        assert_eq!(Role::Admin.home_route(), Route::AdminDashboard);
    }
}
