//! Access gate.
//!
//! Decides, for every navigation, whether a screen may render for the
//! current session. Pure and total: no I/O, deterministic, and re-evaluated
//! on each route transition rather than cached, because the session can
//! change between navigations.

use crate::models::{Role, RouteRequirement, Session};

/// Outcome of a gate decision, applied by the router before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The requested screen may render.
    Render,
    /// Anonymous caller on a protected screen.
    RedirectLogin,
    /// Authenticated but not authorized; send to this role's home screen.
    RedirectHome(Role),
}

/// Authorize rendering of a screen with the given requirement.
pub fn decide(requirement: &RouteRequirement, session: Option<&Session>) -> Outcome {
    if !requirement.requires_auth {
        return Outcome::Render;
    }

    let Some(session) = session else {
        return Outcome::RedirectLogin;
    };

    if requirement.allowed_roles.permits(session.role) {
        Outcome::Render
    } else {
        Outcome::RedirectHome(session.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AllowedRoles, Route};

    fn standard_session() -> Session {
        Session::new("analyst@factfusion.io", Role::Standard)
    }

    fn admin_session() -> Session {
        Session::new("admin@factfusion.io", Role::Admin)
    }

    #[test]
    fn test_public_route_renders_for_anyone() {
        let req = RouteRequirement::public();
        assert_eq!(decide(&req, None), Outcome::Render);
        assert_eq!(decide(&req, Some(&standard_session())), Outcome::Render);
        assert_eq!(decide(&req, Some(&admin_session())), Outcome::Render);
    }

    #[test]
    fn test_protected_route_redirects_anonymous_to_login() {
        assert_eq!(
            decide(&RouteRequirement::authenticated(), None),
            Outcome::RedirectLogin
        );
        assert_eq!(
            decide(&Route::AdminDashboard.requirement(), None),
            Outcome::RedirectLogin
        );
    }

    #[test]
    fn test_any_role_renders_when_authenticated() {
        let req = RouteRequirement::authenticated();
        assert_eq!(decide(&req, Some(&standard_session())), Outcome::Render);
        assert_eq!(decide(&req, Some(&admin_session())), Outcome::Render);
    }

    #[test]
    fn test_wrong_role_redirects_to_own_home() {
        let req = RouteRequirement::restricted(&[Role::Admin]);
        assert_eq!(
            decide(&req, Some(&standard_session())),
            Outcome::RedirectHome(Role::Standard)
        );
        assert_eq!(decide(&req, Some(&admin_session())), Outcome::Render);
    }

    #[test]
    fn test_decision_is_deterministic() {
        let req = RouteRequirement {
            requires_auth: true,
            allowed_roles: AllowedRoles::Only(&[Role::Admin]),
        };
        let session = standard_session();
        let first = decide(&req, Some(&session));
        let second = decide(&req, Some(&session));
        assert_eq!(first, second);
    }

    #[test]
    fn test_redirect_home_resolves_through_role() {
        let req = RouteRequirement::restricted(&[Role::Admin]);
        if let Outcome::RedirectHome(role) = decide(&req, Some(&standard_session())) {
            assert_eq!(role.home_route(), Route::MemberDashboard);
        } else {
            panic!("expected RedirectHome");
        }
    }
}
