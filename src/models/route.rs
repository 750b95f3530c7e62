//! Navigable screens and their access requirements.

use super::Role;

/// Every screen the client can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    About,
    Detection,
    AnalysisHistory,
    Insights,
    MemberDashboard,
    AdminDashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Login => "/login",
            Route::About => "/about",
            Route::Detection => "/detection",
            Route::AnalysisHistory => "/analysis-history",
            Route::Insights => "/xai",
            Route::MemberDashboard => "/team-dashboard",
            Route::AdminDashboard => "/admin-dashboard",
        }
    }

    /// Static access requirement attached to this screen.
    pub fn requirement(&self) -> RouteRequirement {
        match self {
            Route::Landing | Route::Login | Route::About => RouteRequirement::public(),
            Route::Detection
            | Route::AnalysisHistory
            | Route::Insights
            | Route::MemberDashboard => RouteRequirement::authenticated(),
            Route::AdminDashboard => RouteRequirement::restricted(&[Role::Admin]),
        }
    }
}

/// Which roles may render a protected screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowedRoles {
    /// Any authenticated role.
    Any,
    /// Only the listed roles.
    Only(&'static [Role]),
}

impl AllowedRoles {
    pub fn permits(&self, role: Role) -> bool {
        match self {
            AllowedRoles::Any => true,
            AllowedRoles::Only(roles) => roles.contains(&role),
        }
    }
}

/// Access requirement evaluated by the gate on every navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRequirement {
    pub requires_auth: bool,
    pub allowed_roles: AllowedRoles,
}

impl RouteRequirement {
    pub fn public() -> Self {
        Self {
            requires_auth: false,
            allowed_roles: AllowedRoles::Any,
        }
    }

    pub fn authenticated() -> Self {
        Self {
            requires_auth: true,
            allowed_roles: AllowedRoles::Any,
        }
    }

    pub fn restricted(roles: &'static [Role]) -> Self {
        Self {
            requires_auth: true,
            allowed_roles: AllowedRoles::Only(roles),
        }
    }
}
