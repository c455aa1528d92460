//! Declarative route table: the composition-root contract.

use assetgate_core::{Role, Session};

use crate::guard::{evaluate, GuardDecision};

/// Public landing route; also the catch-all redirect target.
pub const LANDING_PATH: &str = "/";

/// How a path is gated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteKind {
    /// Reachable by anyone.
    Public,
    /// Login/registration portals; reachable by anyone.
    Auth,
    /// Requires an authenticated session with one of the allowed roles.
    Guarded { allowed: &'static [Role] },
}

/// A single route entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSpec {
    pub path: &'static str,
    pub kind: RouteKind,
}

/// The full route table: public landing, one login portal per role, the two
/// self-service registration portals (admins are provisioned, not
/// self-registered), and one guarded dashboard per role.
pub const ROUTES: &[RouteSpec] = &[
    RouteSpec { path: "/", kind: RouteKind::Public },
    RouteSpec { path: "/admin/login", kind: RouteKind::Auth },
    RouteSpec { path: "/issuer/login", kind: RouteKind::Auth },
    RouteSpec { path: "/issuer/register", kind: RouteKind::Auth },
    RouteSpec { path: "/investor/login", kind: RouteKind::Auth },
    RouteSpec { path: "/investor/register", kind: RouteKind::Auth },
    RouteSpec {
        path: "/admin/dashboard",
        kind: RouteKind::Guarded { allowed: &[Role::Admin] },
    },
    RouteSpec {
        path: "/issuer/dashboard",
        kind: RouteKind::Guarded { allowed: &[Role::Issuer] },
    },
    RouteSpec {
        path: "/investor/dashboard",
        kind: RouteKind::Guarded { allowed: &[Role::Investor] },
    },
];

/// Result of resolving a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Commit to this route and render it.
    Render(&'static RouteSpec),
    /// The route is guarded and the session is still resolving.
    Loading(&'static RouteSpec),
    /// Navigate to this path instead.
    Redirect(&'static str),
}

/// Resolve a path against the route table and the current session.
///
/// Unknown paths redirect to the landing route.
pub fn resolve(path: &str, session: &Session) -> Navigation {
    let Some(route) = ROUTES.iter().find(|r| r.path == path) else {
        return Navigation::Redirect(LANDING_PATH);
    };

    match &route.kind {
        RouteKind::Public | RouteKind::Auth => Navigation::Render(route),
        RouteKind::Guarded { allowed } => match evaluate(session, allowed) {
            GuardDecision::Render => Navigation::Render(route),
            GuardDecision::Loading => Navigation::Loading(route),
            GuardDecision::Redirect(target) => Navigation::Redirect(target),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetgate_core::AuthUser;

    fn authenticated(role: Role) -> Session {
        Session::authenticated("tok", AuthUser::new("1", "a@b.com", role))
    }

    #[test]
    fn unknown_paths_redirect_to_landing() {
        let nav = resolve("/nonexistent/page", &Session::anonymous());
        assert_eq!(nav, Navigation::Redirect(LANDING_PATH));
    }

    #[test]
    fn public_and_auth_routes_are_never_gated() {
        for path in ["/", "/admin/login", "/investor/register"] {
            for session in [Session::unknown(), Session::anonymous(), authenticated(Role::Admin)] {
                assert!(matches!(resolve(path, &session), Navigation::Render(_)), "{path}");
            }
        }
    }

    #[test]
    fn dashboards_render_only_for_their_role() {
        let nav = resolve("/issuer/dashboard", &authenticated(Role::Issuer));
        assert!(matches!(nav, Navigation::Render(r) if r.path == "/issuer/dashboard"));

        let nav = resolve("/issuer/dashboard", &Session::anonymous());
        assert_eq!(nav, Navigation::Redirect(LANDING_PATH));
    }

    #[test]
    fn wrong_role_lands_on_own_dashboard() {
        let nav = resolve("/admin/dashboard", &authenticated(Role::Investor));
        assert_eq!(nav, Navigation::Redirect("/investor/dashboard"));
    }

    #[test]
    fn guarded_routes_hold_while_session_resolves() {
        let nav = resolve("/admin/dashboard", &Session::checking());
        assert!(matches!(nav, Navigation::Loading(r) if r.path == "/admin/dashboard"));
    }

    #[test]
    fn every_role_has_exactly_one_dashboard_route() {
        for role in Role::ALL {
            let matching: Vec<_> = ROUTES
                .iter()
                .filter(|r| matches!(&r.kind, RouteKind::Guarded { allowed } if allowed.contains(&role)))
                .collect();
            assert_eq!(matching.len(), 1, "{role}");
            assert_eq!(matching[0].path, role.dashboard_path());
        }
    }
}
