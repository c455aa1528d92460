//! Access guard: authentication + role membership before a view renders.

use assetgate_core::{Role, Session, SessionStatus};

use crate::routes::LANDING_PATH;

/// Outcome of evaluating a guarded route against the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Identity probe still in flight: render a neutral placeholder, no
    /// redirect yet.
    Loading,
    /// Navigate to the given path instead of rendering.
    Redirect(&'static str),
    /// Render the protected view.
    Render,
}

/// Evaluate a guarded route.
///
/// Wrong-role sessions redirect to the dashboard of the user's *actual* role,
/// never a generic error page: every authenticated user always lands on some
/// valid dashboard. Fail closed: a snapshot that claims authentication but
/// carries no user is treated as unauthenticated.
pub fn evaluate(session: &Session, allowed: &[Role]) -> GuardDecision {
    match session.status() {
        SessionStatus::Unknown | SessionStatus::Checking => GuardDecision::Loading,
        SessionStatus::Anonymous => GuardDecision::Redirect(LANDING_PATH),
        SessionStatus::Authenticated => match session.role() {
            Some(role) if allowed.contains(&role) => GuardDecision::Render,
            Some(role) => GuardDecision::Redirect(role.dashboard_path()),
            None => GuardDecision::Redirect(LANDING_PATH),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetgate_core::AuthUser;
    use proptest::prelude::*;

    fn authenticated(role: Role) -> Session {
        Session::authenticated("tok", AuthUser::new("1", "a@b.com", role))
    }

    fn any_session() -> impl Strategy<Value = Session> {
        prop_oneof![
            Just(Session::unknown()),
            Just(Session::checking()),
            Just(Session::anonymous()),
            (0usize..Role::ALL.len()).prop_map(|i| authenticated(Role::ALL[i])),
        ]
    }

    fn any_allowed() -> impl Strategy<Value = Vec<Role>> {
        proptest::sample::subsequence(Role::ALL.to_vec(), 0..=Role::ALL.len())
    }

    #[test]
    fn renders_only_for_allowed_authenticated_roles() {
        let allowed = [Role::Admin];

        assert_eq!(evaluate(&authenticated(Role::Admin), &allowed), GuardDecision::Render);
        assert_eq!(evaluate(&Session::unknown(), &allowed), GuardDecision::Loading);
        assert_eq!(evaluate(&Session::checking(), &allowed), GuardDecision::Loading);
        assert_eq!(
            evaluate(&Session::anonymous(), &allowed),
            GuardDecision::Redirect(LANDING_PATH)
        );
    }

    #[test]
    fn wrong_role_redirects_to_own_dashboard_not_landing() {
        let decision = evaluate(&authenticated(Role::Investor), &[Role::Admin]);
        assert_eq!(decision, GuardDecision::Redirect("/investor/dashboard"));
    }

    #[test]
    fn logout_while_mounted_flips_to_redirect() {
        let allowed = [Role::Issuer];
        assert_eq!(evaluate(&authenticated(Role::Issuer), &allowed), GuardDecision::Render);

        // Session manager tore the session down; the next evaluation must
        // not render stale protected content.
        assert_eq!(
            evaluate(&Session::anonymous(), &allowed),
            GuardDecision::Redirect(LANDING_PATH)
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the wrapped view renders if and only if the session is
        /// authenticated and its role is in the allowed set; every other
        /// reachable state redirects or holds, never renders.
        #[test]
        fn renders_iff_authenticated_and_allowed(
            session in any_session(),
            allowed in any_allowed(),
        ) {
            let decision = evaluate(&session, &allowed);
            let should_render = session.is_authenticated()
                && session.role().is_some_and(|r| allowed.contains(&r));

            prop_assert_eq!(decision == GuardDecision::Render, should_render);
        }

        /// Property: a wrong-role redirect always targets the dashboard of
        /// the session's own role.
        #[test]
        fn wrong_role_redirects_target_own_dashboard(
            session in any_session(),
            allowed in any_allowed(),
        ) {
            if let (GuardDecision::Redirect(target), Some(role)) =
                (evaluate(&session, &allowed), session.role())
            {
                prop_assert_eq!(target, role.dashboard_path());
            }
        }
    }
}
