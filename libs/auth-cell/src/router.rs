use std::sync::Arc;

use tracing::debug;

use shared_utils::navigation::{LOGIN_PATH, ROOT_PATH};

use crate::models::{GuardDecision, RouteMeta};
use crate::services::session::SessionContext;

/// Navigation guard run before entering a route.
pub struct RouteGuard {
    session: Arc<SessionContext>,
}

impl RouteGuard {
    pub fn new(session: Arc<SessionContext>) -> Self {
        Self { session }
    }

    pub fn check(&self, meta: &RouteMeta) -> GuardDecision {
        if meta.requires_auth && !self.session.is_authenticated() {
            debug!("Route requires authentication, redirecting to {}", LOGIN_PATH);
            return GuardDecision::Redirect(LOGIN_PATH);
        }

        if let Some(role) = &meta.role {
            if !self.session.has_role(role) {
                debug!("Route requires {}, redirecting to {}", role, ROOT_PATH);
                return GuardDecision::Redirect(ROOT_PATH);
            }
        }

        GuardDecision::Proceed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_models::auth::Role;
    use shared_utils::storage::{MemoryStorage, SessionStorage, ROLES_KEY, TOKEN_KEY};

    fn guard_with(token: Option<&str>, roles: Option<&str>) -> RouteGuard {
        let storage = Arc::new(MemoryStorage::new());
        if let Some(t) = token {
            storage.set_item(TOKEN_KEY, t).unwrap();
        }
        if let Some(r) = roles {
            storage.set_item(ROLES_KEY, r).unwrap();
        }
        RouteGuard::new(Arc::new(SessionContext::new(storage)))
    }

    #[test]
    fn test_public_route_always_proceeds() {
        let guard = guard_with(None, None);
        assert_eq!(guard.check(&RouteMeta::public()), GuardDecision::Proceed);
    }

    #[test]
    fn test_anonymous_user_sent_to_login() {
        let guard = guard_with(None, None);
        assert_eq!(
            guard.check(&RouteMeta::authenticated()),
            GuardDecision::Redirect("/login")
        );
        assert_eq!(
            guard.check(&RouteMeta::for_role(Role::Doctor)),
            GuardDecision::Redirect("/login")
        );
    }

    #[test]
    fn test_wrong_role_sent_home() {
        let guard = guard_with(Some("t"), Some("[\"ROLE_PATIENT\"]"));
        assert_eq!(
            guard.check(&RouteMeta::for_role(Role::Doctor)),
            GuardDecision::Redirect("/")
        );
    }

    #[test]
    fn test_matching_role_proceeds() {
        let guard = guard_with(Some("t"), Some("[\"ROLE_USER\",\"ROLE_DOCTOR\"]"));
        assert_eq!(
            guard.check(&RouteMeta::for_role(Role::Doctor)),
            GuardDecision::Proceed
        );
    }

    #[test]
    fn test_role_only_route_checks_role_without_token() {
        let guard = guard_with(None, Some("[\"ROLE_ADMIN\"]"));
        let meta = RouteMeta {
            requires_auth: false,
            role: Some(Role::Admin),
        };
        assert_eq!(guard.check(&meta), GuardDecision::Proceed);
    }
}
