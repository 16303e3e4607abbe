use std::time::Duration;

use serde::{Deserialize, Serialize};

use shared_config::AppConfig;
use shared_models::auth::{Role, User};

/// What the session store persists under the `auth` key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub user: Option<User>,
    pub token: Option<String>,
}

/// Access requirements attached to a route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub role: Option<Role>,
}

impl RouteMeta {
    pub fn public() -> Self {
        Self::default()
    }

    pub fn authenticated() -> Self {
        Self {
            requires_auth: true,
            role: None,
        }
    }

    pub fn for_role(role: Role) -> Self {
        Self {
            requires_auth: true,
            role: Some(role),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(&'static str),
}

/// User interactions that count as activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityEvent {
    MouseMove,
    KeyDown,
    Click,
    Scroll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InactivityState {
    Active,
    /// The logout warning is visible.
    Warning,
    /// The session was cleared for inactivity.
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InactivitySettings {
    /// Total idle time before logout.
    pub timeout: Duration,
    /// Portion of `timeout` during which the warning is shown.
    pub warning: Duration,
}

impl Default for InactivitySettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            warning: Duration::from_secs(30),
        }
    }
}

impl InactivitySettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            timeout: config.inactivity_timeout,
            warning: config.inactivity_warning,
        }
    }

    pub fn idle_before_warning(&self) -> Duration {
        self.timeout.saturating_sub(self.warning)
    }
}
