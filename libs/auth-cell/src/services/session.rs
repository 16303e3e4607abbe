use std::sync::Arc;

use tracing::{debug, warn};

use shared_models::auth::{LoginResponse, Role, User};
use shared_models::error::AppError;
use shared_utils::storage::{SessionStorage, ROLES_KEY, SESSION_KEY, TOKEN_KEY};

use crate::models::SessionState;

/// Current user and token, mirrored into session storage on every change.
pub struct SessionStore {
    state: SessionState,
    storage: Arc<dyn SessionStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            state: SessionState::default(),
            storage,
        }
    }

    /// Rebuild the store from the snapshot left by a previous run.
    pub fn restore(storage: Arc<dyn SessionStorage>) -> Self {
        let state = match storage.get_item(SESSION_KEY) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Discarding unreadable session snapshot: {}", e);
                SessionState::default()
            }),
            None => SessionState::default(),
        };

        debug!("Restored session (authenticated: {})", state.token.is_some());
        Self { state, storage }
    }

    pub fn user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.state.token.as_deref()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn set_user(&mut self, user: Option<User>) -> Result<(), AppError> {
        match &user {
            Some(u) => {
                let roles = serde_json::to_string(&u.roles)?;
                self.storage.set_item(ROLES_KEY, &roles)?;
            }
            None => self.storage.remove_item(ROLES_KEY)?,
        }

        self.state.user = user;
        self.persist()
    }

    pub fn set_token(&mut self, token: Option<String>) -> Result<(), AppError> {
        match &token {
            Some(t) => self.storage.set_item(TOKEN_KEY, t)?,
            None => self.storage.remove_item(TOKEN_KEY)?,
        }

        self.state.token = token;
        self.persist()
    }

    pub fn establish(&mut self, login: LoginResponse) -> Result<(), AppError> {
        self.set_token(Some(login.token))?;
        self.set_user(Some(login.user))
    }

    pub fn logout(&mut self) -> Result<(), AppError> {
        debug!("Logging out");
        self.set_user(None)?;
        self.set_token(None)
    }

    fn persist(&self) -> Result<(), AppError> {
        let snapshot = serde_json::to_string(&self.state)?;
        self.storage.set_item(SESSION_KEY, &snapshot)
    }
}

/// Read-only view of the session shared by the route guard and anything
/// else that needs to ask "who is signed in".
pub struct SessionContext {
    storage: Arc<dyn SessionStorage>,
}

impl SessionContext {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    pub fn is_authenticated(&self) -> bool {
        self.storage
            .get_item(TOKEN_KEY)
            .map_or(false, |token| !token.is_empty())
    }

    pub fn roles_of<'a>(&self, user: &'a User) -> &'a [Role] {
        &user.roles
    }

    pub fn current_roles(&self) -> Vec<Role> {
        let Some(raw) = self.storage.get_item(ROLES_KEY) else {
            return Vec::new();
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Ignoring malformed {} entry: {}", ROLES_KEY, e);
            Vec::new()
        })
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.current_roles().contains(role)
    }
}
