use std::sync::Arc;

use tracing::{debug, info};

use shared_http::ApiClient;
use shared_models::auth::{LoginCredentials, LoginResponse, TokenResponse, User};
use shared_models::error::AppError;
use shared_utils::storage::TOKEN_KEY;

pub struct AuthService {
    api: Arc<ApiClient>,
}

impl AuthService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Exchange credentials for a token, then load the profile it belongs to.
    ///
    /// The token is written to session storage before the profile request so
    /// that `/me` is already authenticated.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse, AppError> {
        debug!("Logging in user: {}", credentials.username);

        let TokenResponse { token } = self.api.post("/login_check", credentials).await?;
        self.api.storage().set_item(TOKEN_KEY, &token)?;

        let user = self.current_user().await?;
        info!("User {} logged in", user.id);

        Ok(LoginResponse { token, user })
    }

    pub async fn current_user(&self) -> Result<User, AppError> {
        self.api.get("/me").await
    }
}
