use std::sync::Arc;

use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Method, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_utils::navigation::{Navigator, HOME_ROUTE};
use shared_utils::storage::{SessionStorage, TOKEN_KEY};

/// JSON client for the booking API. Every request carries the bearer token
/// found in session storage; a 401 answer wipes the session and sends the
/// user back to the home route.
pub struct ApiClient {
    client: Client,
    base_url: String,
    storage: Arc<dyn SessionStorage>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        config: &AppConfig,
        storage: Arc<dyn SessionStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            storage,
            navigator,
        }
    }

    fn get_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = self.storage.get_item(TOKEN_KEY) {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("Stored token is not a valid header value, sending request without it"),
            }
        }

        headers
    }

    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(&str, String)]>,
        body: Option<Value>,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making {} request to {}", method, url);

        let mut req = self.client.request(method, &url).headers(self.get_headers());

        if let Some(params) = query {
            req = req.query(params);
        }

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("API error ({}): {}", status, error_text);

            if status == StatusCode::UNAUTHORIZED {
                self.handle_unauthorized();
            }

            return Err(AppError::from_status(status.as_u16(), error_text));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        // 204 and friends decode as JSON null
        if bytes.is_empty() {
            return Ok(serde_json::from_value(Value::Null)?);
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    fn handle_unauthorized(&self) {
        warn!("Session rejected by the API, clearing local session");

        if let Err(e) = self.storage.clear() {
            error!("Failed to clear session storage: {}", e);
        }

        self.navigator.push(HOME_ROUTE);
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.request(Method::GET, path, None, None).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        self.request(Method::GET, path, Some(query), None).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let body = serde_json::to_value(body)?;
        self.request(Method::POST, path, None, Some(body)).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let body = serde_json::to_value(body)?;
        self.request(Method::PUT, path, None, Some(body)).await
    }

    pub async fn patch<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.request(Method::PATCH, path, None, None).await
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn storage(&self) -> &Arc<dyn SessionStorage> {
        &self.storage
    }
}
