use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::{Role, User};

use crate::navigation::Navigator;
use crate::notify::Notifier;

pub struct TestConfig {
    pub api_base_url: String,
    pub inactivity_timeout: Duration,
    pub inactivity_warning: Duration,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000/api".to_string(),
            inactivity_timeout: Duration::from_secs(60),
            inactivity_warning: Duration::from_secs(30),
        }
    }
}

impl TestConfig {
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            api_base_url: self.api_base_url.clone(),
            session_file: None,
            inactivity_timeout: self.inactivity_timeout,
            inactivity_warning: self.inactivity_warning,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestUser {
    pub id: String,
    pub email: String,
    pub roles: Vec<Role>,
}

impl Default for TestUser {
    fn default() -> Self {
        Self::new("test@example.com", Role::Patient)
    }
}

impl TestUser {
    pub fn new(email: &str, role: Role) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            roles: vec![role],
        }
    }

    pub fn doctor(email: &str) -> Self {
        Self::new(email, Role::Doctor)
    }

    pub fn patient(email: &str) -> Self {
        Self::new(email, Role::Patient)
    }

    pub fn admin(email: &str) -> Self {
        Self::new(email, Role::Admin)
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            email: self.email.clone(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            phone: None,
            roles: self.roles.clone(),
        }
    }
}

/// Navigator that remembers every route it was asked to push.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, route: &str) {
        if let Ok(mut routes) = self.routes.lock() {
            routes.push(route.to_string());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toast {
    Success(String),
    Error(String),
}

/// Notifier that remembers every toast instead of displaying it.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().map(|t| t.clone()).unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push(Toast::Success(message.to_string()));
        }
    }

    fn error(&self, message: &str) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push(Toast::Error(message.to_string()));
        }
    }
}

pub struct MockApiResponses;

impl MockApiResponses {
    pub fn token_response(token: &str) -> serde_json::Value {
        json!({ "token": token })
    }

    pub fn user_response(user: &TestUser) -> serde_json::Value {
        json!({
            "id": user.id,
            "email": user.email,
            "first_name": "Test",
            "last_name": "User",
            "phone": "0600000000",
            "roles": user.roles
        })
    }

    pub fn availability_response(id: i64, date: &str, slots: &[&str]) -> serde_json::Value {
        json!({
            "id": id,
            "date": date,
            "slots": slots
        })
    }

    pub fn doctor_response(id: i64, speciality: &str) -> serde_json::Value {
        json!({
            "id": id,
            "first_name": "Claire",
            "last_name": "Martin",
            "speciality": speciality,
            "location": "Paris",
            "availabilities": []
        })
    }

    pub fn appointment_response(id: &str, doctor_id: &str, status: &str) -> serde_json::Value {
        json!({
            "id": id,
            "doctorId": doctor_id,
            "date": "2023-11-01T10:00:00",
            "type": "consultation",
            "status": status
        })
    }

    pub fn error_response(message: &str, code: &str) -> serde_json::Value {
        json!({
            "error": {
                "message": message,
                "code": code
            }
        })
    }
}
