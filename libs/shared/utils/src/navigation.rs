use tracing::info;

/// Name of the landing route every forced logout sends the user back to.
pub const HOME_ROUTE: &str = "home";
pub const LOGIN_PATH: &str = "/login";
pub const ROOT_PATH: &str = "/";

/// Seam towards whatever renders routes (a web view, a terminal UI, a test).
pub trait Navigator: Send + Sync {
    fn push(&self, route: &str);
}

/// Navigator for headless callers: records the redirect in the logs only.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn push(&self, route: &str) {
        info!("Navigating to route {}", route);
    }
}
