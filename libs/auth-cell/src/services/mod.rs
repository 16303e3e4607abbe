pub mod auth;
pub mod inactivity;
pub mod session;

pub use auth::AuthService;
pub use inactivity::InactivityMonitor;
pub use session::{SessionContext, SessionStore};
