use tracing::{info, warn};

/// User-facing transient notifications (toasts).
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(target: "toast", "{}", message);
    }

    fn error(&self, message: &str) {
        warn!(target: "toast", "{}", message);
    }
}
