use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use auth_cell::{ActivityEvent, InactivityMonitor, InactivitySettings, InactivityState};
use shared_utils::storage::{MemoryStorage, SessionStorage, TOKEN_KEY};
use shared_utils::test_utils::RecordingNavigator;

fn settings(timeout: u64, warning: u64) -> InactivitySettings {
    InactivitySettings {
        timeout: Duration::from_secs(timeout),
        warning: Duration::from_secs(warning),
    }
}

fn signed_in_storage() -> Arc<MemoryStorage> {
    let storage = Arc::new(MemoryStorage::new());
    storage.set_item(TOKEN_KEY, "jwt").unwrap();
    storage
}

#[tokio::test(start_paused = true)]
async fn test_warning_then_logout_when_idle() {
    let storage = signed_in_storage();
    let navigator = RecordingNavigator::new();
    let monitor = InactivityMonitor::start(settings(60, 30), storage.clone(), navigator.clone());

    sleep(Duration::from_secs(29)).await;
    assert_eq!(monitor.state(), InactivityState::Active);
    assert!(!monitor.show_warning());

    sleep(Duration::from_secs(2)).await;
    assert!(monitor.show_warning());
    assert_eq!(storage.get_item(TOKEN_KEY).as_deref(), Some("jwt"));

    sleep(Duration::from_secs(30)).await;
    assert_eq!(monitor.state(), InactivityState::Expired);
    assert!(!monitor.show_warning());
    assert!(storage.is_empty());
    assert_eq!(navigator.routes(), vec!["home".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_activity_restarts_countdown() {
    let storage = signed_in_storage();
    let navigator = RecordingNavigator::new();
    let monitor = InactivityMonitor::start(settings(60, 30), storage.clone(), navigator.clone());

    sleep(Duration::from_secs(20)).await;
    monitor.record_activity(ActivityEvent::MouseMove);

    sleep(Duration::from_secs(25)).await;
    assert_eq!(monitor.state(), InactivityState::Active);

    sleep(Duration::from_secs(6)).await;
    assert_eq!(monitor.state(), InactivityState::Warning);

    sleep(Duration::from_secs(30)).await;
    assert_eq!(monitor.state(), InactivityState::Expired);
    assert_eq!(navigator.routes().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_activity_during_warning_cancels_logout() {
    let storage = signed_in_storage();
    let navigator = RecordingNavigator::new();
    let monitor = InactivityMonitor::start(settings(60, 30), storage.clone(), navigator.clone());
    let mut states = monitor.subscribe();

    sleep(Duration::from_secs(31)).await;
    assert!(monitor.show_warning());
    assert_eq!(*states.borrow_and_update(), InactivityState::Warning);

    monitor.record_activity(ActivityEvent::KeyDown);
    states.changed().await.unwrap();
    assert_eq!(*states.borrow(), InactivityState::Active);

    sleep(Duration::from_secs(40)).await;
    assert_ne!(monitor.state(), InactivityState::Expired);
    assert_eq!(storage.get_item(TOKEN_KEY).as_deref(), Some("jwt"));
    assert!(navigator.routes().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_dropping_monitor_stops_timers() {
    let storage = signed_in_storage();
    let navigator = RecordingNavigator::new();
    let monitor = InactivityMonitor::start(settings(60, 30), storage.clone(), navigator.clone());

    sleep(Duration::from_secs(10)).await;
    drop(monitor);

    sleep(Duration::from_secs(120)).await;
    assert_eq!(storage.get_item(TOKEN_KEY).as_deref(), Some("jwt"));
    assert!(navigator.routes().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_warning_longer_than_timeout_is_clamped() {
    let storage = signed_in_storage();
    let navigator = RecordingNavigator::new();
    let monitor = InactivityMonitor::start(settings(10, 30), storage.clone(), navigator.clone());

    sleep(Duration::from_secs(1)).await;
    assert!(monitor.show_warning());

    sleep(Duration::from_secs(10)).await;
    assert_eq!(monitor.state(), InactivityState::Expired);
    assert!(storage.is_empty());
}
