pub mod date_format;
pub mod navigation;
pub mod notify;
pub mod storage;
pub mod test_utils;

pub use navigation::{LogNavigator, Navigator, HOME_ROUTE};
pub use notify::{Notifier, TracingNotifier};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
