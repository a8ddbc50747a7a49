pub mod center;
pub mod mock;
pub mod traits;

pub use center::{Intent, NotificationCenter, NotificationFilter, SyncReport, Toast};
pub use mock::MockNotificationService;
pub use traits::{NotificationError, NotificationService};
