use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use tracing::debug;

use crate::models::{Notification, NotificationKind};
use crate::notifications::traits::{NotificationError, NotificationService};

/// In-memory notification source seeded with sample alerts
pub struct MockNotificationService {
    notifications: Mutex<Vec<Notification>>,
    offline: AtomicBool,
    latency: Duration,
}

impl MockNotificationService {
    pub fn new() -> Self {
        Self::with_notifications(sample_notifications())
    }

    pub fn with_notifications(notifications: Vec<Notification>) -> Self {
        Self {
            notifications: Mutex::new(notifications),
            offline: AtomicBool::new(false),
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// While offline every call fails with `Unavailable`
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Server-side copy, for checking what was confirmed
    pub fn snapshot(&self) -> Vec<Notification> {
        self.notifications().clone()
    }

    fn notifications(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.notifications.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn round_trip(&self) -> Result<(), NotificationError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err(NotificationError::Unavailable("offline".to_string()));
        }
        Ok(())
    }
}

impl Default for MockNotificationService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationService for MockNotificationService {
    async fn fetch(&self) -> Result<Vec<Notification>, NotificationError> {
        self.round_trip().await?;
        Ok(self.snapshot())
    }

    async fn mark_read(&self, id: &str) -> Result<(), NotificationError> {
        self.round_trip().await?;
        let mut notifications = self.notifications();
        let notification = notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| NotificationError::NotFound(id.to_string()))?;
        notification.is_read = true;
        Ok(())
    }

    async fn mark_all_read(&self) -> Result<(), NotificationError> {
        self.round_trip().await?;
        for notification in self.notifications().iter_mut() {
            notification.is_read = true;
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), NotificationError> {
        self.round_trip().await?;
        let mut notifications = self.notifications();
        let before = notifications.len();
        notifications.retain(|n| n.id != id);
        if notifications.len() == before {
            return Err(NotificationError::NotFound(id.to_string()));
        }
        debug!("Deleted notification {}", id);
        Ok(())
    }
}

/// Sample alerts shown on a fresh dashboard
pub fn sample_notifications() -> Vec<Notification> {
    let now = Utc::now();
    vec![
        Notification {
            id: "1".to_string(),
            kind: NotificationKind::Listing,
            title: "New View on Your Listing".to_string(),
            message: "Someone viewed your Modern Studio Apartment listing".to_string(),
            created_at: now - ChronoDuration::minutes(30),
            is_read: false,
            link: Some("/dashboard/listings".to_string()),
        },
        Notification {
            id: "2".to_string(),
            kind: NotificationKind::Review,
            title: "New Review".to_string(),
            message: "You received a new 5-star review on your Professional Cleaning Service"
                .to_string(),
            created_at: now - ChronoDuration::hours(2),
            is_read: false,
            link: Some("/dashboard/listings".to_string()),
        },
        Notification {
            id: "3".to_string(),
            kind: NotificationKind::Message,
            title: "New Message".to_string(),
            message: "John Doe sent you a message about your property".to_string(),
            created_at: now - ChronoDuration::hours(5),
            is_read: true,
            link: Some("/messages".to_string()),
        },
        Notification {
            id: "4".to_string(),
            kind: NotificationKind::System,
            title: "Account Update".to_string(),
            message: "Your profile changes have been saved successfully".to_string(),
            created_at: now - ChronoDuration::days(1),
            is_read: true,
            link: None,
        },
    ]
}
