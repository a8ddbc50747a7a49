use async_trait::async_trait;
use thiserror::Error;

use crate::models::Notification;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    #[error("Notification service unavailable: {0}")]
    Unavailable(String),

    #[error("Notification {0} not found")]
    NotFound(String),
}

/// Remote side of the dashboard notification panel
#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Notification>, NotificationError>;

    async fn mark_read(&self, id: &str) -> Result<(), NotificationError>;

    async fn mark_all_read(&self) -> Result<(), NotificationError>;

    async fn delete(&self, id: &str) -> Result<(), NotificationError>;
}
