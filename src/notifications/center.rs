use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::models::Notification;
use crate::notifications::traits::{NotificationError, NotificationService};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationFilter {
    #[default]
    All,
    Unread,
}

/// A user action applied locally and awaiting confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    MarkRead(String),
    MarkAllRead,
    Delete(String),
}

#[derive(Debug, Clone)]
enum Undo {
    /// Ids that flipped from unread to read
    Unread(Vec<String>),
    Reinsert(Notification),
}

#[derive(Debug, Clone)]
struct Pending {
    intent: Intent,
    undo: Undo,
}

/// Message shown to the user when a local change had to be undone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub confirmed: usize,
    pub rolled_back: Vec<Toast>,
}

/// Dashboard notification panel state.
///
/// Read and delete actions take effect immediately and are queued; [`sync`]
/// confirms them with the service in order and undoes any that fail.
///
/// [`sync`]: NotificationCenter::sync
pub struct NotificationCenter {
    service: Arc<dyn NotificationService>,
    items: Vec<Notification>,
    pending: VecDeque<Pending>,
}

impl NotificationCenter {
    pub fn new(service: Arc<dyn NotificationService>) -> Self {
        Self {
            service,
            items: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    /// Replace local state with the service's notifications, newest first
    pub async fn load(&mut self) -> Result<usize, NotificationError> {
        let mut items = self.service.fetch().await.map_err(|e| {
            warn!("Error fetching notifications: {}", e);
            e
        })?;
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        self.items = items;
        self.pending.clear();
        info!(
            "Loaded {} notification(s), {} unread",
            self.items.len(),
            self.unread_count()
        );
        Ok(self.items.len())
    }

    pub fn notifications(&self, filter: NotificationFilter) -> Vec<&Notification> {
        self.items
            .iter()
            .filter(|n| filter == NotificationFilter::All || !n.is_read)
            .collect()
    }

    /// Badge count for the header
    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.is_read).count()
    }

    /// Intents not yet confirmed
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Returns false when the notification is unknown or already read
    pub fn mark_read(&mut self, id: &str) -> bool {
        let Some(notification) = self.items.iter_mut().find(|n| n.id == id && !n.is_read) else {
            return false;
        };
        notification.is_read = true;
        self.pending.push_back(Pending {
            intent: Intent::MarkRead(id.to_string()),
            undo: Undo::Unread(vec![id.to_string()]),
        });
        true
    }

    /// Returns how many notifications changed
    pub fn mark_all_read(&mut self) -> usize {
        let flipped: Vec<String> = self
            .items
            .iter_mut()
            .filter(|n| !n.is_read)
            .map(|n| {
                n.is_read = true;
                n.id.clone()
            })
            .collect();

        let changed = flipped.len();
        if changed > 0 {
            self.pending.push_back(Pending {
                intent: Intent::MarkAllRead,
                undo: Undo::Unread(flipped),
            });
        }
        changed
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let Some(index) = self.items.iter().position(|n| n.id == id) else {
            return false;
        };
        let notification = self.items.remove(index);
        self.pending.push_back(Pending {
            intent: Intent::Delete(id.to_string()),
            undo: Undo::Reinsert(notification),
        });
        true
    }

    /// Confirm queued intents in order, rolling back the ones the service refuses.
    ///
    /// Every intent is sent before anything is undone; failed intents are then
    /// undone newest first so each undo sees the state it was recorded against.
    pub async fn sync(&mut self) -> SyncReport {
        let mut report = SyncReport::default();
        let mut failed = Vec::new();

        while let Some(pending) = self.pending.pop_front() {
            let result = match &pending.intent {
                Intent::MarkRead(id) => self.service.mark_read(id).await,
                Intent::MarkAllRead => self.service.mark_all_read().await,
                Intent::Delete(id) => self.service.delete(id).await,
            };

            match result {
                Ok(()) => {
                    debug!("Confirmed {:?}", pending.intent);
                    report.confirmed += 1;
                }
                Err(e) => {
                    warn!("Rolling back {:?}: {}", pending.intent, e);
                    report.rolled_back.push(Toast {
                        message: failure_message(&pending.intent),
                    });
                    failed.push(pending.undo);
                }
            }
        }

        for undo in failed.into_iter().rev() {
            self.undo(undo);
        }

        report
    }

    fn undo(&mut self, undo: Undo) {
        match undo {
            Undo::Unread(ids) => {
                for notification in self.items.iter_mut().filter(|n| ids.contains(&n.id)) {
                    notification.is_read = false;
                }
            }
            Undo::Reinsert(notification) => {
                // keep newest-first order regardless of what else changed since
                let index = self
                    .items
                    .iter()
                    .position(|n| n.created_at < notification.created_at)
                    .unwrap_or(self.items.len());
                self.items.insert(index, notification);
            }
        }
    }
}

fn failure_message(intent: &Intent) -> String {
    match intent {
        Intent::MarkRead(_) => "Couldn't mark the notification as read".to_string(),
        Intent::MarkAllRead => "Couldn't mark all notifications as read".to_string(),
        Intent::Delete(_) => "Couldn't delete the notification".to_string(),
    }
}
