//! Recipient-scoped notification feed operations.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::Notification;
use crate::error::DomainError;
use crate::ports::ContentStore;

#[derive(Clone)]
pub struct NotificationFeed {
    store: Arc<dyn ContentStore>,
}

impl NotificationFeed {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// The user's notifications, newest first.
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Notification>, DomainError> {
        Ok(self.store.notifications_for(user_id).await?)
    }

    /// Mark one notification read. Only the recipient may touch it.
    pub async fn mark_read(
        &self,
        user_id: Uuid,
        notification_id: Uuid,
    ) -> Result<Notification, DomainError> {
        let mut notification = self.owned(user_id, notification_id).await?;
        notification.is_read = true;
        self.store.put_notification(notification.clone()).await?;
        Ok(notification)
    }

    /// Mark the whole feed read.
    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<(), DomainError> {
        for mut notification in self.store.notifications_for(user_id).await? {
            if !notification.is_read {
                notification.is_read = true;
                self.store.put_notification(notification).await?;
            }
        }
        Ok(())
    }

    /// Delete one notification. Only the recipient may.
    pub async fn delete(&self, user_id: Uuid, notification_id: Uuid) -> Result<(), DomainError> {
        self.owned(user_id, notification_id).await?;
        self.store.delete_notification(notification_id).await?;
        Ok(())
    }

    /// Clear the whole feed.
    pub async fn delete_all(&self, user_id: Uuid) -> Result<(), DomainError> {
        self.store.delete_notifications_for(user_id).await?;
        Ok(())
    }

    async fn owned(
        &self,
        user_id: Uuid,
        notification_id: Uuid,
    ) -> Result<Notification, DomainError> {
        let notification = self
            .store
            .notification(notification_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "notification",
                id: notification_id,
            })?;
        if notification.to_user != user_id {
            return Err(DomainError::Forbidden(
                "notification belongs to another user".to_string(),
            ));
        }
        Ok(notification)
    }
}
