use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Why a notification was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Follow,
    Like,
    Mention,
}

/// Notification entity. Created by fan-out as a side effect of follow, like,
/// and mention events; afterwards only its read state changes, and only the
/// recipient may delete it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub from_user: Uuid,
    pub to_user: Uuid,
    pub kind: NotificationKind,
    pub post_id: Option<Uuid>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(from_user: Uuid, to_user: Uuid, kind: NotificationKind, post_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            from_user,
            to_user,
            kind,
            post_id,
            is_read: false,
            created_at: Utc::now(),
        }
    }
}
