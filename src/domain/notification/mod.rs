//! Notification aggregate

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::DomainResult;

pub const DEFAULT_NOTIFICATION_TYPE: &str = "info";
pub const APPOINTMENT_NOTIFICATION_TYPE: &str = "appointment";

/// A message addressed to one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: i32,
    pub user_id: Option<i32>,
    pub title: String,
    pub message: String,
    /// Free-form tag: `info`, `appointment`, `warning`, ...
    pub notification_type: String,
    pub related_appointment_id: Option<i32>,
    pub is_read: bool,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: Option<i32>,
    pub title: String,
    pub message: String,
    pub notification_type: String,
    pub related_appointment_id: Option<i32>,
}

impl NewNotification {
    pub fn info(user_id: i32, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id),
            title: title.into(),
            message: message.into(),
            notification_type: DEFAULT_NOTIFICATION_TYPE.to_string(),
            related_appointment_id: None,
        }
    }
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, notification: NewNotification) -> DomainResult<Notification>;
    /// Inserts every row in one transaction and returns how many were written.
    async fn create_many(&self, notifications: Vec<NewNotification>) -> DomainResult<u64>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Notification>>;
    /// Newest first.
    async fn list_for_user(&self, user_id: i32, unread_only: bool) -> DomainResult<Vec<Notification>>;
    async fn mark_read(&self, id: i32) -> DomainResult<bool>;
    async fn mark_all_read(&self, user_id: i32) -> DomainResult<u64>;
    async fn delete(&self, id: i32) -> DomainResult<bool>;
    async fn unread_count(&self, user_id: i32) -> DomainResult<u64>;
}
