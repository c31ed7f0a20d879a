//! Notification DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::services::BroadcastMessage;
use crate::domain::Notification;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NotificationDto {
    pub id: i32,
    pub user_id: Option<i32>,
    pub title: String,
    pub message: String,
    /// `info`, `appointment`, ...
    #[serde(rename = "type")]
    pub notification_type: String,
    pub related_appointment_id: Option<i32>,
    pub is_read: bool,
    pub sent_at: DateTime<Utc>,
}

impl From<Notification> for NotificationDto {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            user_id: n.user_id,
            title: n.title,
            message: n.message,
            notification_type: n.notification_type,
            related_appointment_id: n.related_appointment_id,
            is_read: n.is_read,
            sent_at: n.sent_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NotificationListQuery {
    #[serde(default)]
    pub unread_only: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UnreadCountResponse {
    pub count: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MarkAllReadResponse {
    pub updated: u64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BroadcastRequest {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 2000, message = "must be 1-2000 characters"))]
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: Option<String>,
}

impl From<BroadcastRequest> for BroadcastMessage {
    fn from(r: BroadcastRequest) -> Self {
        Self {
            title: r.title,
            message: r.message,
            notification_type: r.notification_type,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BroadcastResponse {
    pub recipients: u64,
}
