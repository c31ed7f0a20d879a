//! Notification operations

use std::sync::Arc;

use tracing::info;

use super::{non_blank, required};
use crate::application::identity::AuthenticatedUser;
use crate::domain::notification::{
    NewNotification, APPOINTMENT_NOTIFICATION_TYPE, DEFAULT_NOTIFICATION_TYPE,
};
use crate::domain::{
    AppointmentStatus, DomainError, DomainResult, Notification, RepositoryProvider,
};

/// Message sent to every active user.
#[derive(Debug, Clone)]
pub struct BroadcastMessage {
    pub title: String,
    pub message: String,
    pub notification_type: Option<String>,
}

pub struct NotificationService {
    repos: Arc<dyn RepositoryProvider>,
}

impl NotificationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(
        &self,
        principal: &AuthenticatedUser,
        unread_only: bool,
    ) -> DomainResult<Vec<Notification>> {
        self.repos
            .notifications()
            .list_for_user(principal.user_id, unread_only)
            .await
    }

    pub async fn unread_count(&self, principal: &AuthenticatedUser) -> DomainResult<u64> {
        self.repos.notifications().unread_count(principal.user_id).await
    }

    pub async fn mark_read(&self, principal: &AuthenticatedUser, id: i32) -> DomainResult<()> {
        self.owned(principal, id).await?;
        self.repos.notifications().mark_read(id).await?;
        Ok(())
    }

    /// Returns how many notifications changed state.
    pub async fn mark_all_read(&self, principal: &AuthenticatedUser) -> DomainResult<u64> {
        self.repos.notifications().mark_all_read(principal.user_id).await
    }

    pub async fn delete(&self, principal: &AuthenticatedUser, id: i32) -> DomainResult<()> {
        self.owned(principal, id).await?;
        self.repos.notifications().delete(id).await?;
        Ok(())
    }

    /// Writes one row per active user in a single transaction and returns
    /// the number of recipients.
    pub async fn broadcast(
        &self,
        principal: &AuthenticatedUser,
        broadcast: BroadcastMessage,
    ) -> DomainResult<u64> {
        principal.ensure_admin()?;
        let title = required("Title", &broadcast.title)?;
        let message = required("Message", &broadcast.message)?;
        let notification_type = non_blank(broadcast.notification_type)
            .unwrap_or_else(|| DEFAULT_NOTIFICATION_TYPE.to_string());

        let recipients = self.repos.users().list_active_ids().await?;
        let rows = recipients
            .into_iter()
            .map(|user_id| NewNotification {
                user_id: Some(user_id),
                title: title.clone(),
                message: message.clone(),
                notification_type: notification_type.clone(),
                related_appointment_id: None,
            })
            .collect();

        let sent = self.repos.notifications().create_many(rows).await?;
        info!(recipients = sent, sender = %principal.username, "Notification broadcast");
        Ok(sent)
    }

    /// Notifications are private to their recipient, admins included.
    async fn owned(&self, principal: &AuthenticatedUser, id: i32) -> DomainResult<Notification> {
        let notification = self
            .repos
            .notifications()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Notification", id))?;

        if notification.user_id != Some(principal.user_id) {
            return Err(DomainError::Forbidden("Access denied".into()));
        }
        Ok(notification)
    }
}

/// Notification telling the owner about a new appointment status.
pub fn appointment_notice(
    user_id: i32,
    appointment_id: i32,
    status: AppointmentStatus,
    service_name: &str,
) -> NewNotification {
    let (title, message) = match status {
        AppointmentStatus::Scheduled => (
            "Appointment scheduled",
            format!("Your appointment for {} has been scheduled.", service_name),
        ),
        AppointmentStatus::InProgress => (
            "Work started",
            format!("Work on {} for your vehicle has started.", service_name),
        ),
        AppointmentStatus::Completed => (
            "Service completed",
            format!("{} is complete. Your vehicle is ready for pickup.", service_name),
        ),
        AppointmentStatus::Cancelled => (
            "Appointment cancelled",
            format!("Your appointment for {} has been cancelled.", service_name),
        ),
    };

    NewNotification {
        user_id: Some(user_id),
        title: title.to_string(),
        message,
        notification_type: APPOINTMENT_NOTIFICATION_TYPE.to_string(),
        related_appointment_id: Some(appointment_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UpdateUserDto;
    use crate::application::services::testing::fixture;

    fn news() -> BroadcastMessage {
        BroadcastMessage {
            title: "Holiday hours".into(),
            message: "Closed on Monday".into(),
            notification_type: None,
        }
    }

    #[tokio::test]
    async fn broadcast_reaches_every_active_user() {
        let f = fixture().await;
        let notifications = NotificationService::new(f.repos.clone());

        // admin, user, alice, mallory
        let sent = notifications.broadcast(&f.admin, news()).await.unwrap();
        assert_eq!(sent, 4);

        let inbox = notifications.list(&f.alice, false).await.unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].title, "Holiday hours");
        assert_eq!(inbox[0].message, "Closed on Monday");
        assert_eq!(inbox[0].notification_type, DEFAULT_NOTIFICATION_TYPE);
    }

    #[tokio::test]
    async fn broadcast_skips_inactive_users() {
        let f = fixture().await;
        f.repos
            .users()
            .update(
                f.mallory.user_id,
                UpdateUserDto {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let notifications = NotificationService::new(f.repos.clone());

        assert_eq!(notifications.broadcast(&f.admin, news()).await.unwrap(), 3);
        assert!(notifications.list(&f.mallory, false).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn only_admins_broadcast() {
        let f = fixture().await;
        let notifications = NotificationService::new(f.repos.clone());
        assert!(matches!(
            notifications.broadcast(&f.alice, news()).await,
            Err(DomainError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn read_state_is_tracked_per_owner() {
        let f = fixture().await;
        let notifications = NotificationService::new(f.repos.clone());
        notifications.broadcast(&f.admin, news()).await.unwrap();
        notifications.broadcast(&f.admin, news()).await.unwrap();

        let inbox = notifications.list(&f.alice, true).await.unwrap();
        assert_eq!(notifications.unread_count(&f.alice).await.unwrap(), 2);

        assert!(matches!(
            notifications.mark_read(&f.mallory, inbox[0].id).await,
            Err(DomainError::Forbidden(_))
        ));
        notifications.mark_read(&f.alice, inbox[0].id).await.unwrap();
        assert_eq!(notifications.unread_count(&f.alice).await.unwrap(), 1);

        assert_eq!(notifications.mark_all_read(&f.alice).await.unwrap(), 1);
        assert!(notifications.list(&f.alice, true).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn owner_deletes_notification() {
        let f = fixture().await;
        let notifications = NotificationService::new(f.repos.clone());
        notifications.broadcast(&f.admin, news()).await.unwrap();
        let id = notifications.list(&f.alice, false).await.unwrap()[0].id;

        assert!(matches!(
            notifications.delete(&f.admin, id).await,
            Err(DomainError::Forbidden(_))
        ));
        notifications.delete(&f.alice, id).await.unwrap();
        assert!(matches!(
            notifications.delete(&f.alice, id).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[test]
    fn appointment_notice_links_the_appointment() {
        let notice = appointment_notice(3, 9, AppointmentStatus::Completed, "Oil change");
        assert_eq!(notice.user_id, Some(3));
        assert_eq!(notice.related_appointment_id, Some(9));
        assert_eq!(notice.notification_type, APPOINTMENT_NOTIFICATION_TYPE);
        assert!(notice.message.starts_with("Oil change"));
    }
}
