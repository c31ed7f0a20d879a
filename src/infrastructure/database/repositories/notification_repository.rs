//! SeaORM implementation of NotificationRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use super::db_err;
use crate::domain::notification::{NewNotification, Notification, NotificationRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::notification;

pub struct SeaOrmNotificationRepository {
    db: DatabaseConnection,
}

impl SeaOrmNotificationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: notification::Model) -> Notification {
    Notification {
        id: m.id,
        user_id: m.user_id,
        title: m.title,
        message: m.message,
        notification_type: m.notification_type,
        related_appointment_id: m.related_appointment_id,
        is_read: m.is_read,
        sent_at: m.sent_at,
    }
}

fn to_active(n: NewNotification, sent_at: chrono::DateTime<Utc>) -> notification::ActiveModel {
    notification::ActiveModel {
        user_id: Set(n.user_id),
        title: Set(n.title),
        message: Set(n.message),
        notification_type: Set(n.notification_type),
        related_appointment_id: Set(n.related_appointment_id),
        is_read: Set(false),
        sent_at: Set(sent_at),
        ..Default::default()
    }
}

// ── NotificationRepository impl ─────────────────────────────────

#[async_trait]
impl NotificationRepository for SeaOrmNotificationRepository {
    async fn create(&self, n: NewNotification) -> DomainResult<Notification> {
        let model = to_active(n, Utc::now())
            .insert(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model_to_domain(model))
    }

    async fn create_many(&self, notifications: Vec<NewNotification>) -> DomainResult<u64> {
        if notifications.is_empty() {
            return Ok(0);
        }

        let count = notifications.len() as u64;
        let now = Utc::now();
        let rows: Vec<notification::ActiveModel> =
            notifications.into_iter().map(|n| to_active(n, now)).collect();

        let txn = self.db.begin().await.map_err(db_err)?;
        notification::Entity::insert_many(rows)
            .exec(&txn)
            .await
            .map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;

        debug!(count, "Inserted notifications in one transaction");
        Ok(count)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Notification>> {
        let model = notification::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(model_to_domain))
    }

    async fn list_for_user(&self, user_id: i32, unread_only: bool) -> DomainResult<Vec<Notification>> {
        let mut query =
            notification::Entity::find().filter(notification::Column::UserId.eq(user_id));
        if unread_only {
            query = query.filter(notification::Column::IsRead.eq(false));
        }

        let models = query
            .order_by_desc(notification::Column::SentAt)
            .order_by_desc(notification::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn mark_read(&self, id: i32) -> DomainResult<bool> {
        let result = notification::Entity::update_many()
            .col_expr(notification::Column::IsRead, Expr::value(true))
            .filter(notification::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn mark_all_read(&self, user_id: i32) -> DomainResult<u64> {
        let result = notification::Entity::update_many()
            .col_expr(notification::Column::IsRead, Expr::value(true))
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::IsRead.eq(false))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected)
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        let result = notification::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn unread_count(&self, user_id: i32) -> DomainResult<u64> {
        notification::Entity::find()
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::IsRead.eq(false))
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_support::{insert_user, test_connection};

    #[tokio::test]
    async fn create_many_inserts_every_row() {
        let db = test_connection().await;
        let a = insert_user(&db, "ana").await;
        let b = insert_user(&db, "boris").await;
        let repo = SeaOrmNotificationRepository::new(db);

        let written = repo
            .create_many(vec![
                NewNotification::info(a, "Closed Friday", "The shop is closed on Friday."),
                NewNotification::info(b, "Closed Friday", "The shop is closed on Friday."),
            ])
            .await
            .unwrap();
        assert_eq!(written, 2);
        assert_eq!(repo.create_many(Vec::new()).await.unwrap(), 0);

        let for_b = repo.list_for_user(b, false).await.unwrap();
        assert_eq!(for_b.len(), 1);
        assert_eq!(for_b[0].title, "Closed Friday");
    }

    #[tokio::test]
    async fn read_flags_and_unread_count() {
        let db = test_connection().await;
        let a = insert_user(&db, "ana").await;
        let repo = SeaOrmNotificationRepository::new(db);

        let first = repo.create(NewNotification::info(a, "One", "1")).await.unwrap();
        repo.create(NewNotification::info(a, "Two", "2")).await.unwrap();
        repo.create(NewNotification::info(a, "Three", "3")).await.unwrap();
        assert_eq!(repo.unread_count(a).await.unwrap(), 3);

        assert!(repo.mark_read(first.id).await.unwrap());
        assert_eq!(repo.unread_count(a).await.unwrap(), 2);
        assert_eq!(repo.list_for_user(a, true).await.unwrap().len(), 2);

        assert_eq!(repo.mark_all_read(a).await.unwrap(), 2);
        assert_eq!(repo.unread_count(a).await.unwrap(), 0);
        assert_eq!(repo.list_for_user(a, false).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn delete_missing_notification_returns_false() {
        let repo = SeaOrmNotificationRepository::new(test_connection().await);
        assert!(!repo.delete(42).await.unwrap());
        assert!(!repo.mark_read(42).await.unwrap());
    }
}
