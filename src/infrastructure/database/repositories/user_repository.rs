//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::{contains_pattern, db_err, write_err, USER_SEARCH_LIMIT};
use crate::domain::user::{
    NewUser, UpdateUserDto, User, UserCredentials, UserRepository, UserRole,
};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::user;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: i32) -> DomainResult<Option<user::Model>> {
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::User => UserRole::User,
        user::UserRole::Admin => UserRole::Admin,
    }
}

fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::User => user::UserRole::User,
        UserRole::Admin => user::UserRole::Admin,
    }
}

fn model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        full_name: model.full_name,
        phone: model.phone,
        role: entity_role_to_domain(model.role),
        is_active: model.is_active,
        created_at: model.created_at,
        last_login_at: model.last_login_at,
    }
}

fn model_to_credentials(mut model: user::Model) -> UserCredentials {
    let password_hash = std::mem::take(&mut model.password_hash);
    UserCredentials {
        user: model_to_domain(model),
        password_hash,
    }
}

const DUPLICATE_USER: &str = "Username or email already exists";

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, dto: NewUser) -> DomainResult<User> {
        let new_user = user::ActiveModel {
            username: Set(dto.username),
            email: Set(dto.email),
            password_hash: Set(dto.password_hash),
            full_name: Set(dto.full_name),
            phone: Set(dto.phone),
            role: Set(domain_role_to_entity(dto.role)),
            is_active: Set(true),
            created_at: Set(Utc::now()),
            last_login_at: Set(None),
            reset_token: Set(None),
            reset_token_expires_at: Set(None),
            ..Default::default()
        };

        let model = new_user
            .insert(&self.db)
            .await
            .map_err(|e| write_err(e, DUPLICATE_USER))?;

        Ok(model_to_domain(model))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        Ok(self.find_model(id).await?.map(model_to_domain))
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(model_to_domain))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(model_to_domain))
    }

    async fn list(&self) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .order_by_desc(user::Column::CreatedAt)
            .order_by_desc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn list_active_ids(&self) -> DomainResult<Vec<i32>> {
        user::Entity::find()
            .select_only()
            .column(user::Column::Id)
            .filter(user::Column::IsActive.eq(true))
            .order_by_asc(user::Column::Id)
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    async fn find_credentials(&self, identifier: &str) -> DomainResult<Option<UserCredentials>> {
        let by_username = user::Entity::find()
            .filter(user::Column::Username.eq(identifier))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let model = match by_username {
            Some(model) => Some(model),
            None => user::Entity::find()
                .filter(user::Column::Email.eq(identifier))
                .one(&self.db)
                .await
                .map_err(db_err)?,
        };

        Ok(model.map(model_to_credentials))
    }

    async fn find_credentials_by_id(&self, id: i32) -> DomainResult<Option<UserCredentials>> {
        Ok(self.find_model(id).await?.map(model_to_credentials))
    }

    async fn update(&self, id: i32, dto: UpdateUserDto) -> DomainResult<Option<User>> {
        let Some(existing) = self.find_model(id).await? else {
            return Ok(None);
        };

        if dto.is_empty() {
            return Ok(Some(model_to_domain(existing)));
        }

        let mut active: user::ActiveModel = existing.into();

        if let Some(email) = dto.email {
            active.email = Set(email);
        }
        if let Some(full_name) = dto.full_name {
            active.full_name = Set(Some(full_name));
        }
        if let Some(phone) = dto.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(role) = dto.role {
            active.role = Set(domain_role_to_entity(role));
        }
        if let Some(is_active) = dto.is_active {
            active.is_active = Set(is_active);
        }

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| write_err(e, DUPLICATE_USER))?;

        Ok(Some(model_to_domain(updated)))
    }

    async fn touch_last_login(&self, id: i32, at: DateTime<Utc>) -> DomainResult<()> {
        user::Entity::update_many()
            .col_expr(user::Column::LastLoginAt, Expr::value(at))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(())
    }

    async fn update_password(&self, id: i32, password_hash: &str) -> DomainResult<bool> {
        let result = user::Entity::update_many()
            .col_expr(user::Column::PasswordHash, Expr::value(password_hash))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn set_reset_token(
        &self,
        email: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> DomainResult<bool> {
        let result = user::Entity::update_many()
            .col_expr(user::Column::ResetToken, Expr::value(token))
            .col_expr(user::Column::ResetTokenExpiresAt, Expr::value(expires_at))
            .filter(user::Column::Email.eq(email))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn find_by_reset_token(&self, token: &str, now: DateTime<Utc>) -> DomainResult<Option<i32>> {
        let model = user::Entity::find()
            .filter(user::Column::ResetToken.eq(token))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.and_then(|m| match m.reset_token_expires_at {
            Some(expires_at) if expires_at > now => Some(m.id),
            _ => None,
        }))
    }

    async fn clear_reset_token(&self, id: i32) -> DomainResult<()> {
        user::Entity::update_many()
            .col_expr(user::Column::ResetToken, Expr::value(Option::<String>::None))
            .col_expr(
                user::Column::ResetTokenExpiresAt,
                Expr::value(Option::<DateTime<Utc>>::None),
            )
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn search(&self, query: &str) -> DomainResult<Vec<User>> {
        let pattern = contains_pattern(query.trim());
        let models = user::Entity::find()
            .filter(
                Condition::any()
                    .add(user::Column::Username.like(pattern.clone()))
                    .add(user::Column::Email.like(pattern.clone()))
                    .add(user::Column::FullName.like(pattern.clone()))
                    .add(user::Column::Phone.like(pattern.clone())),
            )
            .order_by_asc(user::Column::Username)
            .limit(USER_SEARCH_LIMIT)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
