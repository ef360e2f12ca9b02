use async_trait::async_trait;
use derive_new::new;

use kernel::model::id::UserId;
use kernel::model::user::{command::CreateUser, User};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

use crate::database::model::user::UserRow;
use crate::database::{is_unique_violation, ConnectionPool};
use crate::password::hash_password;

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, event: CreateUser) -> AppResult<User> {
        let user_id = UserId::new();
        let password_hash = hash_password(&event.password)?;

        let res = sqlx::query(
            r#"
                INSERT INTO users (user_id, email, password_hash)
                VALUES ($1, $2, $3)
            "#,
        )
        .bind(user_id)
        .bind(&event.email)
        .bind(password_hash)
        .execute(self.db.inner_ref())
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::ResourceConflict(format!("email ({}) already exists", event.email))
            } else {
                AppError::SpecificOperationError(e)
            }
        })?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No user record has been created".into(),
            ));
        }

        Ok(User {
            user_id,
            email: event.email,
        })
    }

    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
                SELECT user_id, email
                FROM users
                WHERE user_id = $1
            "#,
        )
        .bind(current_user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(User::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "../migrations")]
    async fn test_register_user(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool));

        let user = repo
            .create(CreateUser {
                email: "a@example.com".into(),
                password: "pw1".into(),
            })
            .await?;
        assert_eq!(user.email, "a@example.com");

        let found = repo.find_current_user(user.user_id).await?;
        assert_eq!(found, Some(user));

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_duplicate_email_conflicts(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool));

        repo.create(CreateUser {
            email: "a@example.com".into(),
            password: "pw1".into(),
        })
        .await?;

        let res = repo
            .create(CreateUser {
                email: "a@example.com".into(),
                password: "another-pw".into(),
            })
            .await;
        assert!(matches!(res, Err(AppError::ResourceConflict(_))));

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_unknown_user_is_none(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool));

        let found = repo.find_current_user(UserId::new()).await?;
        assert!(found.is_none());

        Ok(())
    }
}
