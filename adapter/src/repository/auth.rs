use std::sync::Arc;

use async_trait::async_trait;
use derive_new::new;

use kernel::model::auth::{command::CreateToken, AccessToken};
use kernel::model::id::UserId;
use kernel::repository::auth::AuthRepository;
use shared::error::{AppError, AppResult};

use crate::database::model::user::UserCredentialRow;
use crate::database::ConnectionPool;
use crate::password::verify_password;
use crate::token::TokenCodec;

#[derive(new)]
pub struct AuthRepositoryImpl {
    db: ConnectionPool,
    token_codec: Arc<TokenCodec>,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn verify_user(&self, email: &str, password: &str) -> AppResult<UserId> {
        let row: Option<UserCredentialRow> = sqlx::query_as(
            r#"
                SELECT user_id, password_hash
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        // Unknown email and wrong password are indistinguishable to the
        // caller.
        let Some(row) = row else {
            return Err(AppError::UnauthenticatedError);
        };
        if !verify_password(password, &row.password_hash) {
            return Err(AppError::UnauthenticatedError);
        }

        Ok(row.user_id)
    }

    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken> {
        self.token_codec.issue(event.user_id, &event.email)
    }

    async fn fetch_user_id_from_token(&self, access_token: &AccessToken) -> AppResult<UserId> {
        let claims = self.token_codec.validate(access_token)?;
        Ok(claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use kernel::model::user::command::CreateUser;
    use kernel::repository::user::UserRepository;
    use shared::config::AuthConfig;

    use crate::repository::user::UserRepositoryImpl;

    fn token_codec() -> Arc<TokenCodec> {
        Arc::new(TokenCodec::new(&AuthConfig {
            ttl: 3600,
            secret: "test-secret".into(),
        }))
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_verify_user(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        let user_repo = UserRepositoryImpl::new(db.clone());
        let repo = AuthRepositoryImpl::new(db, token_codec());

        let user = user_repo
            .create(CreateUser {
                email: "a@example.com".into(),
                password: "pw1".into(),
            })
            .await?;

        let verified = repo.verify_user("a@example.com", "pw1").await?;
        assert_eq!(verified, user.user_id);

        let res = repo.verify_user("a@example.com", "pw2").await;
        assert!(matches!(res, Err(AppError::UnauthenticatedError)));

        let res = repo.verify_user("b@example.com", "pw1").await;
        assert!(matches!(res, Err(AppError::UnauthenticatedError)));

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_token_round_trip(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = AuthRepositoryImpl::new(ConnectionPool::new(pool), token_codec());

        let user_id = UserId::new();
        let token = repo
            .create_token(CreateToken::new(user_id, "a@example.com".into()))
            .await?;

        let resolved = repo.fetch_user_id_from_token(&token).await?;
        assert_eq!(resolved, user_id);

        let res = repo
            .fetch_user_id_from_token(&AccessToken("garbage".into()))
            .await;
        assert!(matches!(res, Err(AppError::UnauthorizedError)));

        Ok(())
    }

    // A well-signed token whose subject is gone from the users table
    // must resolve to an authorization failure, the same as an invalid
    // token.
    #[sqlx::test(migrations = "../migrations")]
    async fn test_token_for_missing_user_is_unauthorized(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        let user_repo = UserRepositoryImpl::new(db.clone());
        let repo = AuthRepositoryImpl::new(db, token_codec());

        let token = repo
            .create_token(CreateToken::new(UserId::new(), "ghost@example.com".into()))
            .await?;

        // Same composition the extractor performs to resolve a caller.
        let user_id = repo.fetch_user_id_from_token(&token).await?;
        let res = user_repo
            .find_current_user(user_id)
            .await?
            .ok_or(AppError::UnauthorizedError);
        assert!(matches!(res, Err(AppError::UnauthorizedError)));

        Ok(())
    }
}
