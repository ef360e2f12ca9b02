use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::auth::{command::CreateToken, AccessToken};
use crate::model::id::UserId;

#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Checks the supplied credentials against the stored hash and
    /// returns the matching user id.
    async fn verify_user(&self, email: &str, password: &str) -> AppResult<UserId>;
    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken>;
    /// Recovers the subject of a presented token. Malformed, expired or
    /// forged tokens fail with an authorization error.
    async fn fetch_user_id_from_token(&self, access_token: &AccessToken) -> AppResult<UserId>;
}
