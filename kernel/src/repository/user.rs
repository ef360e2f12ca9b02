use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::id::UserId;
use crate::model::user::{command::CreateUser, User};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, event: CreateUser) -> AppResult<User>;
    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>>;
}
