use derive_new::new;

use crate::model::id::UserId;

#[derive(new)]
pub struct CreateToken {
    pub user_id: UserId,
    pub email: String,
}
