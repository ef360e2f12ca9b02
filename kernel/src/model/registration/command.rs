use derive_new::new;

use crate::model::id::{EventId, UserId};

#[derive(new)]
pub struct CreateRegistration {
    pub event_id: EventId,
    pub user_id: UserId,
}

#[derive(new)]
pub struct DeleteRegistration {
    pub event_id: EventId,
    pub user_id: UserId,
}
