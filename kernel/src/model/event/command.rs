use derive_new::new;

use crate::model::id::{EventId, UserId};

#[derive(new)]
pub struct CreateEvent {
    pub event_name: String,
    pub description: String,
    pub location: String,
    pub organized_by: UserId,
}

#[derive(Debug)]
pub struct UpdateEvent {
    pub event_id: EventId,
    pub event_name: String,
    pub description: String,
    pub location: String,
    pub requested_user: UserId,
}

#[derive(Debug)]
pub struct DeleteEvent {
    pub event_id: EventId,
    pub requested_user: UserId,
}
