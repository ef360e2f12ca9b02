use crate::model::id::{EventId, RegistrationId, UserId};

pub mod command;

#[derive(Debug)]
pub struct Registration {
    pub registration_id: RegistrationId,
    pub user_id: UserId,
    pub event_id: EventId,
}
