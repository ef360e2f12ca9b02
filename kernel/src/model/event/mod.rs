use crate::model::id::{EventId, UserId};

pub mod command;

#[derive(Debug)]
pub struct Event {
    pub event_id: EventId,
    pub event_name: String,
    pub description: String,
    pub location: String,
    pub organizer: EventOrganizer,
}

#[derive(Debug)]
pub struct EventOrganizer {
    pub organizer_id: UserId,
    pub email: String,
}
