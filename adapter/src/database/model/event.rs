use kernel::model::{
    event::{Event, EventOrganizer},
    id::{EventId, UserId},
};

#[derive(sqlx::FromRow)]
pub struct EventRow {
    pub event_id: EventId,
    pub event_name: String,
    pub description: String,
    pub location: String,
    pub organized_by: UserId,
    pub organizer_email: String,
}

impl From<EventRow> for Event {
    fn from(value: EventRow) -> Self {
        let EventRow {
            event_id,
            event_name,
            description,
            location,
            organized_by,
            organizer_email,
        } = value;
        Event {
            event_id,
            event_name,
            description,
            location,
            organizer: EventOrganizer {
                organizer_id: organized_by,
                email: organizer_email,
            },
        }
    }
}
