use derive_new::new;
use garde::Validate;
use kernel::model::{
    event::{
        command::{CreateEvent, UpdateEvent},
        Event,
    },
    id::{EventId, UserId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[garde(length(min = 1))]
    pub event_name: String,
    #[garde(skip)]
    pub description: String,
    #[garde(length(min = 1))]
    pub location: String,
}

#[derive(new)]
pub struct CreateEventRequestWithOrganizer(UserId, CreateEventRequest);

impl From<CreateEventRequestWithOrganizer> for CreateEvent {
    fn from(value: CreateEventRequestWithOrganizer) -> Self {
        let CreateEventRequestWithOrganizer(
            organized_by,
            CreateEventRequest {
                event_name,
                description,
                location,
            },
        ) = value;
        CreateEvent {
            event_name,
            description,
            location,
            organized_by,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[garde(length(min = 1))]
    pub event_name: String,
    #[garde(skip)]
    pub description: String,
    #[garde(length(min = 1))]
    pub location: String,
}

#[derive(new)]
pub struct UpdateEventRequestWithIds(EventId, UserId, UpdateEventRequest);

impl From<UpdateEventRequestWithIds> for UpdateEvent {
    fn from(value: UpdateEventRequestWithIds) -> Self {
        let UpdateEventRequestWithIds(
            event_id,
            requested_user,
            UpdateEventRequest {
                event_name,
                description,
                location,
            },
        ) = value;
        UpdateEvent {
            event_id,
            event_name,
            description,
            location,
            requested_user,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsResponse {
    pub items: Vec<EventResponse>,
}

impl From<Vec<Event>> for EventsResponse {
    fn from(value: Vec<Event>) -> Self {
        Self {
            items: value.into_iter().map(EventResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub event_id: EventId,
    pub event_name: String,
    pub description: String,
    pub location: String,
    pub organizer_id: UserId,
    pub organizer_email: String,
}

impl From<Event> for EventResponse {
    fn from(value: Event) -> Self {
        let Event {
            event_id,
            event_name,
            description,
            location,
            organizer,
        } = value;
        Self {
            event_id,
            event_name,
            description,
            location,
            organizer_id: organizer.organizer_id,
            organizer_email: organizer.email,
        }
    }
}
