use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::event::{
    delete_event, register_event, show_event, show_event_list, update_event,
};
use crate::handler::registration::{cancel_registration, register_for_event, show_attendees};

pub fn build_event_routers() -> Router<AppRegistry> {
    let event_routers = Router::new()
        .route("/", post(register_event))
        .route("/", get(show_event_list))
        .route("/:event_id", get(show_event))
        .route("/:event_id", put(update_event))
        .route("/:event_id", delete(delete_event))
        .route("/:event_id/registrations", post(register_for_event))
        .route("/:event_id/registrations", delete(cancel_registration))
        .route("/:event_id/attendees", get(show_attendees));

    Router::new().nest("/events", event_routers)
}
