use axum::{
    extract::{Path, State},
    Json,
};

use kernel::model::id::UserId;
use registry::AppRegistry;
use shared::error::AppResult;

use crate::model::event::EventsResponse;

pub async fn show_user_registrations(
    Path(user_id): Path<UserId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventsResponse>> {
    registry
        .registration_repository()
        .find_events_by_user_id(user_id)
        .await
        .map(EventsResponse::from)
        .map(Json)
}
