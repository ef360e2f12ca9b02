use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;

use kernel::model::{event::command::DeleteEvent, id::EventId};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::event::{
        CreateEventRequest, CreateEventRequestWithOrganizer, EventResponse, EventsResponse,
        UpdateEventRequest, UpdateEventRequestWithIds,
    },
};

pub async fn register_event(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateEventRequest>,
) -> AppResult<(StatusCode, Json<EventResponse>)> {
    req.validate(&())?;

    let create_event = CreateEventRequestWithOrganizer::new(user.id(), req);
    let event_id = registry
        .event_repository()
        .create(create_event.into())
        .await?;

    registry
        .event_repository()
        .find_by_id(event_id)
        .await?
        .map(|event| (StatusCode::CREATED, Json(event.into())))
        .ok_or_else(|| AppError::EntityNotFound(format!("event ({}) not found", event_id)))
}

pub async fn show_event_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventsResponse>> {
    registry
        .event_repository()
        .find_all()
        .await
        .map(EventsResponse::from)
        .map(Json)
}

pub async fn show_event(
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventResponse>> {
    registry
        .event_repository()
        .find_by_id(event_id)
        .await
        .and_then(|event| match event {
            Some(event) => Ok(Json(event.into())),
            None => Err(AppError::EntityNotFound(format!(
                "event ({}) not found",
                event_id
            ))),
        })
}

pub async fn update_event(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateEventRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    let update_event = UpdateEventRequestWithIds::new(event_id, user.id(), req);
    registry
        .event_repository()
        .update(update_event.into())
        .await
        .map(|_| StatusCode::OK)
}

pub async fn delete_event(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    let delete_event = DeleteEvent {
        event_id,
        requested_user: user.id(),
    };
    registry
        .event_repository()
        .delete(delete_event)
        .await
        .map(|_| StatusCode::OK)
}
