use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use kernel::model::{
    id::EventId,
    registration::command::{CreateRegistration, DeleteRegistration},
};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{
    extractor::AuthorizedUser,
    model::{registration::RegistrationResponse, user::UsersResponse},
};

pub async fn register_for_event(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<(StatusCode, Json<RegistrationResponse>)> {
    registry
        .registration_repository()
        .create(CreateRegistration::new(event_id, user.id()))
        .await
        .map(|registration| (StatusCode::CREATED, Json(registration.into())))
}

pub async fn cancel_registration(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .registration_repository()
        .delete(DeleteRegistration::new(event_id, user.id()))
        .await
        .map(|_| StatusCode::OK)
}

pub async fn show_attendees(
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<UsersResponse>> {
    registry
        .registration_repository()
        .find_attendees_by_event_id(event_id)
        .await
        .map(UsersResponse::from)
        .map(Json)
}
