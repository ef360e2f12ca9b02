use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::event::Event;
use crate::model::id::{EventId, UserId};
use crate::model::registration::{
    command::{CreateRegistration, DeleteRegistration},
    Registration,
};
use crate::model::user::User;

#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Registers a user for an event. The event must exist and the
    /// (user, event) pair must not already be registered.
    async fn create(&self, event: CreateRegistration) -> AppResult<Registration>;
    /// Cancels an existing registration.
    async fn delete(&self, event: DeleteRegistration) -> AppResult<()>;
    /// Lists the users registered for an event.
    async fn find_attendees_by_event_id(&self, event_id: EventId) -> AppResult<Vec<User>>;
    /// Lists the events a user is registered for.
    async fn find_events_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Event>>;
}
