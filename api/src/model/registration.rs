use kernel::model::{
    id::{EventId, RegistrationId, UserId},
    registration::Registration,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub registration_id: RegistrationId,
    pub user_id: UserId,
    pub event_id: EventId,
}

impl From<Registration> for RegistrationResponse {
    fn from(value: Registration) -> Self {
        let Registration {
            registration_id,
            user_id,
            event_id,
        } = value;
        Self {
            registration_id,
            user_id,
            event_id,
        }
    }
}
