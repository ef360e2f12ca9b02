use async_trait::async_trait;
use derive_new::new;

use kernel::model::event::Event;
use kernel::model::id::{EventId, RegistrationId, UserId};
use kernel::model::registration::{
    command::{CreateRegistration, DeleteRegistration},
    Registration,
};
use kernel::model::user::User;
use kernel::repository::registration::RegistrationRepository;
use shared::error::{AppError, AppResult};

use crate::database::model::{event::EventRow, user::UserRow};
use crate::database::{is_unique_violation, ConnectionPool};

#[derive(new)]
pub struct RegistrationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl RegistrationRepository for RegistrationRepositoryImpl {
    async fn create(&self, event: CreateRegistration) -> AppResult<Registration> {
        let mut tx = self.db.begin().await?;

        // The event must exist before a registration can reference it.
        let found: Option<EventId> = sqlx::query_scalar(
            r#"
                SELECT event_id
                FROM events
                WHERE event_id = $1
            "#,
        )
        .bind(event.event_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if found.is_none() {
            return Err(AppError::EntityNotFound(format!(
                "event ({}) not found",
                event.event_id
            )));
        }

        // The UNIQUE (user_id, event_id) constraint decides duplicates,
        // not a pre-check, so a racing insert still ends up as a conflict.
        let registration_id = RegistrationId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO registrations (registration_id, user_id, event_id)
                VALUES ($1, $2, $3)
            "#,
        )
        .bind(registration_id)
        .bind(event.user_id)
        .bind(event.event_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::ResourceConflict(format!(
                    "user ({}) is already registered for event ({})",
                    event.user_id, event.event_id
                ))
            } else {
                AppError::SpecificOperationError(e)
            }
        })?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No registration record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(Registration {
            registration_id,
            user_id: event.user_id,
            event_id: event.event_id,
        })
    }

    async fn delete(&self, event: DeleteRegistration) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                DELETE FROM registrations
                WHERE user_id = $1 AND event_id = $2
            "#,
        )
        .bind(event.user_id)
        .bind(event.event_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "no registration of user ({}) for event ({})",
                event.user_id, event.event_id
            )));
        }

        Ok(())
    }

    async fn find_attendees_by_event_id(&self, event_id: EventId) -> AppResult<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
                SELECT u.user_id, u.email
                FROM registrations AS r
                INNER JOIN users AS u ON u.user_id = r.user_id
                WHERE r.event_id = $1
                ORDER BY r.created_at ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_events_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Event>> {
        let rows: Vec<EventRow> = sqlx::query_as(
            r#"
                SELECT
                    e.event_id,
                    e.event_name,
                    e.description,
                    e.location,
                    e.organized_by,
                    u.email AS organizer_email
                FROM registrations AS r
                INNER JOIN events AS e ON e.event_id = r.event_id
                INNER JOIN users AS u ON u.user_id = e.organized_by
                WHERE r.user_id = $1
                ORDER BY r.created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Event::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use kernel::model::event::command::CreateEvent;
    use kernel::model::user::command::CreateUser;
    use kernel::repository::event::EventRepository;
    use kernel::repository::user::UserRepository;

    use crate::repository::{event::EventRepositoryImpl, user::UserRepositoryImpl};

    async fn register_user(db: &ConnectionPool, email: &str) -> anyhow::Result<User> {
        let repo = UserRepositoryImpl::new(db.clone());
        Ok(repo
            .create(CreateUser {
                email: email.into(),
                password: "pw1".into(),
            })
            .await?)
    }

    async fn register_event(db: &ConnectionPool, organizer: UserId) -> anyhow::Result<EventId> {
        let repo = EventRepositoryImpl::new(db.clone());
        Ok(repo
            .create(CreateEvent::new(
                "Meetup".into(),
                "d".into(),
                "NY".into(),
                organizer,
            ))
            .await?)
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_register_for_event(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        let organizer = register_user(&db, "organizer@example.com").await?;
        let attendee = register_user(&db, "attendee@example.com").await?;
        let event_id = register_event(&db, organizer.user_id).await?;
        let repo = RegistrationRepositoryImpl::new(db);

        let registration = repo
            .create(CreateRegistration::new(event_id, attendee.user_id))
            .await?;
        assert_eq!(registration.user_id, attendee.user_id);
        assert_eq!(registration.event_id, event_id);

        let attendees = repo.find_attendees_by_event_id(event_id).await?;
        assert_eq!(attendees.len(), 1);
        assert_eq!(attendees[0].user_id, attendee.user_id);

        let events = repo.find_events_by_user_id(attendee.user_id).await?;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_id, event_id);

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_duplicate_registration_conflicts(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        let organizer = register_user(&db, "organizer@example.com").await?;
        let attendee = register_user(&db, "attendee@example.com").await?;
        let event_id = register_event(&db, organizer.user_id).await?;
        let repo = RegistrationRepositoryImpl::new(db);

        repo.create(CreateRegistration::new(event_id, attendee.user_id))
            .await?;

        let res = repo
            .create(CreateRegistration::new(event_id, attendee.user_id))
            .await;
        assert!(matches!(res, Err(AppError::ResourceConflict(_))));

        // One registration, not two.
        let attendees = repo.find_attendees_by_event_id(event_id).await?;
        assert_eq!(attendees.len(), 1);

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_cancel_then_re_register(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        let organizer = register_user(&db, "organizer@example.com").await?;
        let attendee = register_user(&db, "attendee@example.com").await?;
        let event_id = register_event(&db, organizer.user_id).await?;
        let repo = RegistrationRepositoryImpl::new(db);

        repo.create(CreateRegistration::new(event_id, attendee.user_id))
            .await?;
        repo.delete(DeleteRegistration::new(event_id, attendee.user_id))
            .await?;

        assert!(repo.find_attendees_by_event_id(event_id).await?.is_empty());

        repo.create(CreateRegistration::new(event_id, attendee.user_id))
            .await?;

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_register_for_missing_event_is_not_found(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        let attendee = register_user(&db, "attendee@example.com").await?;
        let repo = RegistrationRepositoryImpl::new(db);

        let res = repo
            .create(CreateRegistration::new(EventId::new(), attendee.user_id))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_cancel_without_registration_is_not_found(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        let organizer = register_user(&db, "organizer@example.com").await?;
        let attendee = register_user(&db, "attendee@example.com").await?;
        let event_id = register_event(&db, organizer.user_id).await?;
        let repo = RegistrationRepositoryImpl::new(db);

        let res = repo
            .delete(DeleteRegistration::new(event_id, attendee.user_id))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));

        Ok(())
    }
}
