use async_trait::async_trait;
use derive_new::new;

use kernel::model::event::{
    command::{CreateEvent, DeleteEvent, UpdateEvent},
    Event,
};
use kernel::model::id::{EventId, UserId};
use kernel::repository::event::EventRepository;
use shared::error::{AppError, AppResult};

use crate::database::model::event::EventRow;
use crate::database::ConnectionPool;

#[derive(new)]
pub struct EventRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl EventRepository for EventRepositoryImpl {
    async fn create(&self, event: CreateEvent) -> AppResult<EventId> {
        let event_id = EventId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO events (event_id, event_name, description, location, organized_by)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(event_id)
        .bind(&event.event_name)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.organized_by)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No event record has been created".into(),
            ));
        }

        Ok(event_id)
    }

    async fn find_all(&self) -> AppResult<Vec<Event>> {
        let rows: Vec<EventRow> = sqlx::query_as(
            r#"
                SELECT
                    e.event_id,
                    e.event_name,
                    e.description,
                    e.location,
                    e.organized_by,
                    u.email AS organizer_email
                FROM events AS e
                INNER JOIN users AS u ON u.user_id = e.organized_by
                ORDER BY e.created_at DESC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Event::from).collect())
    }

    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>> {
        let row: Option<EventRow> = sqlx::query_as(
            r#"
                SELECT
                    e.event_id,
                    e.event_name,
                    e.description,
                    e.location,
                    e.organized_by,
                    u.email AS organizer_email
                FROM events AS e
                INNER JOIN users AS u ON u.user_id = e.organized_by
                WHERE e.event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Event::from))
    }

    async fn update(&self, event: UpdateEvent) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        self.ensure_requested_by_organizer(&mut tx, event.event_id, event.requested_user)
            .await?;

        let res = sqlx::query(
            r#"
                UPDATE events
                SET event_name = $1, description = $2, location = $3
                WHERE event_id = $4
            "#,
        )
        .bind(&event.event_name)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.event_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No event record has been updated".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn delete(&self, event: DeleteEvent) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        self.ensure_requested_by_organizer(&mut tx, event.event_id, event.requested_user)
            .await?;

        // Registrations for the event go with it (ON DELETE CASCADE).
        let res = sqlx::query(
            r#"
                DELETE FROM events
                WHERE event_id = $1
            "#,
        )
        .bind(event.event_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No event record has been deleted".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }
}

impl EventRepositoryImpl {
    /// The event must exist, and only its organizer may mutate it.
    async fn ensure_requested_by_organizer(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        event_id: EventId,
        requested_user: UserId,
    ) -> AppResult<()> {
        let organized_by: Option<UserId> = sqlx::query_scalar(
            r#"
                SELECT organized_by
                FROM events
                WHERE event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        match organized_by {
            None => Err(AppError::EntityNotFound(format!(
                "event ({}) not found",
                event_id
            ))),
            Some(organizer_id) if organizer_id != requested_user => {
                Err(AppError::ForbiddenOperation)
            }
            Some(_) => Ok(()),
        }
    }
}
