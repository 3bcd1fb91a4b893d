use sqlx::{PgPool, QueryBuilder};
use tracing::instrument;

use crate::modules::events::model::{CreateEventDto, Event, UpdateEventDto};
use crate::policy::{EntityKind, Predicate};
use crate::repo::{self, sql};
use crate::utils::errors::AppError;

pub struct EventService;

impl EventService {
    #[instrument(skip(db, predicate))]
    pub async fn list(
        db: &PgPool,
        predicate: &Predicate,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Event>, i64), AppError> {
        let mut qb = QueryBuilder::new(
            "SELECT events.id, events.title, events.description, events.start_time, \
             events.end_time, events.class_id, classes.name AS class_name \
             FROM events \
             LEFT JOIN classes ON classes.id = events.class_id \
             WHERE ",
        );
        sql::push_predicate(&mut qb, EntityKind::Event, predicate);
        qb.push(" ORDER BY events.start_time DESC LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        let rows = qb.build_query_as::<Event>().fetch_all(db).await?;
        let total = repo::count(db, EntityKind::Event, predicate).await?;

        Ok((rows, total))
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: i32) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "SELECT events.id, events.title, events.description, events.start_time, \
             events.end_time, events.class_id, classes.name AS class_name \
             FROM events \
             LEFT JOIN classes ON classes.id = events.class_id \
             WHERE events.id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Event not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateEventDto) -> Result<Event, AppError> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO events (title, description, start_time, end_time, class_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.start_time)
        .bind(dto.end_time)
        .bind(dto.class_id)
        .fetch_one(db)
        .await
        .map_err(|e| repo::constraint_error(e, "Event"))?;

        Self::get(db, id).await
    }

    #[instrument(skip(db, dto))]
    pub async fn update(db: &PgPool, id: i32, dto: UpdateEventDto) -> Result<Event, AppError> {
        let updated = sqlx::query(
            "UPDATE events SET \
             title = COALESCE($2, title), \
             description = COALESCE($3, description), \
             start_time = COALESCE($4, start_time), \
             end_time = COALESCE($5, end_time), \
             class_id = CASE WHEN $6 THEN $7 ELSE class_id END \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.start_time)
        .bind(dto.end_time)
        .bind(dto.class_id.is_some())
        .bind(dto.class_id.flatten())
        .execute(db)
        .await
        .map_err(|e| repo::constraint_error(e, "Event"))?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found("Event not found"));
        }
        Self::get(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: i32) -> Result<(), AppError> {
        let deleted = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::not_found("Event not found"));
        }
        Ok(())
    }
}
