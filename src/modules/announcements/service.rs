use sqlx::{PgPool, QueryBuilder};
use tracing::instrument;

use crate::modules::announcements::model::{
    Announcement, CreateAnnouncementDto, UpdateAnnouncementDto,
};
use crate::policy::{EntityKind, Predicate};
use crate::repo::{self, sql};
use crate::utils::errors::AppError;

pub struct AnnouncementService;

impl AnnouncementService {
    /// Page of announcements matching `predicate`, newest first, plus the
    /// total count under the same predicate.
    #[instrument(skip(db, predicate))]
    pub async fn list(
        db: &PgPool,
        predicate: &Predicate,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Announcement>, i64), AppError> {
        let mut qb = QueryBuilder::new(
            "SELECT announcements.id, announcements.title, announcements.description, \
             announcements.date, announcements.class_id, classes.name AS class_name \
             FROM announcements \
             LEFT JOIN classes ON classes.id = announcements.class_id \
             WHERE ",
        );
        sql::push_predicate(&mut qb, EntityKind::Announcement, predicate);
        qb.push(" ORDER BY announcements.date DESC LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        let rows = qb.build_query_as::<Announcement>().fetch_all(db).await?;
        let total = repo::count(db, EntityKind::Announcement, predicate).await?;

        Ok((rows, total))
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: i32) -> Result<Announcement, AppError> {
        sqlx::query_as::<_, Announcement>(
            "SELECT announcements.id, announcements.title, announcements.description, \
             announcements.date, announcements.class_id, classes.name AS class_name \
             FROM announcements \
             LEFT JOIN classes ON classes.id = announcements.class_id \
             WHERE announcements.id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Announcement not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateAnnouncementDto) -> Result<Announcement, AppError> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO announcements (title, description, date, class_id) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.date)
        .bind(dto.class_id)
        .fetch_one(db)
        .await
        .map_err(|e| repo::constraint_error(e, "Announcement"))?;

        Self::get(db, id).await
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: i32,
        dto: UpdateAnnouncementDto,
    ) -> Result<Announcement, AppError> {
        let updated = sqlx::query(
            "UPDATE announcements SET \
             title = COALESCE($2, title), \
             description = COALESCE($3, description), \
             date = COALESCE($4, date), \
             class_id = CASE WHEN $5 THEN $6 ELSE class_id END \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.date)
        .bind(dto.class_id.is_some())
        .bind(dto.class_id.flatten())
        .execute(db)
        .await
        .map_err(|e| repo::constraint_error(e, "Announcement"))?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found("Announcement not found"));
        }
        Self::get(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: i32) -> Result<(), AppError> {
        let deleted = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::not_found("Announcement not found"));
        }
        Ok(())
    }
}
