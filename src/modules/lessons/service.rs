use sqlx::{PgPool, QueryBuilder};
use tracing::instrument;

use crate::modules::lessons::model::{CreateLessonDto, Lesson, UpdateLessonDto};
use crate::policy::{EntityKind, Predicate};
use crate::repo::{self, sql};
use crate::utils::errors::AppError;

const SELECT: &str = "SELECT lessons.id, lessons.name, lessons.day, lessons.start_time, \
     lessons.end_time, lessons.subject_id, subjects.name AS subject_name, \
     lessons.class_id, classes.name AS class_name, \
     lessons.teacher_id, teachers.name AS teacher_name \
     FROM lessons \
     JOIN subjects ON subjects.id = lessons.subject_id \
     JOIN classes ON classes.id = lessons.class_id \
     JOIN teachers ON teachers.id = lessons.teacher_id";

pub struct LessonService;

impl LessonService {
    #[instrument(skip(db, predicate))]
    pub async fn list(
        db: &PgPool,
        predicate: &Predicate,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Lesson>, i64), AppError> {
        let mut qb = QueryBuilder::new(format!("{SELECT} WHERE "));
        sql::push_predicate(&mut qb, EntityKind::Lesson, predicate);
        qb.push(" ORDER BY lessons.start_time LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        let rows = qb.build_query_as::<Lesson>().fetch_all(db).await?;
        let total = repo::count(db, EntityKind::Lesson, predicate).await?;

        Ok((rows, total))
    }

    /// Every lesson matching `predicate`, unpaginated, ordered for a weekly
    /// schedule view.
    #[instrument(skip(db, predicate))]
    pub async fn schedule(db: &PgPool, predicate: &Predicate) -> Result<Vec<Lesson>, AppError> {
        let mut qb = QueryBuilder::new(format!("{SELECT} WHERE "));
        sql::push_predicate(&mut qb, EntityKind::Lesson, predicate);
        qb.push(" ORDER BY lessons.day, lessons.start_time");

        let rows = qb.build_query_as::<Lesson>().fetch_all(db).await?;
        Ok(rows)
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: i32) -> Result<Lesson, AppError> {
        sqlx::query_as::<_, Lesson>(&format!("{SELECT} WHERE lessons.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found("Lesson not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateLessonDto) -> Result<Lesson, AppError> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO lessons (name, day, start_time, end_time, subject_id, class_id, teacher_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
        )
        .bind(&dto.name)
        .bind(&dto.day)
        .bind(dto.start_time)
        .bind(dto.end_time)
        .bind(dto.subject_id)
        .bind(dto.class_id)
        .bind(&dto.teacher_id)
        .fetch_one(db)
        .await
        .map_err(|e| repo::constraint_error(e, "Lesson"))?;

        Self::get(db, id).await
    }

    #[instrument(skip(db, dto))]
    pub async fn update(db: &PgPool, id: i32, dto: UpdateLessonDto) -> Result<Lesson, AppError> {
        let updated = sqlx::query(
            "UPDATE lessons SET \
             name = COALESCE($2, name), \
             day = COALESCE($3, day), \
             start_time = COALESCE($4, start_time), \
             end_time = COALESCE($5, end_time), \
             subject_id = COALESCE($6, subject_id), \
             class_id = COALESCE($7, class_id), \
             teacher_id = COALESCE($8, teacher_id) \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&dto.name)
        .bind(&dto.day)
        .bind(dto.start_time)
        .bind(dto.end_time)
        .bind(dto.subject_id)
        .bind(dto.class_id)
        .bind(&dto.teacher_id)
        .execute(db)
        .await
        .map_err(|e| repo::constraint_error(e, "Lesson"))?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found("Lesson not found"));
        }
        Self::get(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: i32) -> Result<(), AppError> {
        let deleted = sqlx::query("DELETE FROM lessons WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| repo::constraint_error(e, "Lesson"))?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::not_found("Lesson not found"));
        }
        Ok(())
    }
}
