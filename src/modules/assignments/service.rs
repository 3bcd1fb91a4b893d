use sqlx::{PgPool, QueryBuilder};
use tracing::instrument;

use crate::modules::assignments::model::{Assignment, CreateAssignmentDto, UpdateAssignmentDto};
use crate::policy::{EntityKind, Predicate};
use crate::repo::{self, sql};
use crate::utils::errors::AppError;

const SELECT: &str = "SELECT assignments.id, assignments.title, assignments.start_date, \
     assignments.due_date, assignments.lesson_id, subjects.name AS subject_name, \
     classes.name AS class_name, teachers.name AS teacher_name \
     FROM assignments \
     JOIN lessons ON lessons.id = assignments.lesson_id \
     JOIN subjects ON subjects.id = lessons.subject_id \
     JOIN classes ON classes.id = lessons.class_id \
     JOIN teachers ON teachers.id = lessons.teacher_id";

pub struct AssignmentService;

impl AssignmentService {
    #[instrument(skip(db, predicate))]
    pub async fn list(
        db: &PgPool,
        predicate: &Predicate,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Assignment>, i64), AppError> {
        let mut qb = QueryBuilder::new(format!("{SELECT} WHERE "));
        sql::push_predicate(&mut qb, EntityKind::Assignment, predicate);
        qb.push(" ORDER BY assignments.due_date DESC LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        let rows = qb.build_query_as::<Assignment>().fetch_all(db).await?;
        let total = repo::count(db, EntityKind::Assignment, predicate).await?;

        Ok((rows, total))
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: i32) -> Result<Assignment, AppError> {
        sqlx::query_as::<_, Assignment>(&format!("{SELECT} WHERE assignments.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found("Assignment not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateAssignmentDto) -> Result<Assignment, AppError> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO assignments (title, start_date, due_date, lesson_id) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&dto.title)
        .bind(dto.start_date)
        .bind(dto.due_date)
        .bind(dto.lesson_id)
        .fetch_one(db)
        .await
        .map_err(|e| repo::constraint_error(e, "Assignment"))?;

        Self::get(db, id).await
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: i32,
        dto: UpdateAssignmentDto,
    ) -> Result<Assignment, AppError> {
        let updated = sqlx::query(
            "UPDATE assignments SET \
             title = COALESCE($2, title), \
             start_date = COALESCE($3, start_date), \
             due_date = COALESCE($4, due_date), \
             lesson_id = COALESCE($5, lesson_id) \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&dto.title)
        .bind(dto.start_date)
        .bind(dto.due_date)
        .bind(dto.lesson_id)
        .execute(db)
        .await
        .map_err(|e| repo::constraint_error(e, "Assignment"))?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found("Assignment not found"));
        }
        Self::get(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: i32) -> Result<(), AppError> {
        let deleted = sqlx::query("DELETE FROM assignments WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| repo::constraint_error(e, "Assignment"))?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::not_found("Assignment not found"));
        }
        Ok(())
    }
}
