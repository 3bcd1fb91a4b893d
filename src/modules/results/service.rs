use sqlx::{PgPool, QueryBuilder};
use tracing::instrument;

use crate::modules::results::model::{AssessmentResult, CreateResultDto, UpdateResultDto};
use crate::policy::{EntityKind, Predicate};
use crate::repo::{self, sql};
use crate::utils::errors::AppError;

// Each result reaches its lesson (and so its subject, class and teacher)
// through whichever of the two assessment FKs is set.
const SELECT: &str = "SELECT results.id, results.score, results.student_id, \
     students.name AS student_name, results.exam_id, results.assignment_id, \
     COALESCE(exams.title, assignments.title) AS assessment_title, \
     classes.name AS class_name, teachers.name AS teacher_name \
     FROM results \
     JOIN students ON students.id = results.student_id \
     LEFT JOIN exams ON exams.id = results.exam_id \
     LEFT JOIN assignments ON assignments.id = results.assignment_id \
     JOIN lessons ON lessons.id = COALESCE(exams.lesson_id, assignments.lesson_id) \
     JOIN classes ON classes.id = lessons.class_id \
     JOIN teachers ON teachers.id = lessons.teacher_id";

pub struct ResultService;

impl ResultService {
    #[instrument(skip(db, predicate))]
    pub async fn list(
        db: &PgPool,
        predicate: &Predicate,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<AssessmentResult>, i64), AppError> {
        let mut qb = QueryBuilder::new(format!("{SELECT} WHERE "));
        sql::push_predicate(&mut qb, EntityKind::Result, predicate);
        qb.push(" ORDER BY results.id DESC LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        let rows = qb.build_query_as::<AssessmentResult>().fetch_all(db).await?;
        let total = repo::count(db, EntityKind::Result, predicate).await?;

        Ok((rows, total))
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: i32) -> Result<AssessmentResult, AppError> {
        sqlx::query_as::<_, AssessmentResult>(&format!("{SELECT} WHERE results.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found("Result not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateResultDto) -> Result<AssessmentResult, AppError> {
        dto.assessment().map_err(AppError::validation)?;

        let id: i32 = sqlx::query_scalar(
            "INSERT INTO results (score, student_id, exam_id, assignment_id) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(dto.score)
        .bind(&dto.student_id)
        .bind(dto.exam_id)
        .bind(dto.assignment_id)
        .fetch_one(db)
        .await
        .map_err(|e| repo::constraint_error(e, "Result"))?;

        Self::get(db, id).await
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: i32,
        dto: UpdateResultDto,
    ) -> Result<AssessmentResult, AppError> {
        let updated = sqlx::query("UPDATE results SET score = COALESCE($2, score) WHERE id = $1")
            .bind(id)
            .bind(dto.score)
            .execute(db)
            .await
            .map_err(|e| repo::constraint_error(e, "Result"))?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found("Result not found"));
        }
        Self::get(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: i32) -> Result<(), AppError> {
        let deleted = sqlx::query("DELETE FROM results WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| repo::constraint_error(e, "Result"))?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::not_found("Result not found"));
        }
        Ok(())
    }
}
