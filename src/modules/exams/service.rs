use sqlx::{PgPool, QueryBuilder};
use tracing::instrument;

use crate::modules::exams::model::{CreateExamDto, Exam, UpdateExamDto};
use crate::policy::{EntityKind, Predicate};
use crate::repo::{self, sql};
use crate::utils::errors::AppError;

const SELECT: &str = "SELECT exams.id, exams.title, exams.start_time, exams.end_time, \
     exams.lesson_id, subjects.name AS subject_name, classes.name AS class_name, \
     teachers.name AS teacher_name \
     FROM exams \
     JOIN lessons ON lessons.id = exams.lesson_id \
     JOIN subjects ON subjects.id = lessons.subject_id \
     JOIN classes ON classes.id = lessons.class_id \
     JOIN teachers ON teachers.id = lessons.teacher_id";

pub struct ExamService;

impl ExamService {
    #[instrument(skip(db, predicate))]
    pub async fn list(
        db: &PgPool,
        predicate: &Predicate,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Exam>, i64), AppError> {
        let mut qb = QueryBuilder::new(format!("{SELECT} WHERE "));
        sql::push_predicate(&mut qb, EntityKind::Exam, predicate);
        qb.push(" ORDER BY exams.start_time DESC LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        let rows = qb.build_query_as::<Exam>().fetch_all(db).await?;
        let total = repo::count(db, EntityKind::Exam, predicate).await?;

        Ok((rows, total))
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: i32) -> Result<Exam, AppError> {
        sqlx::query_as::<_, Exam>(&format!("{SELECT} WHERE exams.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found("Exam not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateExamDto) -> Result<Exam, AppError> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO exams (title, start_time, end_time, lesson_id) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&dto.title)
        .bind(dto.start_time)
        .bind(dto.end_time)
        .bind(dto.lesson_id)
        .fetch_one(db)
        .await
        .map_err(|e| repo::constraint_error(e, "Exam"))?;

        Self::get(db, id).await
    }

    #[instrument(skip(db, dto))]
    pub async fn update(db: &PgPool, id: i32, dto: UpdateExamDto) -> Result<Exam, AppError> {
        let updated = sqlx::query(
            "UPDATE exams SET \
             title = COALESCE($2, title), \
             start_time = COALESCE($3, start_time), \
             end_time = COALESCE($4, end_time), \
             lesson_id = COALESCE($5, lesson_id) \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&dto.title)
        .bind(dto.start_time)
        .bind(dto.end_time)
        .bind(dto.lesson_id)
        .execute(db)
        .await
        .map_err(|e| repo::constraint_error(e, "Exam"))?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found("Exam not found"));
        }
        Self::get(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: i32) -> Result<(), AppError> {
        let deleted = sqlx::query("DELETE FROM exams WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| repo::constraint_error(e, "Exam"))?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::not_found("Exam not found"));
        }
        Ok(())
    }
}
