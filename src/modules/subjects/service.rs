use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use tracing::instrument;

use crate::modules::subjects::model::{CreateSubjectDto, Subject, UpdateSubjectDto};
use crate::policy::{EntityKind, Predicate};
use crate::repo::{self, sql};
use crate::utils::errors::AppError;

const SELECT: &str = "SELECT subjects.id, subjects.name, \
     ARRAY(SELECT teachers.name FROM teachers \
           JOIN subject_teachers ON subject_teachers.teacher_id = teachers.id \
           WHERE subject_teachers.subject_id = subjects.id \
           ORDER BY teachers.name) AS teachers \
     FROM subjects";

pub struct SubjectService;

impl SubjectService {
    #[instrument(skip(db, predicate))]
    pub async fn list(
        db: &PgPool,
        predicate: &Predicate,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Subject>, i64), AppError> {
        let mut qb = QueryBuilder::new(format!("{SELECT} WHERE "));
        sql::push_predicate(&mut qb, EntityKind::Subject, predicate);
        qb.push(" ORDER BY subjects.name LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        let rows = qb.build_query_as::<Subject>().fetch_all(db).await?;
        let total = repo::count(db, EntityKind::Subject, predicate).await?;

        Ok((rows, total))
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: i32) -> Result<Subject, AppError> {
        sqlx::query_as::<_, Subject>(&format!("{SELECT} WHERE subjects.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found("Subject not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateSubjectDto) -> Result<Subject, AppError> {
        let mut tx = db.begin().await?;

        let id: i32 = sqlx::query_scalar("INSERT INTO subjects (name) VALUES ($1) RETURNING id")
            .bind(&dto.name)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| repo::constraint_error(e, "Subject"))?;

        if let Some(teacher_ids) = &dto.teacher_ids {
            Self::assign_teachers(&mut tx, id, teacher_ids).await?;
        }

        tx.commit().await?;
        Self::get(db, id).await
    }

    #[instrument(skip(db, dto))]
    pub async fn update(db: &PgPool, id: i32, dto: UpdateSubjectDto) -> Result<Subject, AppError> {
        let mut tx = db.begin().await?;

        let updated = sqlx::query("UPDATE subjects SET name = COALESCE($2, name) WHERE id = $1")
            .bind(id)
            .bind(&dto.name)
            .execute(&mut *tx)
            .await
            .map_err(|e| repo::constraint_error(e, "Subject"))?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found("Subject not found"));
        }

        if let Some(teacher_ids) = &dto.teacher_ids {
            sqlx::query("DELETE FROM subject_teachers WHERE subject_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            Self::assign_teachers(&mut tx, id, teacher_ids).await?;
        }

        tx.commit().await?;
        Self::get(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: i32) -> Result<(), AppError> {
        let deleted = sqlx::query("DELETE FROM subjects WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| repo::constraint_error(e, "Subject"))?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::not_found("Subject not found"));
        }
        Ok(())
    }

    async fn assign_teachers(
        tx: &mut Transaction<'_, Postgres>,
        subject_id: i32,
        teacher_ids: &[String],
    ) -> Result<(), AppError> {
        for teacher_id in teacher_ids {
            sqlx::query("INSERT INTO subject_teachers (subject_id, teacher_id) VALUES ($1, $2)")
                .bind(subject_id)
                .bind(teacher_id)
                .execute(&mut **tx)
                .await
                .map_err(|e| repo::constraint_error(e, "Subject teacher assignment"))?;
        }
        Ok(())
    }
}
