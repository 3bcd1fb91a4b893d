use sqlx::{PgPool, QueryBuilder};
use tracing::instrument;

use crate::modules::teachers::model::{
    CreateTeacherDto, Teacher, TeacherDetail, UpdateTeacherDto,
};
use crate::policy::{EntityKind, Predicate};
use crate::repo::{self, sql};
use crate::utils::errors::AppError;

pub struct TeacherService;

impl TeacherService {
    #[instrument(skip(db, predicate))]
    pub async fn list(
        db: &PgPool,
        predicate: &Predicate,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Teacher>, i64), AppError> {
        let mut qb = QueryBuilder::new(
            "SELECT teachers.id, teachers.name, teachers.email, teachers.phone, \
             teachers.address FROM teachers WHERE ",
        );
        sql::push_predicate(&mut qb, EntityKind::Teacher, predicate);
        qb.push(" ORDER BY teachers.name LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        let rows = qb.build_query_as::<Teacher>().fetch_all(db).await?;
        let total = repo::count(db, EntityKind::Teacher, predicate).await?;

        Ok((rows, total))
    }

    /// Card data: the teacher row plus the names of the subjects assigned to
    /// them and the distinct classes they lesson in.
    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: &str) -> Result<TeacherDetail, AppError> {
        sqlx::query_as::<_, TeacherDetail>(
            "SELECT teachers.id, teachers.name, teachers.email, teachers.phone, \
             teachers.address, \
             ARRAY(SELECT subjects.name FROM subjects \
                   JOIN subject_teachers ON subject_teachers.subject_id = subjects.id \
                   WHERE subject_teachers.teacher_id = teachers.id \
                   ORDER BY subjects.name) AS subjects, \
             ARRAY(SELECT DISTINCT classes.name FROM classes \
                   JOIN lessons ON lessons.class_id = classes.id \
                   WHERE lessons.teacher_id = teachers.id) AS classes \
             FROM teachers WHERE teachers.id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Teacher not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateTeacherDto) -> Result<TeacherDetail, AppError> {
        sqlx::query(
            "INSERT INTO teachers (id, name, email, phone, address) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&dto.id)
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&dto.phone)
        .bind(&dto.address)
        .execute(db)
        .await
        .map_err(|e| repo::constraint_error(e, "Teacher"))?;

        Self::get(db, &dto.id).await
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: &str,
        dto: UpdateTeacherDto,
    ) -> Result<TeacherDetail, AppError> {
        let updated = sqlx::query(
            "UPDATE teachers SET \
             name = COALESCE($2, name), \
             email = COALESCE($3, email), \
             phone = COALESCE($4, phone), \
             address = COALESCE($5, address) \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&dto.phone)
        .bind(&dto.address)
        .execute(db)
        .await
        .map_err(|e| repo::constraint_error(e, "Teacher"))?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found("Teacher not found"));
        }
        Self::get(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: &str) -> Result<(), AppError> {
        let deleted = sqlx::query("DELETE FROM teachers WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| repo::constraint_error(e, "Teacher"))?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::not_found("Teacher not found"));
        }
        Ok(())
    }
}
