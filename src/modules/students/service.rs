use sqlx::{PgPool, QueryBuilder};
use tracing::instrument;

use crate::modules::students::model::{CreateStudentDto, Student, UpdateStudentDto};
use crate::policy::{EntityKind, Predicate};
use crate::repo::{self, sql};
use crate::utils::errors::AppError;

const SELECT: &str = "SELECT students.id, students.name, students.email, students.phone, \
     students.address, students.class_id, classes.name AS class_name, \
     students.parent_id, parents.name AS parent_name \
     FROM students \
     LEFT JOIN classes ON classes.id = students.class_id \
     LEFT JOIN parents ON parents.id = students.parent_id";

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db, predicate))]
    pub async fn list(
        db: &PgPool,
        predicate: &Predicate,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Student>, i64), AppError> {
        let mut qb = QueryBuilder::new(format!("{SELECT} WHERE "));
        sql::push_predicate(&mut qb, EntityKind::Student, predicate);
        qb.push(" ORDER BY students.name LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        let rows = qb.build_query_as::<Student>().fetch_all(db).await?;
        let total = repo::count(db, EntityKind::Student, predicate).await?;

        Ok((rows, total))
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: &str) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(&format!("{SELECT} WHERE students.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found("Student not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateStudentDto) -> Result<Student, AppError> {
        sqlx::query(
            "INSERT INTO students (id, name, email, phone, address, class_id, parent_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&dto.id)
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&dto.phone)
        .bind(&dto.address)
        .bind(dto.class_id)
        .bind(&dto.parent_id)
        .execute(db)
        .await
        .map_err(|e| repo::constraint_error(e, "Student"))?;

        Self::get(db, &dto.id).await
    }

    #[instrument(skip(db, dto))]
    pub async fn update(db: &PgPool, id: &str, dto: UpdateStudentDto) -> Result<Student, AppError> {
        let updated = sqlx::query(
            "UPDATE students SET \
             name = COALESCE($2, name), \
             email = COALESCE($3, email), \
             phone = COALESCE($4, phone), \
             address = COALESCE($5, address), \
             class_id = CASE WHEN $6 THEN $7 ELSE class_id END, \
             parent_id = CASE WHEN $8 THEN $9 ELSE parent_id END \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&dto.phone)
        .bind(&dto.address)
        .bind(dto.class_id.is_some())
        .bind(dto.class_id.flatten())
        .bind(dto.parent_id.is_some())
        .bind(dto.parent_id.clone().flatten())
        .execute(db)
        .await
        .map_err(|e| repo::constraint_error(e, "Student"))?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found("Student not found"));
        }
        Self::get(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: &str) -> Result<(), AppError> {
        let deleted = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| repo::constraint_error(e, "Student"))?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::not_found("Student not found"));
        }
        Ok(())
    }
}
