use sqlx::{PgPool, QueryBuilder};
use tracing::instrument;

use crate::modules::classes::model::{Class, CreateClassDto, UpdateClassDto};
use crate::policy::{EntityKind, Predicate};
use crate::repo::{self, sql};
use crate::utils::errors::AppError;

const SELECT: &str = "SELECT classes.id, classes.name, classes.capacity, classes.grade, \
     classes.supervisor_id, teachers.name AS supervisor_name \
     FROM classes \
     LEFT JOIN teachers ON teachers.id = classes.supervisor_id";

pub struct ClassService;

impl ClassService {
    #[instrument(skip(db, predicate))]
    pub async fn list(
        db: &PgPool,
        predicate: &Predicate,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Class>, i64), AppError> {
        let mut qb = QueryBuilder::new(format!("{SELECT} WHERE "));
        sql::push_predicate(&mut qb, EntityKind::Class, predicate);
        qb.push(" ORDER BY classes.name LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        let rows = qb.build_query_as::<Class>().fetch_all(db).await?;
        let total = repo::count(db, EntityKind::Class, predicate).await?;

        Ok((rows, total))
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: i32) -> Result<Class, AppError> {
        sqlx::query_as::<_, Class>(&format!("{SELECT} WHERE classes.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found("Class not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateClassDto) -> Result<Class, AppError> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO classes (name, capacity, grade, supervisor_id) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&dto.name)
        .bind(dto.capacity)
        .bind(dto.grade)
        .bind(&dto.supervisor_id)
        .fetch_one(db)
        .await
        .map_err(|e| repo::constraint_error(e, "Class"))?;

        Self::get(db, id).await
    }

    #[instrument(skip(db, dto))]
    pub async fn update(db: &PgPool, id: i32, dto: UpdateClassDto) -> Result<Class, AppError> {
        let updated = sqlx::query(
            "UPDATE classes SET \
             name = COALESCE($2, name), \
             capacity = COALESCE($3, capacity), \
             grade = COALESCE($4, grade), \
             supervisor_id = CASE WHEN $5 THEN $6 ELSE supervisor_id END \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&dto.name)
        .bind(dto.capacity)
        .bind(dto.grade)
        .bind(dto.supervisor_id.is_some())
        .bind(dto.supervisor_id.clone().flatten())
        .execute(db)
        .await
        .map_err(|e| repo::constraint_error(e, "Class"))?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found("Class not found"));
        }
        Self::get(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: i32) -> Result<(), AppError> {
        let deleted = sqlx::query("DELETE FROM classes WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| repo::constraint_error(e, "Class"))?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::not_found("Class not found"));
        }
        Ok(())
    }
}
