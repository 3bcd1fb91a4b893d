use sqlx::{PgPool, QueryBuilder};
use tracing::instrument;

use crate::modules::parents::model::{CreateParentDto, Parent, UpdateParentDto};
use crate::policy::{EntityKind, Predicate};
use crate::repo::{self, sql};
use crate::utils::errors::AppError;

const SELECT: &str = "SELECT parents.id, parents.name, parents.email, parents.phone, \
     parents.address, \
     ARRAY(SELECT students.name FROM students \
           WHERE students.parent_id = parents.id ORDER BY students.name) AS students \
     FROM parents";

pub struct ParentService;

impl ParentService {
    #[instrument(skip(db, predicate))]
    pub async fn list(
        db: &PgPool,
        predicate: &Predicate,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Parent>, i64), AppError> {
        let mut qb = QueryBuilder::new(format!("{SELECT} WHERE "));
        sql::push_predicate(&mut qb, EntityKind::Parent, predicate);
        qb.push(" ORDER BY parents.name LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        let rows = qb.build_query_as::<Parent>().fetch_all(db).await?;
        let total = repo::count(db, EntityKind::Parent, predicate).await?;

        Ok((rows, total))
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: &str) -> Result<Parent, AppError> {
        sqlx::query_as::<_, Parent>(&format!("{SELECT} WHERE parents.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found("Parent not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateParentDto) -> Result<Parent, AppError> {
        sqlx::query(
            "INSERT INTO parents (id, name, email, phone, address) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&dto.id)
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&dto.phone)
        .bind(&dto.address)
        .execute(db)
        .await
        .map_err(|e| repo::constraint_error(e, "Parent"))?;

        Self::get(db, &dto.id).await
    }

    #[instrument(skip(db, dto))]
    pub async fn update(db: &PgPool, id: &str, dto: UpdateParentDto) -> Result<Parent, AppError> {
        let updated = sqlx::query(
            "UPDATE parents SET \
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
        .map_err(|e| repo::constraint_error(e, "Parent"))?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found("Parent not found"));
        }
        Self::get(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: &str) -> Result<(), AppError> {
        let deleted = sqlx::query("DELETE FROM parents WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| repo::constraint_error(e, "Parent"))?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::not_found("Parent not found"));
        }
        Ok(())
    }
}
