use sqlx::{PgPool, QueryBuilder};
use tracing::instrument;

use crate::modules::attendance::model::{
    AttendanceRecord, CreateAttendanceDto, UpdateAttendanceDto,
};
use crate::policy::{EntityKind, Predicate};
use crate::repo::{self, sql};
use crate::utils::errors::AppError;

const SELECT: &str = "SELECT attendance.id, attendance.date, attendance.present, \
     attendance.student_id, students.name AS student_name, \
     attendance.lesson_id, lessons.name AS lesson_name \
     FROM attendance \
     JOIN students ON students.id = attendance.student_id \
     JOIN lessons ON lessons.id = attendance.lesson_id";

pub struct AttendanceService;

impl AttendanceService {
    #[instrument(skip(db, predicate))]
    pub async fn list(
        db: &PgPool,
        predicate: &Predicate,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<AttendanceRecord>, i64), AppError> {
        let mut qb = QueryBuilder::new(format!("{SELECT} WHERE "));
        sql::push_predicate(&mut qb, EntityKind::Attendance, predicate);
        qb.push(" ORDER BY attendance.date DESC LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        let rows = qb.build_query_as::<AttendanceRecord>().fetch_all(db).await?;
        let total = repo::count(db, EntityKind::Attendance, predicate).await?;

        Ok((rows, total))
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: i32) -> Result<AttendanceRecord, AppError> {
        sqlx::query_as::<_, AttendanceRecord>(&format!("{SELECT} WHERE attendance.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found("Attendance record not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(
        db: &PgPool,
        dto: CreateAttendanceDto,
    ) -> Result<AttendanceRecord, AppError> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO attendance (date, present, student_id, lesson_id) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(dto.date)
        .bind(dto.present)
        .bind(&dto.student_id)
        .bind(dto.lesson_id)
        .fetch_one(db)
        .await
        .map_err(|e| repo::constraint_error(e, "Attendance record"))?;

        Self::get(db, id).await
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: i32,
        dto: UpdateAttendanceDto,
    ) -> Result<AttendanceRecord, AppError> {
        let updated = sqlx::query(
            "UPDATE attendance SET \
             date = COALESCE($2, date), \
             present = COALESCE($3, present) \
             WHERE id = $1",
        )
        .bind(id)
        .bind(dto.date)
        .bind(dto.present)
        .execute(db)
        .await
        .map_err(|e| repo::constraint_error(e, "Attendance record"))?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found("Attendance record not found"));
        }
        Self::get(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: i32) -> Result<(), AppError> {
        let deleted = sqlx::query("DELETE FROM attendance WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| repo::constraint_error(e, "Attendance record"))?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::not_found("Attendance record not found"));
        }
        Ok(())
    }
}
