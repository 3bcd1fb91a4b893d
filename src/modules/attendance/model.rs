use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::utils::pagination::PaginationMeta;

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct AttendanceRecord {
    pub id: i32,
    pub date: DateTime<Utc>,
    pub present: bool,
    pub student_id: String,
    pub student_name: String,
    pub lesson_id: i32,
    pub lesson_name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAttendanceDto {
    pub date: DateTime<Utc>,
    pub present: bool,
    #[validate(length(min = 1))]
    pub student_id: String,
    pub lesson_id: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAttendanceDto {
    pub date: Option<DateTime<Utc>>,
    pub present: Option<bool>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttendanceListParams {
    pub student_id: Option<String>,
    pub lesson_id: Option<i32>,
    pub class_id: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedAttendanceResponse {
    pub data: Vec<AttendanceRecord>,
    pub meta: PaginationMeta,
}
