use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;
use tracing::instrument;
use validator::Validate;

use crate::middleware::auth::AuthPrincipal;
use crate::modules::attendance::model::{
    AttendanceListParams, AttendanceRecord, CreateAttendanceDto, PaginatedAttendanceResponse,
    UpdateAttendanceDto,
};
use crate::modules::attendance::service::AttendanceService;
use crate::policy::{self, AccessRequest, Action, EntityKind, KeyFilter, Predicate};
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[utoipa::path(
    get,
    path = "/api/attendance",
    params(PaginationParams, AttendanceListParams),
    responses(
        (status = 200, description = "Attendance records visible to the caller", body = PaginatedAttendanceResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn list_attendance(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Query(pagination): Query<PaginationParams>,
    Query(params): Query<AttendanceListParams>,
) -> Result<Json<PaginatedAttendanceResponse>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Attendance, Action::List),
    )?;

    let mut predicate = policy::visibility(&principal, EntityKind::Attendance);
    if let Some(student_id) = params.student_id.filter(|s| !s.is_empty()) {
        predicate = predicate.and(Predicate::Key(KeyFilter::StudentId(student_id)));
    }
    if let Some(lesson_id) = params.lesson_id {
        predicate = predicate.and(Predicate::Key(KeyFilter::LessonId(lesson_id)));
    }
    if let Some(class_id) = params.class_id {
        predicate = predicate.and(Predicate::Key(KeyFilter::ClassId(class_id)));
    }

    let per_page = state.pagination.per_page;
    let (data, total) = AttendanceService::list(
        &state.db,
        &predicate,
        per_page,
        pagination.offset(per_page),
    )
    .await?;

    Ok(Json(PaginatedAttendanceResponse {
        data,
        meta: PaginationMeta::new(pagination.page(), per_page, total),
    }))
}

#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = CreateAttendanceDto,
    responses(
        (status = 200, description = "Attendance record created", body = AttendanceRecord),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn create_attendance(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Json(dto): Json<CreateAttendanceDto>,
) -> Result<Json<AttendanceRecord>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Attendance, Action::Create),
    )?;
    dto.validate()?;

    let record = AttendanceService::create(&state.db, dto).await?;
    Ok(Json(record))
}

#[utoipa::path(
    put,
    path = "/api/attendance/{id}",
    params(("id" = i32, Path, description = "Attendance record ID")),
    request_body = UpdateAttendanceDto,
    responses(
        (status = 200, description = "Attendance record updated", body = AttendanceRecord),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Attendance record not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn update_attendance(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<i32>,
    Json(dto): Json<UpdateAttendanceDto>,
) -> Result<Json<AttendanceRecord>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Attendance, Action::Update),
    )?;
    dto.validate()?;

    let record = AttendanceService::update(&state.db, id, dto).await?;
    Ok(Json(record))
}

#[utoipa::path(
    delete,
    path = "/api/attendance/{id}",
    params(("id" = i32, Path, description = "Attendance record ID")),
    responses(
        (status = 200, description = "Attendance record deleted"),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Attendance record not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn delete_attendance(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Attendance, Action::Delete),
    )?;

    AttendanceService::delete(&state.db, id).await?;
    Ok(Json(json!({"message": "Attendance record deleted successfully"})))
}
