use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;
use tracing::instrument;
use validator::Validate;

use crate::middleware::auth::AuthPrincipal;
use crate::modules::exams::model::{
    CreateExamDto, Exam, ExamListParams, PaginatedExamsResponse, UpdateExamDto,
};
use crate::modules::exams::service::ExamService;
use crate::policy::{self, AccessRequest, Action, EntityKind, KeyFilter, Predicate, TextFilter};
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[utoipa::path(
    get,
    path = "/api/exams",
    params(PaginationParams, ExamListParams),
    responses(
        (status = 200, description = "Exams visible to the caller", body = PaginatedExamsResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Exams"
)]
#[instrument(skip(state))]
pub async fn list_exams(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Query(pagination): Query<PaginationParams>,
    Query(params): Query<ExamListParams>,
) -> Result<Json<PaginatedExamsResponse>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Exam, Action::List),
    )?;

    let mut predicate = policy::visibility(&principal, EntityKind::Exam);
    if let Some(search) = params.search.filter(|s| !s.is_empty()) {
        predicate = predicate.and(Predicate::Text(TextFilter::Title(search)));
    }
    if let Some(class_id) = params.class_id {
        predicate = predicate.and(Predicate::Key(KeyFilter::ClassId(class_id)));
    }
    if let Some(teacher_id) = params.teacher_id.filter(|s| !s.is_empty()) {
        predicate = predicate.and(Predicate::Key(KeyFilter::TeacherId(teacher_id)));
    }

    let per_page = state.pagination.per_page;
    let (data, total) =
        ExamService::list(&state.db, &predicate, per_page, pagination.offset(per_page)).await?;

    Ok(Json(PaginatedExamsResponse {
        data,
        meta: PaginationMeta::new(pagination.page(), per_page, total),
    }))
}

#[utoipa::path(
    post,
    path = "/api/exams",
    request_body = CreateExamDto,
    responses(
        (status = 200, description = "Exam created", body = Exam),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Exams"
)]
#[instrument(skip(state))]
pub async fn create_exam(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Json(dto): Json<CreateExamDto>,
) -> Result<Json<Exam>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Exam, Action::Create),
    )?;
    dto.validate()?;

    let exam = ExamService::create(&state.db, dto).await?;
    Ok(Json(exam))
}

#[utoipa::path(
    put,
    path = "/api/exams/{id}",
    params(("id" = i32, Path, description = "Exam ID")),
    request_body = UpdateExamDto,
    responses(
        (status = 200, description = "Exam updated", body = Exam),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Exam not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Exams"
)]
#[instrument(skip(state))]
pub async fn update_exam(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<i32>,
    Json(dto): Json<UpdateExamDto>,
) -> Result<Json<Exam>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Exam, Action::Update),
    )?;
    dto.validate()?;

    let exam = ExamService::update(&state.db, id, dto).await?;
    Ok(Json(exam))
}

#[utoipa::path(
    delete,
    path = "/api/exams/{id}",
    params(("id" = i32, Path, description = "Exam ID")),
    responses(
        (status = 200, description = "Exam deleted"),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Exam not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Exams"
)]
#[instrument(skip(state))]
pub async fn delete_exam(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Exam, Action::Delete),
    )?;

    ExamService::delete(&state.db, id).await?;
    Ok(Json(json!({"message": "Exam deleted successfully"})))
}
