use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;
use tracing::instrument;
use validator::Validate;

use crate::middleware::auth::AuthPrincipal;
use crate::modules::assignments::model::{
    Assignment, AssignmentListParams, CreateAssignmentDto, PaginatedAssignmentsResponse,
    UpdateAssignmentDto,
};
use crate::modules::assignments::service::AssignmentService;
use crate::policy::{self, AccessRequest, Action, EntityKind, KeyFilter, Predicate, TextFilter};
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[utoipa::path(
    get,
    path = "/api/assignments",
    params(PaginationParams, AssignmentListParams),
    responses(
        (status = 200, description = "Assignments visible to the caller", body = PaginatedAssignmentsResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Assignments"
)]
#[instrument(skip(state))]
pub async fn list_assignments(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Query(pagination): Query<PaginationParams>,
    Query(params): Query<AssignmentListParams>,
) -> Result<Json<PaginatedAssignmentsResponse>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Assignment, Action::List),
    )?;

    let mut predicate = policy::visibility(&principal, EntityKind::Assignment);
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
    let (data, total) = AssignmentService::list(
        &state.db,
        &predicate,
        per_page,
        pagination.offset(per_page),
    )
    .await?;

    Ok(Json(PaginatedAssignmentsResponse {
        data,
        meta: PaginationMeta::new(pagination.page(), per_page, total),
    }))
}

#[utoipa::path(
    post,
    path = "/api/assignments",
    request_body = CreateAssignmentDto,
    responses(
        (status = 200, description = "Assignment created", body = Assignment),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Assignments"
)]
#[instrument(skip(state))]
pub async fn create_assignment(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Json(dto): Json<CreateAssignmentDto>,
) -> Result<Json<Assignment>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Assignment, Action::Create),
    )?;
    dto.validate()?;

    let assignment = AssignmentService::create(&state.db, dto).await?;
    Ok(Json(assignment))
}

#[utoipa::path(
    put,
    path = "/api/assignments/{id}",
    params(("id" = i32, Path, description = "Assignment ID")),
    request_body = UpdateAssignmentDto,
    responses(
        (status = 200, description = "Assignment updated", body = Assignment),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Assignment not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Assignments"
)]
#[instrument(skip(state))]
pub async fn update_assignment(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<i32>,
    Json(dto): Json<UpdateAssignmentDto>,
) -> Result<Json<Assignment>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Assignment, Action::Update),
    )?;
    dto.validate()?;

    let assignment = AssignmentService::update(&state.db, id, dto).await?;
    Ok(Json(assignment))
}

#[utoipa::path(
    delete,
    path = "/api/assignments/{id}",
    params(("id" = i32, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Assignment deleted"),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Assignment not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Assignments"
)]
#[instrument(skip(state))]
pub async fn delete_assignment(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Assignment, Action::Delete),
    )?;

    AssignmentService::delete(&state.db, id).await?;
    Ok(Json(json!({"message": "Assignment deleted successfully"})))
}
