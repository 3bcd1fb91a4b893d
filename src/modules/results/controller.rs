use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;
use tracing::instrument;
use validator::Validate;

use crate::middleware::auth::AuthPrincipal;
use crate::modules::results::model::{
    AssessmentResult, CreateResultDto, PaginatedResultsResponse, ResultListParams, UpdateResultDto,
};
use crate::modules::results::service::ResultService;
use crate::policy::{self, AccessRequest, Action, EntityKind, KeyFilter, Predicate, TextFilter};
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[utoipa::path(
    get,
    path = "/api/results",
    params(PaginationParams, ResultListParams),
    responses(
        (status = 200, description = "Results visible to the caller", body = PaginatedResultsResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Results"
)]
#[instrument(skip(state))]
pub async fn list_results(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Query(pagination): Query<PaginationParams>,
    Query(params): Query<ResultListParams>,
) -> Result<Json<PaginatedResultsResponse>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Result, Action::List),
    )?;

    let mut predicate = policy::visibility(&principal, EntityKind::Result);
    if let Some(search) = params.search.filter(|s| !s.is_empty()) {
        // A hit on either the student name or the assessment title qualifies.
        predicate = predicate.and(Predicate::Or(vec![
            Predicate::Text(TextFilter::StudentName(search.clone())),
            Predicate::Text(TextFilter::AssessmentTitle(search)),
        ]));
    }
    if let Some(student_id) = params.student_id.filter(|s| !s.is_empty()) {
        predicate = predicate.and(Predicate::Key(KeyFilter::StudentId(student_id)));
    }

    let per_page = state.pagination.per_page;
    let (data, total) =
        ResultService::list(&state.db, &predicate, per_page, pagination.offset(per_page)).await?;

    Ok(Json(PaginatedResultsResponse {
        data,
        meta: PaginationMeta::new(pagination.page(), per_page, total),
    }))
}

#[utoipa::path(
    post,
    path = "/api/results",
    request_body = CreateResultDto,
    responses(
        (status = 200, description = "Result created", body = AssessmentResult),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Results"
)]
#[instrument(skip(state))]
pub async fn create_result(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Json(dto): Json<CreateResultDto>,
) -> Result<Json<AssessmentResult>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Result, Action::Create),
    )?;
    dto.validate()?;

    let result = ResultService::create(&state.db, dto).await?;
    Ok(Json(result))
}

#[utoipa::path(
    put,
    path = "/api/results/{id}",
    params(("id" = i32, Path, description = "Result ID")),
    request_body = UpdateResultDto,
    responses(
        (status = 200, description = "Result updated", body = AssessmentResult),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Result not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Results"
)]
#[instrument(skip(state))]
pub async fn update_result(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<i32>,
    Json(dto): Json<UpdateResultDto>,
) -> Result<Json<AssessmentResult>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Result, Action::Update),
    )?;
    dto.validate()?;

    let result = ResultService::update(&state.db, id, dto).await?;
    Ok(Json(result))
}

#[utoipa::path(
    delete,
    path = "/api/results/{id}",
    params(("id" = i32, Path, description = "Result ID")),
    responses(
        (status = 200, description = "Result deleted"),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Result not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Results"
)]
#[instrument(skip(state))]
pub async fn delete_result(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Result, Action::Delete),
    )?;

    ResultService::delete(&state.db, id).await?;
    Ok(Json(json!({"message": "Result deleted successfully"})))
}
