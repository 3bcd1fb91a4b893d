use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;
use tracing::instrument;
use validator::Validate;

use crate::middleware::auth::AuthPrincipal;
use crate::modules::classes::model::{
    Class, ClassListParams, CreateClassDto, PaginatedClassesResponse, UpdateClassDto,
};
use crate::modules::classes::service::ClassService;
use crate::policy::{self, AccessRequest, Action, EntityKind, KeyFilter, Predicate, TextFilter};
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[utoipa::path(
    get,
    path = "/api/classes",
    params(PaginationParams, ClassListParams),
    responses(
        (status = 200, description = "Classes visible to the caller", body = PaginatedClassesResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn list_classes(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Query(pagination): Query<PaginationParams>,
    Query(params): Query<ClassListParams>,
) -> Result<Json<PaginatedClassesResponse>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Class, Action::List),
    )?;

    let mut predicate = policy::visibility(&principal, EntityKind::Class);
    if let Some(search) = params.search.filter(|s| !s.is_empty()) {
        predicate = predicate.and(Predicate::Text(TextFilter::Name(search)));
    }
    if let Some(supervisor_id) = params.supervisor_id.filter(|s| !s.is_empty()) {
        predicate = predicate.and(Predicate::Key(KeyFilter::SupervisorId(supervisor_id)));
    }

    let per_page = state.pagination.per_page;
    let (data, total) =
        ClassService::list(&state.db, &predicate, per_page, pagination.offset(per_page)).await?;

    Ok(Json(PaginatedClassesResponse {
        data,
        meta: PaginationMeta::new(pagination.page(), per_page, total),
    }))
}

#[utoipa::path(
    post,
    path = "/api/classes",
    request_body = CreateClassDto,
    responses(
        (status = 200, description = "Class created", body = Class),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn create_class(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Json(dto): Json<CreateClassDto>,
) -> Result<Json<Class>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Class, Action::Create),
    )?;
    dto.validate()?;

    let class = ClassService::create(&state.db, dto).await?;
    Ok(Json(class))
}

#[utoipa::path(
    put,
    path = "/api/classes/{id}",
    params(("id" = i32, Path, description = "Class ID")),
    request_body = UpdateClassDto,
    responses(
        (status = 200, description = "Class updated", body = Class),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn update_class(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<i32>,
    Json(dto): Json<UpdateClassDto>,
) -> Result<Json<Class>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Class, Action::Update),
    )?;
    dto.validate()?;

    let class = ClassService::update(&state.db, id, dto).await?;
    Ok(Json(class))
}

#[utoipa::path(
    delete,
    path = "/api/classes/{id}",
    params(("id" = i32, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Class deleted"),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn delete_class(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Class, Action::Delete),
    )?;

    ClassService::delete(&state.db, id).await?;
    Ok(Json(json!({"message": "Class deleted successfully"})))
}
