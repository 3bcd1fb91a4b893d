use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;
use tracing::instrument;
use validator::Validate;

use crate::middleware::auth::AuthPrincipal;
use crate::modules::lessons::model::{
    CreateLessonDto, Lesson, LessonListParams, PaginatedLessonsResponse, UpdateLessonDto,
};
use crate::modules::lessons::service::LessonService;
use crate::policy::{self, AccessRequest, Action, EntityKind, KeyFilter, Predicate, TextFilter};
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[utoipa::path(
    get,
    path = "/api/lessons",
    params(PaginationParams, LessonListParams),
    responses(
        (status = 200, description = "Lessons visible to the caller", body = PaginatedLessonsResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Lessons"
)]
#[instrument(skip(state))]
pub async fn list_lessons(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Query(pagination): Query<PaginationParams>,
    Query(params): Query<LessonListParams>,
) -> Result<Json<PaginatedLessonsResponse>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Lesson, Action::List),
    )?;

    let mut predicate = policy::visibility(&principal, EntityKind::Lesson);
    if let Some(search) = params.search.filter(|s| !s.is_empty()) {
        // A hit on either the subject or the teacher name qualifies.
        predicate = predicate.and(Predicate::Or(vec![
            Predicate::Text(TextFilter::SubjectName(search.clone())),
            Predicate::Text(TextFilter::TeacherName(search)),
        ]));
    }
    if let Some(class_id) = params.class_id {
        predicate = predicate.and(Predicate::Key(KeyFilter::ClassId(class_id)));
    }
    if let Some(teacher_id) = params.teacher_id.filter(|s| !s.is_empty()) {
        predicate = predicate.and(Predicate::Key(KeyFilter::TeacherId(teacher_id)));
    }

    let per_page = state.pagination.per_page;
    let (data, total) =
        LessonService::list(&state.db, &predicate, per_page, pagination.offset(per_page)).await?;

    Ok(Json(PaginatedLessonsResponse {
        data,
        meta: PaginationMeta::new(pagination.page(), per_page, total),
    }))
}

#[utoipa::path(
    post,
    path = "/api/lessons",
    request_body = CreateLessonDto,
    responses(
        (status = 200, description = "Lesson created", body = Lesson),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Lessons"
)]
#[instrument(skip(state))]
pub async fn create_lesson(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Json(dto): Json<CreateLessonDto>,
) -> Result<Json<Lesson>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Lesson, Action::Create),
    )?;
    dto.validate()?;

    let lesson = LessonService::create(&state.db, dto).await?;
    Ok(Json(lesson))
}

#[utoipa::path(
    put,
    path = "/api/lessons/{id}",
    params(("id" = i32, Path, description = "Lesson ID")),
    request_body = UpdateLessonDto,
    responses(
        (status = 200, description = "Lesson updated", body = Lesson),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Lessons"
)]
#[instrument(skip(state))]
pub async fn update_lesson(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<i32>,
    Json(dto): Json<UpdateLessonDto>,
) -> Result<Json<Lesson>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Lesson, Action::Update),
    )?;
    dto.validate()?;

    let lesson = LessonService::update(&state.db, id, dto).await?;
    Ok(Json(lesson))
}

#[utoipa::path(
    delete,
    path = "/api/lessons/{id}",
    params(("id" = i32, Path, description = "Lesson ID")),
    responses(
        (status = 200, description = "Lesson deleted"),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Lessons"
)]
#[instrument(skip(state))]
pub async fn delete_lesson(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Lesson, Action::Delete),
    )?;

    LessonService::delete(&state.db, id).await?;
    Ok(Json(json!({"message": "Lesson deleted successfully"})))
}
