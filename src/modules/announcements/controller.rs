use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;
use tracing::instrument;
use validator::Validate;

use crate::middleware::auth::AuthPrincipal;
use crate::modules::announcements::model::{
    Announcement, AnnouncementListParams, CreateAnnouncementDto, PaginatedAnnouncementsResponse,
    UpdateAnnouncementDto,
};
use crate::modules::announcements::service::AnnouncementService;
use crate::policy::{self, AccessRequest, Action, EntityKind, Predicate, TextFilter};
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[utoipa::path(
    get,
    path = "/api/announcements",
    params(PaginationParams, AnnouncementListParams),
    responses(
        (status = 200, description = "Announcements visible to the caller", body = PaginatedAnnouncementsResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Announcements"
)]
#[instrument(skip(state))]
pub async fn list_announcements(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Query(pagination): Query<PaginationParams>,
    Query(params): Query<AnnouncementListParams>,
) -> Result<Json<PaginatedAnnouncementsResponse>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Announcement, Action::List),
    )?;

    let mut predicate = policy::visibility(&principal, EntityKind::Announcement);
    if let Some(search) = params.search.filter(|s| !s.is_empty()) {
        predicate = predicate.and(Predicate::Text(TextFilter::Title(search)));
    }

    let per_page = state.pagination.per_page;
    let (data, total) = AnnouncementService::list(
        &state.db,
        &predicate,
        per_page,
        pagination.offset(per_page),
    )
    .await?;

    Ok(Json(PaginatedAnnouncementsResponse {
        data,
        meta: PaginationMeta::new(pagination.page(), per_page, total),
    }))
}

#[utoipa::path(
    post,
    path = "/api/announcements",
    request_body = CreateAnnouncementDto,
    responses(
        (status = 200, description = "Announcement created", body = Announcement),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Announcements"
)]
#[instrument(skip(state))]
pub async fn create_announcement(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Json(dto): Json<CreateAnnouncementDto>,
) -> Result<Json<Announcement>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Announcement, Action::Create),
    )?;
    dto.validate()?;

    let announcement = AnnouncementService::create(&state.db, dto).await?;
    Ok(Json(announcement))
}

#[utoipa::path(
    put,
    path = "/api/announcements/{id}",
    params(("id" = i32, Path, description = "Announcement ID")),
    request_body = UpdateAnnouncementDto,
    responses(
        (status = 200, description = "Announcement updated", body = Announcement),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Announcement not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Announcements"
)]
#[instrument(skip(state))]
pub async fn update_announcement(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<i32>,
    Json(dto): Json<UpdateAnnouncementDto>,
) -> Result<Json<Announcement>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Announcement, Action::Update),
    )?;
    dto.validate()?;

    let announcement = AnnouncementService::update(&state.db, id, dto).await?;
    Ok(Json(announcement))
}

#[utoipa::path(
    delete,
    path = "/api/announcements/{id}",
    params(("id" = i32, Path, description = "Announcement ID")),
    responses(
        (status = 200, description = "Announcement deleted"),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Announcement not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Announcements"
)]
#[instrument(skip(state))]
pub async fn delete_announcement(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Announcement, Action::Delete),
    )?;

    AnnouncementService::delete(&state.db, id).await?;
    Ok(Json(json!({"message": "Announcement deleted successfully"})))
}
