use axum::{Json, extract::State};
use tracing::instrument;

use crate::middleware::auth::AuthPrincipal;
use crate::modules::dashboard::model::{
    EntityCounts, LatestAnnouncementsResponse, ScheduleResponse,
};
use crate::modules::dashboard::service::DashboardService;
use crate::modules::lessons::service::LessonService;
use crate::policy::{self, AccessRequest, Action, EntityKind};
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};

#[utoipa::path(
    get,
    path = "/api/dashboard/counts",
    responses(
        (status = 200, description = "Entity counts for the admin overview", body = EntityCounts),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
#[instrument(skip(state))]
pub async fn dashboard_counts(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<Json<EntityCounts>, AppError> {
    if !principal.is_admin() {
        return Err(AppError::forbidden("Admin role required"));
    }

    let counts = DashboardService::counts(&state.db).await?;
    Ok(Json(counts))
}

/// Weekly schedule for the caller: a student's own class, a parent's
/// children's classes. The visibility predicate already encodes both.
#[utoipa::path(
    get,
    path = "/api/dashboard/schedule",
    responses(
        (status = 200, description = "Lessons in the caller's classes", body = ScheduleResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
#[instrument(skip(state))]
pub async fn dashboard_schedule(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<Json<ScheduleResponse>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Lesson, Action::List),
    )?;

    let predicate = policy::visibility(&principal, EntityKind::Lesson);
    let lessons = LessonService::schedule(&state.db, &predicate).await?;
    Ok(Json(ScheduleResponse { lessons }))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/announcements",
    responses(
        (status = 200, description = "Newest announcements visible to the caller", body = LatestAnnouncementsResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
#[instrument(skip(state))]
pub async fn dashboard_announcements(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<Json<LatestAnnouncementsResponse>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Announcement, Action::List),
    )?;

    let predicate = policy::visibility(&principal, EntityKind::Announcement);
    let announcements = DashboardService::latest_announcements(&state.db, &predicate).await?;
    Ok(Json(LatestAnnouncementsResponse { announcements }))
}
