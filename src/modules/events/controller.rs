use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;
use tracing::instrument;
use validator::Validate;

use crate::middleware::auth::AuthPrincipal;
use crate::modules::events::model::{
    CreateEventDto, Event, EventListParams, PaginatedEventsResponse, UpdateEventDto,
};
use crate::modules::events::service::EventService;
use crate::policy::{self, AccessRequest, Action, EntityKind, Predicate, TextFilter};
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[utoipa::path(
    get,
    path = "/api/events",
    params(PaginationParams, EventListParams),
    responses(
        (status = 200, description = "Events visible to the caller", body = PaginatedEventsResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
#[instrument(skip(state))]
pub async fn list_events(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Query(pagination): Query<PaginationParams>,
    Query(params): Query<EventListParams>,
) -> Result<Json<PaginatedEventsResponse>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Event, Action::List),
    )?;

    let mut predicate = policy::visibility(&principal, EntityKind::Event);
    if let Some(search) = params.search.filter(|s| !s.is_empty()) {
        predicate = predicate.and(Predicate::Text(TextFilter::Title(search)));
    }

    let per_page = state.pagination.per_page;
    let (data, total) =
        EventService::list(&state.db, &predicate, per_page, pagination.offset(per_page)).await?;

    Ok(Json(PaginatedEventsResponse {
        data,
        meta: PaginationMeta::new(pagination.page(), per_page, total),
    }))
}

#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventDto,
    responses(
        (status = 200, description = "Event created", body = Event),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
#[instrument(skip(state))]
pub async fn create_event(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Json(dto): Json<CreateEventDto>,
) -> Result<Json<Event>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Event, Action::Create),
    )?;
    dto.validate()?;

    let event = EventService::create(&state.db, dto).await?;
    Ok(Json(event))
}

#[utoipa::path(
    put,
    path = "/api/events/{id}",
    params(("id" = i32, Path, description = "Event ID")),
    request_body = UpdateEventDto,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
#[instrument(skip(state))]
pub async fn update_event(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<i32>,
    Json(dto): Json<UpdateEventDto>,
) -> Result<Json<Event>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Event, Action::Update),
    )?;
    dto.validate()?;

    let event = EventService::update(&state.db, id, dto).await?;
    Ok(Json(event))
}

#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    params(("id" = i32, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event deleted"),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
#[instrument(skip(state))]
pub async fn delete_event(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    policy::ensure_allowed(
        &principal,
        &AccessRequest::new(EntityKind::Event, Action::Delete),
    )?;

    EventService::delete(&state.db, id).await?;
    Ok(Json(json!({"message": "Event deleted successfully"})))
}
