use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::route_access::enforce_route_access;
use crate::modules::announcements::router::init_announcements_router;
use crate::modules::assignments::router::init_assignments_router;
use crate::modules::attendance::router::init_attendance_router;
use crate::modules::classes::router::init_classes_router;
use crate::modules::dashboard::router::init_dashboard_router;
use crate::modules::events::router::init_events_router;
use crate::modules::exams::router::init_exams_router;
use crate::modules::lessons::router::init_lessons_router;
use crate::modules::parents::router::init_parents_router;
use crate::modules::results::router::init_results_router;
use crate::modules::students::router::init_students_router;
use crate::modules::subjects::router::init_subjects_router;
use crate::modules::teachers::router::init_teachers_router;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .nest(
            "/api",
            Router::new()
                .nest("/teachers", init_teachers_router())
                .nest("/students", init_students_router())
                .nest("/parents", init_parents_router())
                .nest("/subjects", init_subjects_router())
                .nest("/classes", init_classes_router())
                .nest("/lessons", init_lessons_router())
                .nest("/exams", init_exams_router())
                .nest("/assignments", init_assignments_router())
                .nest("/results", init_results_router())
                .nest("/attendance", init_attendance_router())
                .nest("/events", init_events_router())
                .nest("/announcements", init_announcements_router())
                .nest("/dashboard", init_dashboard_router())
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    enforce_route_access,
                )),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
