use axum::{Router, routing::get};

use crate::modules::dashboard::controller::{
    dashboard_announcements, dashboard_counts, dashboard_schedule,
};
use crate::state::AppState;

pub fn init_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/counts", get(dashboard_counts))
        .route("/schedule", get(dashboard_schedule))
        .route("/announcements", get(dashboard_announcements))
}
