use axum::{
    Router,
    routing::{get, put},
};

use crate::modules::events::controller::{create_event, delete_event, list_events, update_event};
use crate::state::AppState;

pub fn init_events_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/{id}", put(update_event).delete(delete_event))
}
