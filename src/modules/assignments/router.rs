use axum::{
    Router,
    routing::{get, put},
};

use crate::modules::assignments::controller::{
    create_assignment, delete_assignment, list_assignments, update_assignment,
};
use crate::state::AppState;

pub fn init_assignments_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_assignments).post(create_assignment))
        .route("/{id}", put(update_assignment).delete(delete_assignment))
}
