use axum::{
    Router,
    routing::{get, put},
};

use crate::modules::parents::controller::{
    create_parent, delete_parent, list_parents, update_parent,
};
use crate::state::AppState;

pub fn init_parents_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_parents).post(create_parent))
        .route("/{id}", put(update_parent).delete(delete_parent))
}
