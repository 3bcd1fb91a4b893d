use axum::{
    Router,
    routing::{get, put},
};

use crate::modules::lessons::controller::{
    create_lesson, delete_lesson, list_lessons, update_lesson,
};
use crate::state::AppState;

pub fn init_lessons_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_lessons).post(create_lesson))
        .route("/{id}", put(update_lesson).delete(delete_lesson))
}
