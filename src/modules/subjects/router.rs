use axum::{
    Router,
    routing::{get, put},
};

use crate::modules::subjects::controller::{
    create_subject, delete_subject, list_subjects, update_subject,
};
use crate::state::AppState;

pub fn init_subjects_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_subjects).post(create_subject))
        .route("/{id}", put(update_subject).delete(delete_subject))
}
