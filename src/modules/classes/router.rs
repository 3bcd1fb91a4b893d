use axum::{
    Router,
    routing::{get, put},
};

use crate::modules::classes::controller::{
    create_class, delete_class, list_classes, update_class,
};
use crate::state::AppState;

pub fn init_classes_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_classes).post(create_class))
        .route("/{id}", put(update_class).delete(delete_class))
}
