use axum::{
    Router,
    routing::{get, put},
};

use crate::modules::attendance::controller::{
    create_attendance, delete_attendance, list_attendance, update_attendance,
};
use crate::state::AppState;

pub fn init_attendance_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_attendance).post(create_attendance))
        .route("/{id}", put(update_attendance).delete(delete_attendance))
}
