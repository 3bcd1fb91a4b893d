use axum::{
    Router,
    routing::{get, put},
};

use crate::modules::results::controller::{
    create_result, delete_result, list_results, update_result,
};
use crate::state::AppState;

pub fn init_results_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_results).post(create_result))
        .route("/{id}", put(update_result).delete(delete_result))
}
