use axum::{
    Router,
    routing::{get, put},
};

use crate::modules::announcements::controller::{
    create_announcement, delete_announcement, list_announcements, update_announcement,
};
use crate::state::AppState;

pub fn init_announcements_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_announcements).post(create_announcement))
        .route(
            "/{id}",
            put(update_announcement).delete(delete_announcement),
        )
}
