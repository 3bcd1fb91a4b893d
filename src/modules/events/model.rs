use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::utils::pagination::PaginationMeta;

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct Event {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub class_id: Option<i32>,
    pub class_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEventDto {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Absent for school-wide events.
    pub class_id: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEventDto {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    /// Omit to keep the current class; send `null` to make the event
    /// school-wide.
    #[serde(default, deserialize_with = "crate::utils::patch::present")]
    #[schema(value_type = Option<i32>)]
    pub class_id: Option<Option<i32>>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EventListParams {
    /// Case-insensitive title search.
    pub search: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedEventsResponse {
    pub data: Vec<Event>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_dto_distinguishes_absent_and_null_class() {
        let dto: UpdateEventDto = serde_json::from_str(r#"{"title": "Assembly"}"#).unwrap();
        assert_eq!(dto.class_id, None);

        let dto: UpdateEventDto = serde_json::from_str(r#"{"class_id": null}"#).unwrap();
        assert_eq!(dto.class_id, Some(None));

        let dto: UpdateEventDto = serde_json::from_str(r#"{"class_id": 2}"#).unwrap();
        assert_eq!(dto.class_id, Some(Some(2)));
    }
}
