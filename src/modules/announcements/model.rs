use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::utils::pagination::PaginationMeta;

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct Announcement {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub class_id: Option<i32>,
    pub class_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAnnouncementDto {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub date: DateTime<Utc>,
    /// Absent for school-wide announcements.
    pub class_id: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAnnouncementDto {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    /// Omit to keep the current class; send `null` to make the
    /// announcement school-wide.
    #[serde(default, deserialize_with = "crate::utils::patch::present")]
    #[schema(value_type = Option<i32>)]
    pub class_id: Option<Option<i32>>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AnnouncementListParams {
    /// Case-insensitive title search.
    pub search: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedAnnouncementsResponse {
    pub data: Vec<Announcement>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_dto_keeps_class_when_field_absent() {
        let dto: UpdateAnnouncementDto =
            serde_json::from_str(r#"{"title": "Sports day"}"#).unwrap();
        assert_eq!(dto.class_id, None);
    }

    #[test]
    fn test_update_dto_clears_class_on_explicit_null() {
        let dto: UpdateAnnouncementDto = serde_json::from_str(r#"{"class_id": null}"#).unwrap();
        assert_eq!(dto.class_id, Some(None));
    }

    #[test]
    fn test_update_dto_sets_class_on_value() {
        let dto: UpdateAnnouncementDto = serde_json::from_str(r#"{"class_id": 4}"#).unwrap();
        assert_eq!(dto.class_id, Some(Some(4)));
    }
}
