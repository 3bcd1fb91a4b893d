use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::utils::pagination::PaginationMeta;

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct Class {
    pub id: i32,
    pub name: String,
    pub capacity: i32,
    pub grade: i32,
    pub supervisor_id: Option<String>,
    pub supervisor_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateClassDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(range(min = 1))]
    pub capacity: i32,
    #[validate(range(min = 1, max = 12))]
    pub grade: i32,
    pub supervisor_id: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateClassDto {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    #[validate(range(min = 1, max = 12))]
    pub grade: Option<i32>,
    /// Omit to keep the current supervisor; send `null` to unassign.
    #[serde(default, deserialize_with = "crate::utils::patch::present")]
    #[schema(value_type = Option<String>)]
    pub supervisor_id: Option<Option<String>>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClassListParams {
    /// Case-insensitive name search.
    pub search: Option<String>,
    /// Only classes supervised by this teacher.
    pub supervisor_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedClassesResponse {
    pub data: Vec<Class>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_dto_distinguishes_absent_and_null_supervisor() {
        let dto: UpdateClassDto = serde_json::from_str(r#"{"name": "1A"}"#).unwrap();
        assert_eq!(dto.supervisor_id, None);

        let dto: UpdateClassDto = serde_json::from_str(r#"{"supervisor_id": null}"#).unwrap();
        assert_eq!(dto.supervisor_id, Some(None));

        let dto: UpdateClassDto = serde_json::from_str(r#"{"supervisor_id": "t1"}"#).unwrap();
        assert_eq!(dto.supervisor_id, Some(Some("t1".to_string())));
    }
}
