use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::utils::pagination::PaginationMeta;

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct Student {
    /// Identity-provider uid; also the token subject for this student.
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Absent while the student is not yet placed in a class.
    pub class_id: Option<i32>,
    pub class_name: Option<String>,
    pub parent_id: Option<String>,
    pub parent_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStudentDto {
    /// Identity-provider uid to register the record under.
    #[validate(length(min = 1, max = 128))]
    pub id: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub class_id: Option<i32>,
    pub parent_id: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentDto {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Omit to keep the current class; send `null` to unassign.
    #[serde(default, deserialize_with = "crate::utils::patch::present")]
    #[schema(value_type = Option<i32>)]
    pub class_id: Option<Option<i32>>,
    /// Omit to keep the current parent; send `null` to unlink.
    #[serde(default, deserialize_with = "crate::utils::patch::present")]
    #[schema(value_type = Option<String>)]
    pub parent_id: Option<Option<String>>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentListParams {
    /// Case-insensitive name search.
    pub search: Option<String>,
    /// Only students in classes this teacher lessons in.
    pub teacher_id: Option<String>,
    pub class_id: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedStudentsResponse {
    pub data: Vec<Student>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_dto_distinguishes_absent_and_null_links() {
        let dto: UpdateStudentDto = serde_json::from_str(r#"{"name": "Ada"}"#).unwrap();
        assert_eq!(dto.class_id, None);
        assert_eq!(dto.parent_id, None);

        let dto: UpdateStudentDto =
            serde_json::from_str(r#"{"class_id": null, "parent_id": null}"#).unwrap();
        assert_eq!(dto.class_id, Some(None));
        assert_eq!(dto.parent_id, Some(None));

        let dto: UpdateStudentDto =
            serde_json::from_str(r#"{"class_id": 3, "parent_id": "p1"}"#).unwrap();
        assert_eq!(dto.class_id, Some(Some(3)));
        assert_eq!(dto.parent_id, Some(Some("p1".to_string())));
    }
}
