use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::utils::pagination::PaginationMeta;

/// A score on exactly one assessment, exam or assignment.
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct AssessmentResult {
    pub id: i32,
    pub score: i32,
    pub student_id: String,
    pub student_name: String,
    pub exam_id: Option<i32>,
    pub assignment_id: Option<i32>,
    /// Title of whichever assessment this result belongs to.
    pub assessment_title: String,
    pub class_name: String,
    pub teacher_name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateResultDto {
    #[validate(range(min = 0, max = 100))]
    pub score: i32,
    #[validate(length(min = 1))]
    pub student_id: String,
    /// Exactly one of `exam_id` and `assignment_id` must be set.
    pub exam_id: Option<i32>,
    pub assignment_id: Option<i32>,
}

impl CreateResultDto {
    /// The one-of rule cannot be expressed as a field attribute.
    pub fn assessment(&self) -> Result<(), String> {
        match (self.exam_id, self.assignment_id) {
            (Some(_), None) | (None, Some(_)) => Ok(()),
            _ => Err("Exactly one of exam_id and assignment_id must be set".to_string()),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateResultDto {
    #[validate(range(min = 0, max = 100))]
    pub score: Option<i32>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ResultListParams {
    /// Case-insensitive search over student names and assessment titles.
    pub search: Option<String>,
    pub student_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedResultsResponse {
    pub data: Vec<AssessmentResult>,
    pub meta: PaginationMeta,
}
