use serde::Serialize;
use utoipa::ToSchema;

use crate::modules::announcements::model::Announcement;
use crate::modules::lessons::model::Lesson;

/// Admin overview card counts.
#[derive(Debug, Serialize, ToSchema)]
pub struct EntityCounts {
    pub teachers: i64,
    pub students: i64,
    pub parents: i64,
    pub classes: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScheduleResponse {
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LatestAnnouncementsResponse {
    pub announcements: Vec<Announcement>,
}
