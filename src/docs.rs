use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::announcements::model::{
    Announcement, CreateAnnouncementDto, PaginatedAnnouncementsResponse, UpdateAnnouncementDto,
};
use crate::modules::assignments::model::{
    Assignment, CreateAssignmentDto, PaginatedAssignmentsResponse, UpdateAssignmentDto,
};
use crate::modules::attendance::model::{
    AttendanceRecord, CreateAttendanceDto, PaginatedAttendanceResponse, UpdateAttendanceDto,
};
use crate::modules::classes::model::{
    Class, CreateClassDto, PaginatedClassesResponse, UpdateClassDto,
};
use crate::modules::dashboard::model::{
    EntityCounts, LatestAnnouncementsResponse, ScheduleResponse,
};
use crate::modules::events::model::{
    CreateEventDto, Event, PaginatedEventsResponse, UpdateEventDto,
};
use crate::modules::exams::model::{CreateExamDto, Exam, PaginatedExamsResponse, UpdateExamDto};
use crate::modules::lessons::model::{
    CreateLessonDto, Lesson, PaginatedLessonsResponse, UpdateLessonDto,
};
use crate::modules::parents::model::{
    CreateParentDto, PaginatedParentsResponse, Parent, UpdateParentDto,
};
use crate::modules::results::model::{
    AssessmentResult, CreateResultDto, PaginatedResultsResponse, UpdateResultDto,
};
use crate::modules::students::model::{
    CreateStudentDto, PaginatedStudentsResponse, Student, UpdateStudentDto,
};
use crate::modules::subjects::model::{
    CreateSubjectDto, PaginatedSubjectsResponse, Subject, UpdateSubjectDto,
};
use crate::modules::teachers::model::{
    CreateTeacherDto, PaginatedTeachersResponse, Teacher, TeacherDetail, UpdateTeacherDto,
};
use crate::utils::errors::ErrorResponse;
use crate::utils::pagination::PaginationMeta;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::teachers::controller::list_teachers,
        crate::modules::teachers::controller::get_teacher,
        crate::modules::teachers::controller::create_teacher,
        crate::modules::teachers::controller::update_teacher,
        crate::modules::teachers::controller::delete_teacher,
        crate::modules::students::controller::list_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::parents::controller::list_parents,
        crate::modules::parents::controller::create_parent,
        crate::modules::parents::controller::update_parent,
        crate::modules::parents::controller::delete_parent,
        crate::modules::subjects::controller::list_subjects,
        crate::modules::subjects::controller::create_subject,
        crate::modules::subjects::controller::update_subject,
        crate::modules::subjects::controller::delete_subject,
        crate::modules::classes::controller::list_classes,
        crate::modules::classes::controller::create_class,
        crate::modules::classes::controller::update_class,
        crate::modules::classes::controller::delete_class,
        crate::modules::lessons::controller::list_lessons,
        crate::modules::lessons::controller::create_lesson,
        crate::modules::lessons::controller::update_lesson,
        crate::modules::lessons::controller::delete_lesson,
        crate::modules::exams::controller::list_exams,
        crate::modules::exams::controller::create_exam,
        crate::modules::exams::controller::update_exam,
        crate::modules::exams::controller::delete_exam,
        crate::modules::assignments::controller::list_assignments,
        crate::modules::assignments::controller::create_assignment,
        crate::modules::assignments::controller::update_assignment,
        crate::modules::assignments::controller::delete_assignment,
        crate::modules::results::controller::list_results,
        crate::modules::results::controller::create_result,
        crate::modules::results::controller::update_result,
        crate::modules::results::controller::delete_result,
        crate::modules::attendance::controller::list_attendance,
        crate::modules::attendance::controller::create_attendance,
        crate::modules::attendance::controller::update_attendance,
        crate::modules::attendance::controller::delete_attendance,
        crate::modules::events::controller::list_events,
        crate::modules::events::controller::create_event,
        crate::modules::events::controller::update_event,
        crate::modules::events::controller::delete_event,
        crate::modules::announcements::controller::list_announcements,
        crate::modules::announcements::controller::create_announcement,
        crate::modules::announcements::controller::update_announcement,
        crate::modules::announcements::controller::delete_announcement,
        crate::modules::dashboard::controller::dashboard_counts,
        crate::modules::dashboard::controller::dashboard_schedule,
        crate::modules::dashboard::controller::dashboard_announcements,
    ),
    components(
        schemas(
            Teacher,
            TeacherDetail,
            CreateTeacherDto,
            UpdateTeacherDto,
            PaginatedTeachersResponse,
            Student,
            CreateStudentDto,
            UpdateStudentDto,
            PaginatedStudentsResponse,
            Parent,
            CreateParentDto,
            UpdateParentDto,
            PaginatedParentsResponse,
            Subject,
            CreateSubjectDto,
            UpdateSubjectDto,
            PaginatedSubjectsResponse,
            Class,
            CreateClassDto,
            UpdateClassDto,
            PaginatedClassesResponse,
            Lesson,
            CreateLessonDto,
            UpdateLessonDto,
            PaginatedLessonsResponse,
            Exam,
            CreateExamDto,
            UpdateExamDto,
            PaginatedExamsResponse,
            Assignment,
            CreateAssignmentDto,
            UpdateAssignmentDto,
            PaginatedAssignmentsResponse,
            AssessmentResult,
            CreateResultDto,
            UpdateResultDto,
            PaginatedResultsResponse,
            AttendanceRecord,
            CreateAttendanceDto,
            UpdateAttendanceDto,
            PaginatedAttendanceResponse,
            Event,
            CreateEventDto,
            UpdateEventDto,
            PaginatedEventsResponse,
            Announcement,
            CreateAnnouncementDto,
            UpdateAnnouncementDto,
            PaginatedAnnouncementsResponse,
            EntityCounts,
            ScheduleResponse,
            LatestAnnouncementsResponse,
            PaginationMeta,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Teachers", description = "Teacher roster management"),
        (name = "Students", description = "Student roster management"),
        (name = "Parents", description = "Parent roster management"),
        (name = "Subjects", description = "Subject catalog management"),
        (name = "Classes", description = "Class management"),
        (name = "Lessons", description = "Lesson timetable management"),
        (name = "Exams", description = "Exam scheduling"),
        (name = "Assignments", description = "Assignment tracking"),
        (name = "Results", description = "Assessment result recording"),
        (name = "Attendance", description = "Attendance tracking"),
        (name = "Events", description = "School and class events"),
        (name = "Announcements", description = "School and class announcements"),
        (name = "Dashboard", description = "Role-scoped overview widgets")
    ),
    info(
        title = "Slateboard API",
        version = "0.1.0",
        description = "Role-scoped school management REST API built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
