//! Checks the SQL rendered from visibility predicates. The builder binds
//! values as parameters, so the rendered text carries `$n` placeholders.

use slateboard::policy::predicate::{ClassOwnership, KeyFilter, Predicate, TextFilter};
use slateboard::policy::{EntityKind, Principal, visibility};
use slateboard::repo::sql::predicate_sql;

fn principal(role: &str) -> Principal {
    Principal::new("u1", role)
}

#[test]
fn test_all_and_nothing_render_as_constants() {
    assert_eq!(predicate_sql(EntityKind::Event, &Predicate::All), "TRUE");
    assert_eq!(
        predicate_sql(EntityKind::Event, &Predicate::Nothing),
        "FALSE"
    );
}

#[test]
fn test_teacher_announcement_visibility_is_null_or_taught_class() {
    let pred = visibility(&principal("teacher"), EntityKind::Announcement);
    let sql = predicate_sql(EntityKind::Announcement, &pred);

    assert_eq!(
        sql,
        "(announcements.class_id IS NULL OR announcements.class_id IN \
         (SELECT class_id FROM lessons WHERE teacher_id = $1))"
    );
}

#[test]
fn test_student_exam_visibility_goes_through_the_lesson() {
    let pred = visibility(&principal("student"), EntityKind::Exam);
    let sql = predicate_sql(EntityKind::Exam, &pred);

    // Exams always have an owning class, so the unowned branch is FALSE.
    assert_eq!(
        sql,
        "(FALSE OR exams.lesson_id IN (SELECT id FROM lessons WHERE class_id IN \
         (SELECT class_id FROM students WHERE id = $1)))"
    );
}

#[test]
fn test_parent_result_visibility_covers_both_assessment_paths() {
    let pred = visibility(&principal("parent"), EntityKind::Result);
    let sql = predicate_sql(EntityKind::Result, &pred);

    assert!(sql.contains("results.exam_id IN"));
    assert!(sql.contains("results.assignment_id IN"));
    assert!(sql.contains("students WHERE parent_id ="));
}

#[test]
fn test_search_filter_narrows_with_and() {
    let pred = visibility(&principal("teacher"), EntityKind::Announcement)
        .and(Predicate::Text(TextFilter::Title("exam week".to_string())));
    let sql = predicate_sql(EntityKind::Announcement, &pred);

    assert!(sql.contains(" AND "));
    assert!(sql.contains("announcements.title ILIKE $"));
}

#[test]
fn test_admin_with_search_renders_search_only() {
    // All is the AND identity, so it vanishes from the composed predicate.
    let pred = visibility(&principal("admin"), EntityKind::Class)
        .and(Predicate::Text(TextFilter::Name("1A".to_string())));
    let sql = predicate_sql(EntityKind::Class, &pred);

    assert_eq!(sql, "classes.name ILIKE $1");
}

#[test]
fn test_unknown_role_renders_false_even_with_filters() {
    let pred = visibility(&principal("superuser"), EntityKind::Event)
        .and(Predicate::Key(KeyFilter::ClassId(3)));
    let sql = predicate_sql(EntityKind::Event, &pred);

    assert_eq!(sql, "FALSE");
}

#[test]
fn test_inapplicable_filter_matches_nothing() {
    // Lessons have no title column; the filter must fail closed.
    let sql = predicate_sql(
        EntityKind::Lesson,
        &Predicate::Text(TextFilter::Title("x".to_string())),
    );
    assert_eq!(sql, "FALSE");
}

#[test]
fn test_kinds_without_owning_class_treat_ownership_as_unsatisfiable() {
    let owned = Predicate::ClassOwned(ClassOwnership::Enrolls("s1".to_string()));
    assert_eq!(predicate_sql(EntityKind::Subject, &owned), "FALSE");
    assert_eq!(
        predicate_sql(EntityKind::Subject, &Predicate::ClassUnowned),
        "TRUE"
    );
}

#[test]
fn test_empty_branches_render_as_identity_constants() {
    assert_eq!(predicate_sql(EntityKind::Event, &Predicate::And(vec![])), "TRUE");
    assert_eq!(predicate_sql(EntityKind::Event, &Predicate::Or(vec![])), "FALSE");
}
