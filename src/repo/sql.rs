//! Lowers [`Predicate`] trees to parameterized PostgreSQL `WHERE` clauses.
//!
//! The policy engine knows relationships ("the row's owning class enrolls
//! this student"); this module knows the schema. Each entity kind declares
//! how it reaches its owning class, and every filter resolves either to a
//! column on the entity's own table or to an `IN (subquery)` over the
//! relationship graph. Subqueries keep count queries join-free: page and
//! count share the exact same clause.
//!
//! Queries must reference the entity's table unaliased, since the generated
//! clause qualifies columns with the table name. A filter that does not
//! apply to an entity kind lowers to `FALSE`: an impossible filter matches
//! nothing rather than everything.

use sqlx::{Postgres, QueryBuilder};

use crate::policy::predicate::{ClassOwnership, KeyFilter, Predicate, TextFilter};
use crate::policy::EntityKind;

/// Table backing each entity kind.
pub fn table(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Teacher => "teachers",
        EntityKind::Student => "students",
        EntityKind::Parent => "parents",
        EntityKind::Subject => "subjects",
        EntityKind::Class => "classes",
        EntityKind::Lesson => "lessons",
        EntityKind::Exam => "exams",
        EntityKind::Assignment => "assignments",
        EntityKind::Result => "results",
        EntityKind::Attendance => "attendance",
        EntityKind::Event => "events",
        EntityKind::Announcement => "announcements",
    }
}

/// Appends the SQL form of `predicate` to `qb`. The output is always a
/// single boolean expression, so callers can write `... WHERE ` and push.
pub fn push_predicate(
    qb: &mut QueryBuilder<'_, Postgres>,
    kind: EntityKind,
    predicate: &Predicate,
) {
    match predicate {
        Predicate::All => {
            qb.push("TRUE");
        }
        Predicate::Nothing => {
            qb.push("FALSE");
        }
        Predicate::And(branches) => push_joined(qb, kind, branches, " AND ", "TRUE"),
        Predicate::Or(branches) => push_joined(qb, kind, branches, " OR ", "FALSE"),
        Predicate::ClassUnowned => push_class_unowned(qb, kind),
        Predicate::ClassOwned(ownership) => push_class_owned(qb, kind, ownership),
        Predicate::Text(filter) => push_text(qb, kind, filter),
        Predicate::Key(filter) => push_key(qb, kind, filter),
    }
}

fn push_joined(
    qb: &mut QueryBuilder<'_, Postgres>,
    kind: EntityKind,
    branches: &[Predicate],
    separator: &str,
    empty: &str,
) {
    if branches.is_empty() {
        qb.push(empty);
        return;
    }
    qb.push("(");
    for (i, branch) in branches.iter().enumerate() {
        if i > 0 {
            qb.push(separator);
        }
        push_predicate(qb, kind, branch);
    }
    qb.push(")");
}

/// "The row has no owning class." True for kinds without a class
/// relationship, a nullability check for kinds with an optional class FK,
/// and false where the class link is mandatory.
fn push_class_unowned(qb: &mut QueryBuilder<'_, Postgres>, kind: EntityKind) {
    match kind {
        EntityKind::Teacher | EntityKind::Parent | EntityKind::Subject => {
            qb.push("TRUE");
        }
        EntityKind::Student => {
            qb.push("students.class_id IS NULL");
        }
        EntityKind::Event => {
            qb.push("events.class_id IS NULL");
        }
        EntityKind::Announcement => {
            qb.push("announcements.class_id IS NULL");
        }
        EntityKind::Class
        | EntityKind::Lesson
        | EntityKind::Exam
        | EntityKind::Assignment
        | EntityKind::Result
        | EntityKind::Attendance => {
            qb.push("FALSE");
        }
    }
}

/// "The row's owning class satisfies the ownership relation."
fn push_class_owned(
    qb: &mut QueryBuilder<'_, Postgres>,
    kind: EntityKind,
    ownership: &ClassOwnership,
) {
    match kind {
        // No owning class to satisfy anything.
        EntityKind::Teacher | EntityKind::Parent | EntityKind::Subject => {
            qb.push("FALSE");
        }
        EntityKind::Class => {
            qb.push("classes.id IN (");
            push_class_set(qb, ownership);
            qb.push(")");
        }
        EntityKind::Student => {
            qb.push("students.class_id IN (");
            push_class_set(qb, ownership);
            qb.push(")");
        }
        EntityKind::Lesson => {
            qb.push("lessons.class_id IN (");
            push_class_set(qb, ownership);
            qb.push(")");
        }
        EntityKind::Event => {
            qb.push("events.class_id IN (");
            push_class_set(qb, ownership);
            qb.push(")");
        }
        EntityKind::Announcement => {
            qb.push("announcements.class_id IN (");
            push_class_set(qb, ownership);
            qb.push(")");
        }
        EntityKind::Exam => {
            qb.push("exams.lesson_id IN (SELECT id FROM lessons WHERE class_id IN (");
            push_class_set(qb, ownership);
            qb.push("))");
        }
        EntityKind::Assignment => {
            qb.push("assignments.lesson_id IN (SELECT id FROM lessons WHERE class_id IN (");
            push_class_set(qb, ownership);
            qb.push("))");
        }
        EntityKind::Attendance => {
            qb.push("attendance.lesson_id IN (SELECT id FROM lessons WHERE class_id IN (");
            push_class_set(qb, ownership);
            qb.push("))");
        }
        // A result's owning class is reached through its exam or assignment.
        EntityKind::Result => {
            qb.push(
                "(results.exam_id IN (SELECT exams.id FROM exams \
                 JOIN lessons ON lessons.id = exams.lesson_id WHERE lessons.class_id IN (",
            );
            push_class_set(qb, ownership);
            qb.push(
                ")) OR results.assignment_id IN (SELECT assignments.id FROM assignments \
                 JOIN lessons ON lessons.id = assignments.lesson_id WHERE lessons.class_id IN (",
            );
            push_class_set(qb, ownership);
            qb.push(")))");
        }
    }
}

/// The set of class ids satisfying an ownership relation.
fn push_class_set(qb: &mut QueryBuilder<'_, Postgres>, ownership: &ClassOwnership) {
    match ownership {
        ClassOwnership::TaughtBy(teacher_id) => {
            qb.push("SELECT class_id FROM lessons WHERE teacher_id = ");
            qb.push_bind(teacher_id.clone());
        }
        ClassOwnership::Enrolls(student_id) => {
            qb.push("SELECT class_id FROM students WHERE id = ");
            qb.push_bind(student_id.clone());
        }
        ClassOwnership::HasChildOf(parent_id) => {
            qb.push("SELECT class_id FROM students WHERE parent_id = ");
            qb.push_bind(parent_id.clone());
        }
    }
}

fn push_ilike(qb: &mut QueryBuilder<'_, Postgres>, column: &str, value: &str) {
    qb.push(column);
    qb.push(" ILIKE ");
    qb.push_bind(format!("%{value}%"));
}

fn push_text(qb: &mut QueryBuilder<'_, Postgres>, kind: EntityKind, filter: &TextFilter) {
    match (kind, filter) {
        (EntityKind::Teacher, TextFilter::Name(v)) => push_ilike(qb, "teachers.name", v),
        (EntityKind::Student, TextFilter::Name(v)) => push_ilike(qb, "students.name", v),
        (EntityKind::Parent, TextFilter::Name(v)) => push_ilike(qb, "parents.name", v),
        (EntityKind::Subject, TextFilter::Name(v)) => push_ilike(qb, "subjects.name", v),
        (EntityKind::Class, TextFilter::Name(v)) => push_ilike(qb, "classes.name", v),
        (EntityKind::Exam, TextFilter::Title(v)) => push_ilike(qb, "exams.title", v),
        (EntityKind::Assignment, TextFilter::Title(v)) => push_ilike(qb, "assignments.title", v),
        (EntityKind::Event, TextFilter::Title(v)) => push_ilike(qb, "events.title", v),
        (EntityKind::Announcement, TextFilter::Title(v)) => {
            push_ilike(qb, "announcements.title", v)
        }
        (EntityKind::Lesson, TextFilter::SubjectName(v)) => {
            qb.push("lessons.subject_id IN (SELECT id FROM subjects WHERE ");
            push_ilike(qb, "name", v);
            qb.push(")");
        }
        (EntityKind::Lesson, TextFilter::TeacherName(v)) => {
            qb.push("lessons.teacher_id IN (SELECT id FROM teachers WHERE ");
            push_ilike(qb, "name", v);
            qb.push(")");
        }
        (EntityKind::Result, TextFilter::StudentName(v)) => {
            qb.push("results.student_id IN (SELECT id FROM students WHERE ");
            push_ilike(qb, "name", v);
            qb.push(")");
        }
        (EntityKind::Result, TextFilter::AssessmentTitle(v)) => {
            qb.push("(results.exam_id IN (SELECT id FROM exams WHERE ");
            push_ilike(qb, "title", v);
            qb.push(") OR results.assignment_id IN (SELECT id FROM assignments WHERE ");
            push_ilike(qb, "title", v);
            qb.push("))");
        }
        // Filter does not apply to this kind; match nothing.
        _ => {
            qb.push("FALSE");
        }
    }
}

fn push_key(qb: &mut QueryBuilder<'_, Postgres>, kind: EntityKind, filter: &KeyFilter) {
    match (kind, filter) {
        (EntityKind::Teacher, KeyFilter::TeacherId(v)) => {
            qb.push("teachers.id = ");
            qb.push_bind(v.clone());
        }
        (EntityKind::Teacher, KeyFilter::ClassId(v)) => {
            qb.push("teachers.id IN (SELECT teacher_id FROM lessons WHERE class_id = ");
            qb.push_bind(*v);
            qb.push(")");
        }
        (EntityKind::Student, KeyFilter::StudentId(v)) => {
            qb.push("students.id = ");
            qb.push_bind(v.clone());
        }
        (EntityKind::Student, KeyFilter::ClassId(v)) => {
            qb.push("students.class_id = ");
            qb.push_bind(*v);
        }
        (EntityKind::Student, KeyFilter::TeacherId(v)) => {
            qb.push("students.class_id IN (SELECT class_id FROM lessons WHERE teacher_id = ");
            qb.push_bind(v.clone());
            qb.push(")");
        }
        (EntityKind::Class, KeyFilter::ClassId(v)) => {
            qb.push("classes.id = ");
            qb.push_bind(*v);
        }
        (EntityKind::Class, KeyFilter::SupervisorId(v)) => {
            qb.push("classes.supervisor_id = ");
            qb.push_bind(v.clone());
        }
        (EntityKind::Lesson, KeyFilter::ClassId(v)) => {
            qb.push("lessons.class_id = ");
            qb.push_bind(*v);
        }
        (EntityKind::Lesson, KeyFilter::TeacherId(v)) => {
            qb.push("lessons.teacher_id = ");
            qb.push_bind(v.clone());
        }
        (EntityKind::Exam, KeyFilter::ClassId(v)) => {
            qb.push("exams.lesson_id IN (SELECT id FROM lessons WHERE class_id = ");
            qb.push_bind(*v);
            qb.push(")");
        }
        (EntityKind::Exam, KeyFilter::TeacherId(v)) => {
            qb.push("exams.lesson_id IN (SELECT id FROM lessons WHERE teacher_id = ");
            qb.push_bind(v.clone());
            qb.push(")");
        }
        (EntityKind::Exam, KeyFilter::LessonId(v)) => {
            qb.push("exams.lesson_id = ");
            qb.push_bind(*v);
        }
        (EntityKind::Assignment, KeyFilter::ClassId(v)) => {
            qb.push("assignments.lesson_id IN (SELECT id FROM lessons WHERE class_id = ");
            qb.push_bind(*v);
            qb.push(")");
        }
        (EntityKind::Assignment, KeyFilter::TeacherId(v)) => {
            qb.push("assignments.lesson_id IN (SELECT id FROM lessons WHERE teacher_id = ");
            qb.push_bind(v.clone());
            qb.push(")");
        }
        (EntityKind::Assignment, KeyFilter::LessonId(v)) => {
            qb.push("assignments.lesson_id = ");
            qb.push_bind(*v);
        }
        (EntityKind::Result, KeyFilter::StudentId(v)) => {
            qb.push("results.student_id = ");
            qb.push_bind(v.clone());
        }
        (EntityKind::Attendance, KeyFilter::StudentId(v)) => {
            qb.push("attendance.student_id = ");
            qb.push_bind(v.clone());
        }
        (EntityKind::Attendance, KeyFilter::LessonId(v)) => {
            qb.push("attendance.lesson_id = ");
            qb.push_bind(*v);
        }
        (EntityKind::Attendance, KeyFilter::ClassId(v)) => {
            qb.push("attendance.lesson_id IN (SELECT id FROM lessons WHERE class_id = ");
            qb.push_bind(*v);
            qb.push(")");
        }
        (EntityKind::Event, KeyFilter::ClassId(v)) => {
            qb.push("events.class_id = ");
            qb.push_bind(*v);
        }
        (EntityKind::Announcement, KeyFilter::ClassId(v)) => {
            qb.push("announcements.class_id = ");
            qb.push_bind(*v);
        }
        // Filter does not apply to this kind; match nothing.
        _ => {
            qb.push("FALSE");
        }
    }
}

/// Renders the clause for inspection. Test helper; production code pushes
/// into its own builder.
pub fn predicate_sql(kind: EntityKind, predicate: &Predicate) -> String {
    let mut qb = QueryBuilder::new("");
    push_predicate(&mut qb, kind, predicate);
    qb.into_sql()
}
