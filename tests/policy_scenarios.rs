//! End-to-end policy scenarios evaluated against an in-memory fixture graph.
//!
//! The predicate tree is pure data, so these tests interpret it directly
//! over fixture rows instead of a database, checking that each role sees
//! exactly the rows the dashboard should show it.

use slateboard::policy::predicate::{ClassOwnership, KeyFilter, Predicate, TextFilter};
use slateboard::policy::{
    AccessRequest, Action, EntityKind, Principal, authorize, visibility,
};

struct Announcement {
    id: i32,
    title: &'static str,
    class_id: Option<i32>,
}

/// Fixture relationship graph: who teaches, enrolls in, or has a child in
/// which class.
struct Fixture {
    /// (class_id, teacher_id) pairs from lessons.
    lessons: Vec<(i32, &'static str)>,
    /// (student_id, class_id, parent_id) triples.
    students: Vec<(&'static str, Option<i32>, Option<&'static str>)>,
}

impl Fixture {
    fn class_set(&self, ownership: &ClassOwnership) -> Vec<i32> {
        match ownership {
            ClassOwnership::TaughtBy(teacher_id) => self
                .lessons
                .iter()
                .filter(|(_, t)| *t == teacher_id.as_str())
                .map(|(c, _)| *c)
                .collect(),
            ClassOwnership::Enrolls(student_id) => self
                .students
                .iter()
                .filter(|(s, _, _)| *s == student_id.as_str())
                .filter_map(|(_, c, _)| *c)
                .collect(),
            ClassOwnership::HasChildOf(parent_id) => self
                .students
                .iter()
                .filter(|(_, _, p)| *p == Some(parent_id.as_str()))
                .filter_map(|(_, c, _)| *c)
                .collect(),
        }
    }

    fn matches(&self, predicate: &Predicate, row: &Announcement) -> bool {
        match predicate {
            Predicate::All => true,
            Predicate::Nothing => false,
            Predicate::And(branches) => branches.iter().all(|b| self.matches(b, row)),
            Predicate::Or(branches) => branches.iter().any(|b| self.matches(b, row)),
            Predicate::ClassUnowned => row.class_id.is_none(),
            Predicate::ClassOwned(ownership) => row
                .class_id
                .is_some_and(|c| self.class_set(ownership).contains(&c)),
            Predicate::Text(TextFilter::Title(needle)) => {
                row.title.to_lowercase().contains(&needle.to_lowercase())
            }
            Predicate::Text(_) => false,
            Predicate::Key(KeyFilter::ClassId(v)) => row.class_id == Some(*v),
            Predicate::Key(_) => false,
        }
    }

    fn visible<'a>(
        &self,
        principal: &Principal,
        rows: &'a [Announcement],
    ) -> Vec<&'a Announcement> {
        let predicate = visibility(principal, EntityKind::Announcement);
        rows.iter().filter(|r| self.matches(&predicate, r)).collect()
    }
}

fn fixture() -> Fixture {
    Fixture {
        lessons: vec![(1, "t1"), (1, "t2"), (2, "t2")],
        students: vec![("s1", Some(1), Some("p1")), ("s2", Some(2), Some("p1"))],
    }
}

fn announcements() -> Vec<Announcement> {
    vec![
        Announcement {
            id: 1,
            title: "School closed Friday",
            class_id: None,
        },
        Announcement {
            id: 2,
            title: "Class 1A sports day",
            class_id: Some(1),
        },
        Announcement {
            id: 3,
            title: "Class 2B field trip",
            class_id: Some(2),
        },
    ]
}

fn ids(rows: &[&Announcement]) -> Vec<i32> {
    rows.iter().map(|r| r.id).collect()
}

#[test]
fn test_admin_sees_every_announcement() {
    let fx = fixture();
    let rows = announcements();
    let visible = fx.visible(&Principal::new("a1", "admin"), &rows);
    assert_eq!(ids(&visible), vec![1, 2, 3]);
}

#[test]
fn test_teacher_sees_school_wide_and_taught_classes() {
    let fx = fixture();
    let rows = announcements();

    let visible = fx.visible(&Principal::new("t1", "teacher"), &rows);
    assert_eq!(ids(&visible), vec![1, 2]);

    // t2 lessons in both classes and sees everything.
    let visible = fx.visible(&Principal::new("t2", "teacher"), &rows);
    assert_eq!(ids(&visible), vec![1, 2, 3]);
}

#[test]
fn test_student_sees_school_wide_and_own_class() {
    let fx = fixture();
    let rows = announcements();

    let visible = fx.visible(&Principal::new("s2", "student"), &rows);
    assert_eq!(ids(&visible), vec![1, 3]);
}

#[test]
fn test_parent_sees_school_wide_and_all_children_classes() {
    let fx = fixture();
    let rows = announcements();

    // p1 has children in classes 1 and 2.
    let visible = fx.visible(&Principal::new("p1", "parent"), &rows);
    assert_eq!(ids(&visible), vec![1, 2, 3]);
}

#[test]
fn test_unknown_role_sees_nothing() {
    let fx = fixture();
    let rows = announcements();
    let visible = fx.visible(&Principal::new("x1", "superuser"), &rows);
    assert!(visible.is_empty());
}

#[test]
fn test_search_narrows_but_never_widens() {
    let fx = fixture();
    let rows = announcements();
    let teacher = Principal::new("t1", "teacher");

    let base = visibility(&teacher, EntityKind::Announcement);
    let searched = base
        .clone()
        .and(Predicate::Text(TextFilter::Title("sports".to_string())));

    let base_rows: Vec<i32> = rows
        .iter()
        .filter(|r| fx.matches(&base, r))
        .map(|r| r.id)
        .collect();
    let searched_rows: Vec<i32> = rows
        .iter()
        .filter(|r| fx.matches(&searched, r))
        .map(|r| r.id)
        .collect();

    assert_eq!(searched_rows, vec![2]);
    for id in &searched_rows {
        assert!(base_rows.contains(id), "search must not widen visibility");
    }

    // A search for another class's announcement stays out of reach.
    let foreign = base.and(Predicate::Text(TextFilter::Title("field trip".to_string())));
    assert!(rows.iter().filter(|r| fx.matches(&foreign, r)).count() == 0);
}

#[test]
fn test_mutation_decisions_are_row_independent() {
    // A teacher may not mutate announcements even in classes they teach.
    let teacher = Principal::new("t1", "teacher");
    let decision = authorize(
        &teacher,
        &AccessRequest::new(EntityKind::Announcement, Action::Create),
    );
    assert!(!decision.allowed);

    // Results are the one entity a teacher may mutate.
    let decision = authorize(
        &teacher,
        &AccessRequest::new(EntityKind::Result, Action::Create),
    );
    assert!(decision.allowed);
}
