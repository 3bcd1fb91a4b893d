use slateboard::middleware::route_access::{ROUTE_ACCESS, allowed_roles};
use slateboard::policy::Role;

#[test]
fn test_every_mapped_prefix_lives_under_api() {
    for (prefix, roles) in ROUTE_ACCESS {
        assert!(prefix.starts_with("/api/"), "{prefix} is outside /api");
        assert!(!roles.is_empty(), "{prefix} admits no role at all");
    }
}

#[test]
fn test_roster_pages_exclude_students_and_parents() {
    for path in ["/api/teachers", "/api/students/s1", "/api/parents"] {
        let roles = allowed_roles(path).unwrap();
        assert!(!roles.contains(&Role::Student), "{path} admits students");
        assert!(!roles.contains(&Role::Parent), "{path} admits parents");
    }
}

#[test]
fn test_dashboard_widgets_use_longest_prefix() {
    assert_eq!(
        allowed_roles("/api/dashboard/counts"),
        Some(&[Role::Admin][..])
    );
    assert_eq!(
        allowed_roles("/api/dashboard/schedule"),
        Some(&[Role::Student, Role::Parent][..])
    );
    assert_eq!(
        allowed_roles("/api/dashboard/announcements").map(|r| r.len()),
        Some(4)
    );
}

#[test]
fn test_shared_collections_admit_every_role() {
    for path in [
        "/api/exams/1",
        "/api/assignments",
        "/api/results",
        "/api/attendance/9",
        "/api/events",
        "/api/announcements/2",
    ] {
        assert_eq!(allowed_roles(path).map(|r| r.len()), Some(4), "{path}");
    }
}

#[test]
fn test_paths_outside_the_map_are_unmapped() {
    assert_eq!(allowed_roles("/api-docs/openapi.json"), None);
    assert_eq!(allowed_roles("/"), None);
}
