//! Role-scoped access policy.
//!
//! Every request is authorized in one place: [`authorize`] decides whether a
//! principal may perform an operation on an entity collection at all, and
//! [`visibility`] builds the row-level [`Predicate`] that scopes every read
//! for that principal. List endpoints and dashboard widgets consume the same
//! predicate; per-page role filters are deliberately not re-derived anywhere
//! else.
//!
//! The engine is synchronous and side-effect-free. Credential verification
//! and predicate evaluation against the store belong to the middleware and
//! repository layers.

pub mod predicate;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::utils::errors::AppError;

pub use predicate::{ClassOwnership, KeyFilter, Predicate, TextFilter};

/// Roles carried in the identity provider's custom claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
    Parent,
}

impl Role {
    /// Parses a role claim. Unknown strings yield `None`; the caller must
    /// treat such principals as having no visibility (fail closed), not as
    /// unauthenticated.
    pub fn parse(role: &str) -> Option<Role> {
        match role {
            "admin" => Some(Role::Admin),
            "teacher" => Some(Role::Teacher),
            "student" => Some(Role::Student),
            "parent" => Some(Role::Parent),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
            Role::Parent => "parent",
        }
    }
}

/// The authenticated actor behind a request.
///
/// Built exactly once per request from the verified token claims, passed
/// explicitly to everything downstream, and never persisted. A token whose
/// role claim is not one of the four known roles still authenticates, but
/// carries `role: None` and is denied everything.
#[derive(Debug, Clone)]
pub struct Principal {
    /// Identity-provider subject id. For teacher/student/parent principals
    /// this is also the row id of their own record.
    pub id: String,
    pub role: Option<Role>,
}

impl Principal {
    pub fn new(id: impl Into<String>, role: &str) -> Self {
        Self {
            id: id.into(),
            role: Role::parse(role),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }
}

/// The twelve entity collections the dashboard manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Teacher,
    Student,
    Parent,
    Subject,
    Class,
    Lesson,
    Exam,
    Assignment,
    Result,
    Attendance,
    Event,
    Announcement,
}

impl EntityKind {
    /// Whether rows of this kind sit under an owning class at all. Kinds
    /// without a class relationship (staff rosters, subjects) are visible to
    /// every authenticated role; the route-to-role map still gates who can
    /// reach their endpoints.
    pub fn has_owning_class(&self) -> bool {
        !matches!(
            self,
            EntityKind::Teacher | EntityKind::Parent | EntityKind::Subject
        )
    }
}

/// Requested operation on an entity collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Create,
    Update,
    Delete,
}

impl Action {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Action::List)
    }
}

/// An (entity kind, operation) pair to be authorized for a principal.
#[derive(Debug, Clone, Copy)]
pub struct AccessRequest {
    pub kind: EntityKind,
    pub action: Action,
}

impl AccessRequest {
    pub fn new(kind: EntityKind, action: Action) -> Self {
        Self { kind, action }
    }
}

/// Outcome of [`authorize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub allowed: bool,
}

/// Decides whether the principal may perform the requested operation.
///
/// Mutations are admin-only, except that teachers may also mutate results.
/// Reads are allowed for any recognized role; row scoping happens in
/// [`visibility`]. Principals with an unrecognized role are denied
/// everything.
pub fn authorize(principal: &Principal, request: &AccessRequest) -> Decision {
    let allowed = match principal.role {
        None => false,
        Some(Role::Admin) => true,
        Some(role) => {
            if request.action.is_mutation() {
                role == Role::Teacher && request.kind == EntityKind::Result
            } else {
                true
            }
        }
    };
    Decision { allowed }
}

/// [`authorize`] mapped onto the request error taxonomy: denial is
/// `Forbidden`, never `NotFound`.
pub fn ensure_allowed(principal: &Principal, request: &AccessRequest) -> Result<(), AppError> {
    if authorize(principal, request).allowed {
        Ok(())
    } else {
        Err(AppError::forbidden(format!(
            "Role is not permitted to {:?} {:?} records",
            request.action, request.kind
        )))
    }
}

/// Builds the row-level visibility predicate for a principal and entity kind.
///
/// Admins see everything. Other recognized roles see rows whose owning class
/// is absent or satisfies their ownership relation: teachers own classes
/// they have a lesson in, students own the class on their roster, parents
/// own classes with one of their children on the roster. An unrecognized
/// role matches nothing.
pub fn visibility(principal: &Principal, kind: EntityKind) -> Predicate {
    let Some(role) = principal.role else {
        return Predicate::Nothing;
    };

    if role == Role::Admin || !kind.has_owning_class() {
        return Predicate::All;
    }

    let ownership = match role {
        Role::Teacher => ClassOwnership::TaughtBy(principal.id.clone()),
        Role::Student => ClassOwnership::Enrolls(principal.id.clone()),
        Role::Parent => ClassOwnership::HasChildOf(principal.id.clone()),
        Role::Admin => unreachable!(),
    };
    class_scope(ownership)
}

/// "No owning class, or the owning class satisfies the relation."
fn class_scope(ownership: ClassOwnership) -> Predicate {
    Predicate::Or(vec![
        Predicate::ClassUnowned,
        Predicate::ClassOwned(ownership),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [EntityKind; 12] = [
        EntityKind::Teacher,
        EntityKind::Student,
        EntityKind::Parent,
        EntityKind::Subject,
        EntityKind::Class,
        EntityKind::Lesson,
        EntityKind::Exam,
        EntityKind::Assignment,
        EntityKind::Result,
        EntityKind::Attendance,
        EntityKind::Event,
        EntityKind::Announcement,
    ];

    fn principal(role: &str) -> Principal {
        Principal::new("u1", role)
    }

    #[test]
    fn test_role_parse_known_roles() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("teacher"), Some(Role::Teacher));
        assert_eq!(Role::parse("student"), Some(Role::Student));
        assert_eq!(Role::parse("parent"), Some(Role::Parent));
    }

    #[test]
    fn test_role_parse_unknown_role_is_none() {
        assert_eq!(Role::parse("principal"), None);
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("Admin"), None);
    }

    #[test]
    fn test_admin_visibility_is_unconstrained_for_every_kind() {
        for kind in ALL_KINDS {
            assert_eq!(visibility(&principal("admin"), kind), Predicate::All);
        }
    }

    #[test]
    fn test_unknown_role_visibility_matches_nothing() {
        for kind in ALL_KINDS {
            assert_eq!(
                visibility(&principal("superuser"), kind),
                Predicate::Nothing
            );
        }
    }

    #[test]
    fn test_teacher_visibility_is_class_scoped() {
        let pred = visibility(&principal("teacher"), EntityKind::Announcement);
        assert_eq!(
            pred,
            Predicate::Or(vec![
                Predicate::ClassUnowned,
                Predicate::ClassOwned(ClassOwnership::TaughtBy("u1".to_string())),
            ])
        );
    }

    #[test]
    fn test_student_and_parent_visibility_relations() {
        assert_eq!(
            visibility(&principal("student"), EntityKind::Event),
            Predicate::Or(vec![
                Predicate::ClassUnowned,
                Predicate::ClassOwned(ClassOwnership::Enrolls("u1".to_string())),
            ])
        );
        assert_eq!(
            visibility(&principal("parent"), EntityKind::Event),
            Predicate::Or(vec![
                Predicate::ClassUnowned,
                Predicate::ClassOwned(ClassOwnership::HasChildOf("u1".to_string())),
            ])
        );
    }

    #[test]
    fn test_kinds_without_owning_class_are_fully_visible_to_known_roles() {
        for role in ["teacher", "student", "parent"] {
            assert_eq!(
                visibility(&principal(role), EntityKind::Teacher),
                Predicate::All
            );
            assert_eq!(
                visibility(&principal(role), EntityKind::Subject),
                Predicate::All
            );
            assert_eq!(
                visibility(&principal(role), EntityKind::Parent),
                Predicate::All
            );
        }
    }

    #[test]
    fn test_mutations_denied_for_student_and_parent_on_every_kind() {
        for role in ["student", "parent"] {
            for kind in ALL_KINDS {
                for action in [Action::Create, Action::Update, Action::Delete] {
                    let decision = authorize(&principal(role), &AccessRequest::new(kind, action));
                    assert!(!decision.allowed, "{role} must not {action:?} {kind:?}");
                }
            }
        }
    }

    #[test]
    fn test_admin_allowed_everything() {
        for kind in ALL_KINDS {
            for action in [Action::List, Action::Create, Action::Update, Action::Delete] {
                assert!(authorize(&principal("admin"), &AccessRequest::new(kind, action)).allowed);
            }
        }
    }

    #[test]
    fn test_teacher_may_mutate_results_only() {
        let teacher = principal("teacher");
        for action in [Action::Create, Action::Update, Action::Delete] {
            assert!(authorize(&teacher, &AccessRequest::new(EntityKind::Result, action)).allowed);
        }
        for kind in ALL_KINDS {
            if kind == EntityKind::Result {
                continue;
            }
            assert!(
                !authorize(&teacher, &AccessRequest::new(kind, Action::Update)).allowed,
                "teacher must not update {kind:?}"
            );
        }
    }

    #[test]
    fn test_list_allowed_for_recognized_roles() {
        for role in ["admin", "teacher", "student", "parent"] {
            for kind in ALL_KINDS {
                assert!(
                    authorize(&principal(role), &AccessRequest::new(kind, Action::List)).allowed
                );
            }
        }
    }

    #[test]
    fn test_unknown_role_denied_list_too() {
        assert!(
            !authorize(
                &principal("janitor"),
                &AccessRequest::new(EntityKind::Event, Action::List)
            )
            .allowed
        );
    }

    #[test]
    fn test_ensure_allowed_maps_denial_to_forbidden() {
        let err = ensure_allowed(
            &principal("student"),
            &AccessRequest::new(EntityKind::Exam, Action::Delete),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
