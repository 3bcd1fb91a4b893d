//! Route-to-role map.
//!
//! A static table mapping URL path prefixes to the roles allowed past them,
//! enforced as a middleware layer before any handler runs. This is defense
//! in depth over the policy engine: a role turned away here would also get
//! nothing (or a denial) from the data layer, and the table must stay at
//! least as strict as the engine's mutation rules.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};

use crate::middleware::auth::AuthPrincipal;
use crate::policy::Role;
use crate::state::AppState;
use crate::utils::errors::AppError;

const ALL_ROLES: &[Role] = &[Role::Admin, Role::Teacher, Role::Student, Role::Parent];

/// Path-prefix access table, mirroring the dashboard menu. Longest matching
/// prefix wins.
pub const ROUTE_ACCESS: &[(&str, &[Role])] = &[
    ("/api/teachers", &[Role::Admin, Role::Teacher]),
    ("/api/students", &[Role::Admin, Role::Teacher]),
    ("/api/parents", &[Role::Admin, Role::Teacher]),
    ("/api/subjects", &[Role::Admin]),
    ("/api/classes", &[Role::Admin, Role::Teacher]),
    ("/api/lessons", &[Role::Admin, Role::Teacher]),
    ("/api/exams", ALL_ROLES),
    ("/api/assignments", ALL_ROLES),
    ("/api/results", ALL_ROLES),
    ("/api/attendance", ALL_ROLES),
    ("/api/events", ALL_ROLES),
    ("/api/announcements", ALL_ROLES),
    ("/api/dashboard/counts", &[Role::Admin]),
    ("/api/dashboard/schedule", &[Role::Student, Role::Parent]),
    ("/api/dashboard/announcements", ALL_ROLES),
];

/// Roles allowed to enter the longest matching prefix, if any is configured
/// for this path.
pub fn allowed_roles(path: &str) -> Option<&'static [Role]> {
    ROUTE_ACCESS
        .iter()
        .filter(|(prefix, _)| path.starts_with(prefix))
        .max_by_key(|(prefix, _)| prefix.len())
        .map(|(_, roles)| *roles)
}

/// Middleware enforcing the route-to-role map across `/api`.
///
/// Every `/api` request must carry a valid credential; requests under a
/// mapped prefix additionally need one of the listed roles. Principals with
/// an unrecognized role match no role set and are turned away.
pub async fn enforce_route_access(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path().to_string();
    if !path.starts_with("/api") {
        return Ok(next.run(req).await);
    }

    let (mut parts, body) = req.into_parts();
    let AuthPrincipal(principal) = AuthPrincipal::from_request_parts(&mut parts, &state).await?;

    if let Some(roles) = allowed_roles(&path) {
        let permitted = principal.role.is_some_and(|role| roles.contains(&role));
        if !permitted {
            return Err(AppError::forbidden("Role may not access this resource"));
        }
    }

    Ok(next.run(Request::from_parts(parts, body)).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_prefix_wins() {
        assert_eq!(
            allowed_roles("/api/dashboard/counts"),
            Some(&[Role::Admin][..])
        );
        assert_eq!(
            allowed_roles("/api/dashboard/schedule"),
            Some(&[Role::Student, Role::Parent][..])
        );
    }

    #[test]
    fn test_unmapped_path_has_no_role_set() {
        assert_eq!(allowed_roles("/api-docs/openapi.json"), None);
        assert_eq!(allowed_roles("/health"), None);
    }

    #[test]
    fn test_subjects_are_admin_only() {
        let roles = allowed_roles("/api/subjects/3").unwrap();
        assert_eq!(roles, &[Role::Admin]);
    }

    #[test]
    fn test_shared_prefixes_admit_all_four_roles() {
        for path in [
            "/api/exams",
            "/api/results/7",
            "/api/announcements",
            "/api/events",
            "/api/attendance",
        ] {
            let roles = allowed_roles(path).unwrap();
            assert_eq!(roles.len(), 4, "{path} should admit every role");
        }
    }

    #[test]
    fn test_admin_is_admitted_everywhere() {
        for (prefix, roles) in ROUTE_ACCESS {
            if *prefix == "/api/dashboard/schedule" {
                // The schedule endpoint is inherently student/parent scoped.
                continue;
            }
            assert!(roles.contains(&Role::Admin), "{prefix} should admit admin");
        }
    }
}
