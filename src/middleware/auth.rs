use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::policy::Principal;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// Extractor that verifies the bearer token and yields the request's
/// [`Principal`]. This is the only place a principal is constructed: every
/// handler receives the same value, and no page decodes the token itself.
///
/// A missing or invalid credential fails the request with `Unauthenticated`
/// before any handler logic runs; there is no anonymous view. A valid token
/// with an unrecognized role claim still authenticates; the policy engine
/// then denies it everything.
#[derive(Debug, Clone)]
pub struct AuthPrincipal(pub Principal);

impl FromRequestParts<AppState> for AuthPrincipal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthenticated("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthenticated("Invalid authorization header format"))?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthPrincipal(Principal::new(claims.sub, &claims.role)))
    }
}

#[cfg(test)]
mod tests {
    use crate::policy::{Principal, Role};

    #[test]
    fn test_principal_from_claims_keeps_subject_and_role() {
        let principal = Principal::new("t1", "teacher");
        assert_eq!(principal.id, "t1");
        assert_eq!(principal.role, Some(Role::Teacher));
    }

    #[test]
    fn test_principal_with_unknown_role_authenticates_but_has_no_role() {
        let principal = Principal::new("x9", "registrar");
        assert_eq!(principal.role, None);
        assert!(!principal.is_admin());
    }
}
