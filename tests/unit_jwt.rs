use slateboard::config::jwt::JwtConfig;
use slateboard::utils::errors::AppError;
use slateboard::utils::jwt::{create_access_token, verify_token};

fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
    }
}

#[test]
fn test_create_access_token_success() {
    let jwt_config = test_jwt_config();

    let token = create_access_token("teacher-1", "teacher", &jwt_config).unwrap();
    assert!(!token.is_empty());
}

#[test]
fn test_verify_token_round_trip() {
    let jwt_config = test_jwt_config();
    let token = create_access_token("student-7", "student", &jwt_config).unwrap();

    let claims = verify_token(&token, &jwt_config).unwrap();
    assert_eq!(claims.sub, "student-7");
    assert_eq!(claims.role, "student");
    assert!(claims.exp > claims.iat);
}

#[test]
fn test_verify_token_preserves_unknown_role_string() {
    // Role interpretation happens when the principal is built, not here.
    let jwt_config = test_jwt_config();
    let token = create_access_token("x1", "registrar", &jwt_config).unwrap();

    let claims = verify_token(&token, &jwt_config).unwrap();
    assert_eq!(claims.role, "registrar");
}

#[test]
fn test_verify_token_rejects_garbage() {
    let jwt_config = test_jwt_config();

    let err = verify_token("not.a.token", &jwt_config).unwrap_err();
    assert!(matches!(err, AppError::Unauthenticated(_)));
}

#[test]
fn test_verify_token_rejects_wrong_secret() {
    let jwt_config = test_jwt_config();
    let token = create_access_token("admin-1", "admin", &jwt_config).unwrap();

    let other = JwtConfig {
        secret: "a_completely_different_secret".to_string(),
        access_token_expiry: 3600,
    };
    let err = verify_token(&token, &other).unwrap_err();
    assert!(matches!(err, AppError::Unauthenticated(_)));
}
