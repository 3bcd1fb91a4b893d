use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use sqlx::PgPool;
use tower::ServiceExt;

use slateboard::config::cors::CorsConfig;
use slateboard::config::jwt::JwtConfig;
use slateboard::config::pagination::PaginationConfig;
use slateboard::router::init_router;
use slateboard::state::AppState;
use slateboard::utils::jwt::create_access_token;

fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret".to_string(),
        access_token_expiry: 3600,
    }
}

/// Router over a lazy pool. No connection is opened until a query runs,
/// and every request in this file is rejected before reaching the database.
fn test_app() -> Router {
    let db = PgPool::connect_lazy("postgres://localhost/slateboard_unused")
        .expect("lazy pool from a well-formed url");

    init_router(AppState {
        db,
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:3001".to_string()],
        },
        pagination: PaginationConfig { per_page: 10 },
    })
}

async fn send(app: Router, auth: Option<&str>) -> (StatusCode, String) {
    let mut builder = Request::builder().method("GET").uri("/api/announcements");
    if let Some(value) = auth {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    let request = builder.body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_list_without_token_returns_401() {
    let (status, body) = send(test_app(), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("error"));
}

#[tokio::test]
async fn test_list_with_garbage_token_returns_401() {
    let (status, _) = send(test_app(), Some("Bearer not-a-jwt")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_with_wrong_scheme_returns_401() {
    let (status, _) = send(test_app(), Some("Basic dXNlcjpwYXNz")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_with_wrong_secret_token_returns_401() {
    let other = JwtConfig {
        secret: "a-different-secret".to_string(),
        access_token_expiry: 3600,
    };
    let token = create_access_token("teacher1", "teacher", &other).unwrap();

    let (status, _) = send(test_app(), Some(&format!("Bearer {token}"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_student_cannot_reach_roster_routes() {
    let token = create_access_token("student1", "student", &test_jwt_config()).unwrap();

    let request = Request::builder()
        .method("GET")
        .uri("/api/teachers")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_role_is_denied_on_role_gated_routes() {
    let token = create_access_token("ghost", "registrar", &test_jwt_config()).unwrap();

    let request = Request::builder()
        .method("GET")
        .uri("/api/teachers")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
