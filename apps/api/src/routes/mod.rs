pub mod health;

use axum::{routing::get, Router};

use crate::state::AppState;
use crate::students::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route(
            "/students/",
            get(handlers::handle_list_students).post(handlers::handle_create_student),
        )
        // Same collection without the trailing slash.
        .route(
            "/students",
            get(handlers::handle_list_students).post(handlers::handle_create_student),
        )
        .route(
            "/students/:id",
            get(handlers::handle_get_student)
                .put(handlers::handle_update_student)
                .delete(handlers::handle_delete_student),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::db::connect_in_memory;

    async fn test_app() -> Router {
        let db = connect_in_memory().await.unwrap();
        build_router(AppState { db })
    }

    async fn test_app_with_closed_pool() -> Router {
        let db = connect_in_memory().await.unwrap();
        db.close().await;
        build_router(AppState { db })
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_root_returns_welcome_message() {
        let app = test_app().await;
        let (status, body) = send(&app, Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "message": "Welcome! Use /docs to test the Students CRUD API" })
        );
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let app = test_app().await;
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_health_is_500_when_database_is_unreachable() {
        let app = test_app_with_closed_pool().await;
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "detail": "A database error occurred" }));
    }

    #[tokio::test]
    async fn test_storage_failure_is_generic_500() {
        let app = test_app_with_closed_pool().await;

        let (status, body) = send(&app, Method::GET, "/students/", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "detail": "A database error occurred" }));

        let (status, body) = send(
            &app,
            Method::POST,
            "/students/",
            Some(json!({ "name": "Ali", "age": 20 })),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "detail": "A database error occurred" }));
    }

    #[tokio::test]
    async fn test_full_lifecycle_over_http() {
        let app = test_app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/students/",
            Some(json!({ "name": "Ali", "age": 20 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "id": 1, "name": "Ali", "age": 20 }));

        let (status, body) = send(
            &app,
            Method::PUT,
            "/students/1",
            Some(json!({ "name": "Ahmed", "age": 21 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "id": 1, "name": "Ahmed", "age": 21 }));

        let (status, body) = send(&app, Method::GET, "/students/2", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "detail": "Student not found" }));

        let (status, body) = send(&app, Method::DELETE, "/students/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Student deleted successfully" }));

        let (status, body) = send(&app, Method::GET, "/students/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "detail": "Student not found" }));
    }

    #[tokio::test]
    async fn test_list_returns_array() {
        let app = test_app().await;

        let (status, body) = send(&app, Method::GET, "/students/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        send(&app, Method::POST, "/students/", Some(json!({ "name": "Ali", "age": 20 }))).await;
        send(&app, Method::POST, "/students", Some(json!({ "name": "Sara", "age": 22 }))).await;

        let (status, body) = send(&app, Method::GET, "/students", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                { "id": 1, "name": "Ali", "age": 20 },
                { "id": 2, "name": "Sara", "age": 22 }
            ])
        );
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_return_404() {
        let app = test_app().await;

        let (status, body) = send(
            &app,
            Method::PUT,
            "/students/7",
            Some(json!({ "name": "Ali", "age": 20 })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "detail": "Student not found" }));

        let (status, body) = send(&app, Method::DELETE, "/students/7", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "detail": "Student not found" }));
    }

    #[tokio::test]
    async fn test_supplied_id_is_ignored_on_create() {
        let app = test_app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/students/",
            Some(json!({ "id": 99, "name": "Ali", "age": 20 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 1);

        let (status, _) = send(&app, Method::GET, "/students/99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_field_is_422() {
        let app = test_app().await;
        let (status, body) =
            send(&app, Method::POST, "/students/", Some(json!({ "name": "Ali" }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].is_string());

        let (_, body) = send(&app, Method::GET, "/students/", None).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_empty_name_is_422() {
        let app = test_app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/students/",
            Some(json!({ "name": "", "age": 20 })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body, json!({ "detail": "name must not be empty" }));
    }

    #[tokio::test]
    async fn test_wrong_age_type_is_422() {
        let app = test_app().await;
        let (status, _) = send(
            &app,
            Method::POST,
            "/students/",
            Some(json!({ "name": "Ali", "age": "twenty" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_rejected() {
        let app = test_app().await;
        let request = Request::builder()
            .method(Method::POST)
            .uri("/students/")
            .body(Body::from(r#"{"name":"Ali","age":20}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_non_integer_id_is_422() {
        let app = test_app().await;
        let (status, body) = send(&app, Method::GET, "/students/abc", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].is_string());
    }
}
