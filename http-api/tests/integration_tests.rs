//! Integration tests for the HTTP API
//!
//! Drives the full router with a mock store and checks the request/response
//! cycle for every route.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_api::{ServerOptions, TodoServer};
use http_body_util::BodyExt;
use mocks::{create_test_todos, MockTodoStore};
use serde_json::{json, Value};
use std::{sync::Arc, time::Duration};
use todo_core::{Todo, TodoError, TodoStore};
use tower::ServiceExt;

fn test_server(store: &MockTodoStore) -> TodoServer<MockTodoStore> {
    TodoServer::new(Arc::new(store.clone()))
}

async fn send(router: Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(body) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(body.to_string())
        }
        None => Body::empty(),
    };

    let response = router.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

#[tokio::test]
async fn test_fishing_scenario() {
    let store = MockTodoStore::new();
    let server = test_server(&store);

    let (status, body) = send(
        server.router(),
        Method::POST,
        "/todo",
        Some(r#"{"task":"fishing at the lake"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created: Todo = serde_json::from_slice(&body).unwrap();
    assert_eq!(created.task, "fishing at the lake");
    assert!(!created.completed);

    let (status, body) = send(server.router(), Method::GET, &format!("/todo/{}", created.id), None).await;
    assert_eq!(status, StatusCode::OK);
    let fetched: Todo = serde_json::from_slice(&body).unwrap();
    assert_eq!(fetched, created);

    let (status, body) = send(server.router(), Method::PATCH, &format!("/todo/{}", created.id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json_body(&body),
        json!({ "id": created.id, "task": "fishing at the lake", "completed": true })
    );

    let (status, body) = send(server.router(), Method::GET, "/todo/does-not-exist", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_list_empty_store_returns_empty_array() {
    let store = MockTodoStore::new();
    let (status, body) = send(test_server(&store).router(), Method::GET, "/todos", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!([]));
}

#[tokio::test]
async fn test_list_returns_all_todos() {
    let todos = create_test_todos(3);
    let store = MockTodoStore::with_todos(todos.clone());

    let (status, body) = send(test_server(&store).router(), Method::GET, "/todos", None).await;
    assert_eq!(status, StatusCode::OK);
    let listed: Vec<Todo> = serde_json::from_slice(&body).unwrap();
    assert_eq!(listed, todos);
}

#[tokio::test]
async fn test_create_rejects_malformed_bodies_without_creating() {
    let store = MockTodoStore::new();
    let server = test_server(&store);

    for body in ["not json", "{}", r#"{"task": 7}"#, r#"{"task":"   "}"#, ""] {
        let (status, response_body) = send(server.router(), Method::POST, "/todo", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body:?}");
        assert!(response_body.is_empty());
    }

    assert!(store.is_empty());
    store.assert_not_called("create");
}

#[tokio::test]
async fn test_create_ignores_content_type() {
    let store = MockTodoStore::new();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/todo")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(r#"{"task":"no json header"}"#))
        .unwrap();
    let response = test_server(&store).router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/todo")
        .body(Body::from(r#"{"task":"no header at all"}"#))
        .unwrap();
    let response = test_server(&store).router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_mark_done_unknown_id_is_not_found() {
    let store = MockTodoStore::new();
    let (status, body) = send(test_server(&store).router(), Method::PATCH, "/todo/missing", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_mark_done_twice_succeeds() {
    let todos = create_test_todos(1);
    let store = MockTodoStore::with_todos(todos.clone());
    let server = test_server(&store);
    let uri = format!("/todo/{}", todos[0].id);

    let (first, _) = send(server.router(), Method::PATCH, &uri, None).await;
    let (second, body) = send(server.router(), Method::PATCH, &uri, None).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
    assert_eq!(json_body(&body)["completed"], json!(true));
}

#[tokio::test]
async fn test_store_timeout_maps_to_generic_500() {
    let store = MockTodoStore::new();
    store.inject_error(TodoError::timeout("get_all", Duration::from_secs(1)));

    let (status, body) = send(test_server(&store).router(), Method::GET, "/todos", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(&body), json!({ "error": "internal server error" }));
}

#[tokio::test]
async fn test_database_error_detail_is_not_leaked() {
    let store = MockTodoStore::new();
    store.inject_error(TodoError::database("create", None, "disk I/O error at /var/secret"));

    let (status, body) = send(
        test_server(&store).router(),
        Method::POST,
        "/todo",
        Some(r#"{"task":"write report"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let text = String::from_utf8(body).unwrap();
    assert!(!text.contains("secret"));
    assert!(text.contains("internal server error"));
}

#[tokio::test]
async fn test_closed_store_answers_500() {
    let store = MockTodoStore::new();
    let server = test_server(&store);
    store.close().await.unwrap();

    let (status, _) = send(server.router(), Method::GET, "/todos", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_health_endpoint() {
    let store = MockTodoStore::new();
    let server = test_server(&store);

    let (status, body) = send(server.router(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!({ "status": "ok" }));

    store.close().await.unwrap();
    let (status, body) = send(server.router(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json_body(&body), json!({ "status": "unavailable" }));
}

#[tokio::test]
async fn test_slow_request_times_out_as_internal_error() {
    let store = MockTodoStore::new();
    store.inject_latency(Duration::from_secs(2));
    let server = test_server(&store).with_options(ServerOptions {
        request_timeout: Duration::from_millis(50),
        ..ServerOptions::default()
    });

    for (method, uri) in [(Method::GET, "/todos"), (Method::GET, "/todo/abc"), (Method::PATCH, "/todo/abc")] {
        let (status, body) = send(server.router(), method, uri, None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(json_body(&body), json!({ "error": "internal server error" }));
    }
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let store = MockTodoStore::new();
    let (status, _) = send(test_server(&store).router(), Method::GET, "/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
