//! Contract test helpers for validating TodoStore implementations
//!
//! Provides standardized tests that any implementation of `TodoStore`
//! should pass, ensuring the mock and the SQLite store behave alike.

use crate::{assert_contains_todo_with_id, assert_fresh_todo, assert_unique_ids, NewTodoBuilder};
use std::collections::HashSet;
use todo_core::{NewTodo, TodoError, TodoStore};

/// Test any TodoStore implementation with the full contract
///
/// Expects an empty, open store. Leaves the store open; call
/// [`test_close_contract`] afterwards to cover shutdown behavior.
pub async fn test_store_contract<S: TodoStore>(store: &S) {
    test_health_check_contract(store).await;
    test_empty_store_contract(store).await;
    test_create_contract(store).await;
    test_get_by_id_contract(store).await;
    test_get_all_contract(store).await;
    test_mark_done_contract(store).await;
    test_not_found_contract(store).await;
    test_concurrent_create_contract(store).await;
}

/// Test health check on an open store
pub async fn test_health_check_contract<S: TodoStore>(store: &S) {
    assert!(
        store.health_check().await.is_ok(),
        "Health check should pass for an open store"
    );
}

/// Test that listing an empty store yields an empty vec, not an error
pub async fn test_empty_store_contract<S: TodoStore>(store: &S) {
    let todos = store.get_all().await.expect("get_all should succeed");
    assert!(todos.is_empty(), "Fresh store should be empty, got {todos:?}");
}

/// Test todo creation contract
pub async fn test_create_contract<S: TodoStore>(store: &S) {
    let todo = store
        .create(NewTodoBuilder::new().with_task("contract create").build())
        .await
        .expect("Create should succeed");

    assert_fresh_todo(&todo, "contract create");

    let other = store
        .create(NewTodo::new("contract create"))
        .await
        .expect("Creating the same task twice should succeed");
    assert_ne!(todo.id, other.id, "Each create should assign a new id");
}

/// Test retrieval by id
pub async fn test_get_by_id_contract<S: TodoStore>(store: &S) {
    let created = store
        .create(NewTodo::new("contract get"))
        .await
        .expect("Create should succeed");

    let fetched = store
        .get_by_id(&created.id)
        .await
        .expect("get_by_id should find a created todo");
    assert_eq!(fetched, created, "Fetched todo should match created todo");
}

/// Test listing
pub async fn test_get_all_contract<S: TodoStore>(store: &S) {
    let before = store.get_all().await.expect("get_all should succeed").len();
    let created = store
        .create(NewTodo::new("contract list"))
        .await
        .expect("Create should succeed");

    let todos = store.get_all().await.expect("get_all should succeed");
    assert_eq!(todos.len(), before + 1, "get_all should include the new todo");
    assert_contains_todo_with_id(&todos, &created.id);
    assert_unique_ids(&todos);
}

/// Test mark done, including idempotency
pub async fn test_mark_done_contract<S: TodoStore>(store: &S) {
    let created = store
        .create(NewTodo::new("contract mark done"))
        .await
        .expect("Create should succeed");

    let done = store
        .mark_done(&created.id)
        .await
        .expect("mark_done should succeed");
    assert_eq!(done.id, created.id);
    assert_eq!(done.task, created.task);
    assert!(done.completed, "mark_done should return a completed todo");

    let fetched = store
        .get_by_id(&created.id)
        .await
        .expect("get_by_id should succeed");
    assert_eq!(fetched, done, "mark_done should return the stored row");

    let again = store
        .mark_done(&created.id)
        .await
        .expect("mark_done should be idempotent");
    assert!(again.completed);
}

/// Test not found errors for ids that were never created
pub async fn test_not_found_contract<S: TodoStore>(store: &S) {
    let count = store.get_all().await.expect("get_all should succeed").len();

    match store.get_by_id("never-created").await {
        Err(TodoError::NotFound(id)) => assert_eq!(id, "never-created"),
        other => panic!("Expected NotFound from get_by_id, got: {other:?}"),
    }

    match store.mark_done("never-created").await {
        Err(TodoError::NotFound(_)) => {}
        other => panic!("Expected NotFound from mark_done, got: {other:?}"),
    }

    let after = store.get_all().await.expect("get_all should succeed").len();
    assert_eq!(count, after, "Failed lookups must not change the store");
}

/// Test that concurrent creates produce distinct, retrievable todos
pub async fn test_concurrent_create_contract<S: TodoStore>(store: &S) {
    let (a, b) = tokio::join!(
        store.create(NewTodo::new("concurrent one")),
        store.create(NewTodo::new("concurrent two")),
    );
    let a = a.expect("First concurrent create should succeed");
    let b = b.expect("Second concurrent create should succeed");
    assert_ne!(a.id, b.id, "Concurrent creates must assign distinct ids");

    let tasks: HashSet<_> = [
        store.get_by_id(&a.id).await.expect("first should be retrievable").task,
        store.get_by_id(&b.id).await.expect("second should be retrievable").task,
    ]
    .into_iter()
    .collect();
    assert!(tasks.contains("concurrent one"));
    assert!(tasks.contains("concurrent two"));
}

/// Test that calls after close fail with an internal error
pub async fn test_close_contract<S: TodoStore>(store: &S) {
    store.close().await.expect("Close should succeed");

    let err = store
        .get_all()
        .await
        .expect_err("get_all after close should fail");
    assert!(err.is_internal(), "Expected internal error after close, got: {err:?}");

    let err = store
        .create(NewTodo::new("after close"))
        .await
        .expect_err("create after close should fail");
    assert!(err.is_internal(), "Expected internal error after close, got: {err:?}");
}
