use database::{NewTodo, SqliteTodoStore, StoreOptions, TodoError, TodoStore};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

async fn create_test_store() -> SqliteTodoStore {
    let store = SqliteTodoStore::new("sqlite::memory:").await.unwrap();
    store.migrate().await.unwrap();
    store
}

#[tokio::test]
async fn test_store_creation_and_health() {
    let store = create_test_store().await;

    assert!(store.health_check().await.is_ok());
    assert!(store.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_full_todo_lifecycle() {
    let store = create_test_store().await;

    let created = store.create(NewTodo::new("fishing at the lake")).await.unwrap();
    assert_eq!(created.task, "fishing at the lake");
    assert!(!created.completed);
    assert!(!created.id.is_empty());

    let fetched = store.get_by_id(&created.id).await.unwrap();
    assert_eq!(fetched, created);

    let done = store.mark_done(&created.id).await.unwrap();
    assert!(done.completed);
    assert_eq!(done.id, created.id);
    assert_eq!(done.task, created.task);

    let refetched = store.get_by_id(&created.id).await.unwrap();
    assert_eq!(refetched, done);
}

#[tokio::test]
async fn test_mark_done_is_idempotent() {
    let store = create_test_store().await;
    let todo = store.create(NewTodo::new("water the plants")).await.unwrap();

    let first = store.mark_done(&todo.id).await.unwrap();
    let second = store.mark_done(&todo.id).await.unwrap();

    assert!(first.completed);
    assert!(second.completed);
    assert!(store.get_by_id(&todo.id).await.unwrap().completed);
}

#[tokio::test]
async fn test_not_found_errors() {
    let store = create_test_store().await;
    store.create(NewTodo::new("unrelated")).await.unwrap();

    let err = store.get_by_id("does-not-exist").await.unwrap_err();
    assert_eq!(err, TodoError::NotFound("does-not-exist".to_string()));

    let err = store.mark_done("does-not-exist").await.unwrap_err();
    assert!(err.is_not_found());

    // A failed mark_done must not have created anything
    assert_eq!(store.get_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_get_all_returns_every_row() {
    let store = create_test_store().await;

    let mut expected = HashSet::new();
    for i in 0..5 {
        let todo = store.create(NewTodo::new(format!("task {i}"))).await.unwrap();
        expected.insert(todo.id);
    }

    let all = store.get_all().await.unwrap();
    let ids: HashSet<_> = all.into_iter().map(|t| t.id).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_create_does_not_validate_content() {
    let store = create_test_store().await;
    let todo = store.create(NewTodo::new("")).await.unwrap();
    assert_eq!(store.get_by_id(&todo.id).await.unwrap().task, "");
}

#[tokio::test]
async fn test_concurrent_creates() {
    let store = Arc::new(create_test_store().await);

    let (a, b) = tokio::join!(
        store.create(NewTodo::new("first concurrent")),
        store.create(NewTodo::new("second concurrent")),
    );
    let a = a.unwrap();
    let b = b.unwrap();

    assert_ne!(a.id, b.id);
    assert_eq!(store.get_by_id(&a.id).await.unwrap().task, "first concurrent");
    assert_eq!(store.get_by_id(&b.id).await.unwrap().task, "second concurrent");
}

#[tokio::test]
async fn test_many_concurrent_creates_on_file_database() {
    let temp_dir = TempDir::new().unwrap();
    let url = format!("sqlite://{}", temp_dir.path().join("todo.sqlite").display());
    let store = Arc::new(SqliteTodoStore::new(&url).await.unwrap());
    store.migrate().await.unwrap();

    let futures = (0..20).map(|i| {
        let store = store.clone();
        async move { store.create(NewTodo::new(format!("parallel {i}"))).await }
    });
    let results = futures::future::join_all(futures).await;

    let ids: HashSet<_> = results.into_iter().map(|r| r.unwrap().id).collect();
    assert_eq!(ids.len(), 20);
    assert_eq!(store.get_all().await.unwrap().len(), 20);
}

#[tokio::test]
async fn test_file_database_persists_across_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let url = format!("sqlite://{}", temp_dir.path().join("todo.sqlite").display());

    let id = {
        let store = SqliteTodoStore::new(&url).await.unwrap();
        store.migrate().await.unwrap();
        let todo = store.create(NewTodo::new("survive restart")).await.unwrap();
        store.mark_done(&todo.id).await.unwrap();
        store.close().await.unwrap();
        todo.id
    };

    let store = SqliteTodoStore::new(&url).await.unwrap();
    store.migrate().await.unwrap();
    let todo = store.get_by_id(&id).await.unwrap();
    assert_eq!(todo.task, "survive restart");
    assert!(todo.completed);
}

#[tokio::test]
async fn test_operations_after_close_fail() {
    let store = create_test_store().await;
    let todo = store.create(NewTodo::new("before close")).await.unwrap();

    store.close().await.unwrap();

    let err = store.get_by_id(&todo.id).await.unwrap_err();
    assert!(err.is_internal(), "expected internal error, got {err:?}");
    assert!(store.get_all().await.unwrap_err().is_internal());
    assert!(store.health_check().await.is_err());
}

#[tokio::test]
async fn test_query_timeout_when_pool_exhausted() {
    let store = create_test_store()
        .await
        .with_query_timeout(Duration::from_millis(50));

    // In-memory stores have exactly one connection; hold it so the next call waits.
    let _held = store.pool().acquire().await.unwrap();

    let started = tokio::time::Instant::now();
    let err = store.get_all().await.unwrap_err();

    assert!(matches!(err, TodoError::Timeout { operation: "get_all", .. }));
    assert!(err.is_internal());
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_connect_with_custom_options() {
    let temp_dir = TempDir::new().unwrap();
    let url = format!("sqlite://{}", temp_dir.path().join("opts.sqlite").display());
    let options = StoreOptions {
        max_connections: 2,
        min_connections: 0,
        max_lifetime: None,
        acquire_timeout: Duration::from_secs(1),
        query_timeout: Duration::from_millis(250),
    };

    let store = SqliteTodoStore::connect(&url, options).await.unwrap();
    store.migrate().await.unwrap();

    assert_eq!(store.query_timeout(), Duration::from_millis(250));
    assert!(store.health_check().await.is_ok());
}
