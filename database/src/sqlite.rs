use crate::common::{
    database_path, is_memory_url, row_to_todo, sqlx_error_to_todo_error, with_timeout, TODO_COLUMNS,
};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use todo_core::{
    error::{Result, TodoError},
    models::{NewTodo, Todo},
    store::TodoStore,
};

/// Default time budget for a single store call
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(1);

/// Connection pool sizing and timeouts for [`SqliteTodoStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Maximum number of open connections
    pub max_connections: u32,
    /// Connections kept open while idle
    pub min_connections: u32,
    /// Connections older than this are recycled
    pub max_lifetime: Option<Duration>,
    /// How long to wait for a free connection
    pub acquire_timeout: Duration,
    /// Time budget for each store operation
    pub query_timeout: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            max_connections: 5,
            min_connections: 1,
            max_lifetime: Some(Duration::from_secs(30 * 60)),
            acquire_timeout: Duration::from_secs(5),
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }
}

/// SQLite implementation of the TodoStore trait
///
/// All operations share one sqlx connection pool and run under the
/// configured query timeout. The pool handles concurrent use; the store
/// adds no locking of its own.
#[derive(Debug, Clone)]
pub struct SqliteTodoStore {
    pool: SqlitePool,
    query_timeout: Duration,
}

impl SqliteTodoStore {
    /// Create a new SQLite store with default pool settings
    ///
    /// # Arguments
    /// * `database_url` - SQLite database URL (`sqlite://path` or `sqlite::memory:`)
    ///
    /// # Examples
    /// ```rust,no_run
    /// use database::SqliteTodoStore;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// // In-memory database for testing
    /// let store = SqliteTodoStore::new("sqlite::memory:").await?;
    ///
    /// // File-based database
    /// let store = SqliteTodoStore::new("sqlite:///tmp/todo.sqlite").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(database_url: &str) -> Result<Self> {
        Self::connect(database_url, StoreOptions::default()).await
    }

    /// Create a new SQLite store with explicit pool settings
    ///
    /// In-memory databases only live as long as a connection to them is
    /// open, so they get a single connection that never idles out,
    /// regardless of `options`.
    pub async fn connect(database_url: &str, options: StoreOptions) -> Result<Self> {
        let in_memory = is_memory_url(database_url);

        let connect_options = if in_memory {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| sqlx_error_to_todo_error("connect", None, e))?
                .journal_mode(SqliteJournalMode::Memory)
        } else {
            SqliteConnectOptions::new()
                .filename(database_path(database_url))
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
        }
        .busy_timeout(Duration::from_secs(5));

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(options.max_connections)
                .min_connections(options.min_connections)
                .max_lifetime(options.max_lifetime)
        }
        .acquire_timeout(options.acquire_timeout);

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(|e| sqlx_error_to_todo_error("connect", None, e))?;

        tracing::info!(
            in_memory,
            max_connections = options.max_connections,
            query_timeout_ms = options.query_timeout.as_millis() as u64,
            "SQLite store connected"
        );

        Ok(Self {
            pool,
            query_timeout: options.query_timeout,
        })
    }

    /// Create the `todo` table if it does not exist yet
    ///
    /// Should be called once after connecting.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations/sqlite")
            .run(&self.pool)
            .await
            .map_err(|e| TodoError::database("migrate", None, format!("Migration failed: {e}")))?;

        tracing::info!("Database migrations completed successfully");
        Ok(())
    }

    /// Get access to the underlying database pool for custom operations
    ///
    /// This method is primarily intended for testing scenarios where
    /// direct SQL execution is needed.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Time budget applied to each store call
    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// Return a copy of this store that uses a different per-call time budget
    pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }
}

#[async_trait]
impl TodoStore for SqliteTodoStore {
    async fn get_by_id(&self, id: &str) -> Result<Todo> {
        tracing::debug!(id, "get_by_id");
        with_timeout("get_by_id", self.query_timeout, async {
            let row = sqlx::query(&format!("SELECT {TODO_COLUMNS} FROM todo WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| sqlx_error_to_todo_error("get_by_id", Some(id), e))?;

            match row {
                Some(row) => row_to_todo("get_by_id", &row),
                None => Err(TodoError::not_found(id)),
            }
        })
        .await
    }

    async fn get_all(&self) -> Result<Vec<Todo>> {
        tracing::debug!("get_all");
        with_timeout("get_all", self.query_timeout, async {
            let rows = sqlx::query(&format!("SELECT {TODO_COLUMNS} FROM todo"))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| sqlx_error_to_todo_error("get_all", None, e))?;

            rows.iter().map(|row| row_to_todo("get_all", row)).collect()
        })
        .await
    }

    async fn create(&self, todo: NewTodo) -> Result<Todo> {
        let todo = todo.into_todo();
        tracing::debug!(id = %todo.id, "create");

        with_timeout("create", self.query_timeout, async {
            sqlx::query("INSERT INTO todo (id, task, completed) VALUES (?, ?, ?)")
                .bind(&todo.id)
                .bind(&todo.task)
                .bind(todo.completed)
                .execute(&self.pool)
                .await
                .map_err(|e| sqlx_error_to_todo_error("create", Some(&todo.id), e))?;
            Ok(())
        })
        .await?;

        Ok(todo)
    }

    async fn mark_done(&self, id: &str) -> Result<Todo> {
        tracing::debug!(id, "mark_done");
        with_timeout("mark_done", self.query_timeout, async {
            let row = sqlx::query(&format!(
                "UPDATE todo SET completed = 1 WHERE id = ? RETURNING {TODO_COLUMNS}"
            ))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| sqlx_error_to_todo_error("mark_done", Some(id), e))?;

            match row {
                Some(row) => row_to_todo("mark_done", &row),
                None => Err(TodoError::not_found(id)),
            }
        })
        .await
    }

    async fn health_check(&self) -> Result<()> {
        with_timeout("health_check", self.query_timeout, async {
            sqlx::query("SELECT 1")
                .fetch_one(&self.pool)
                .await
                .map_err(|e| sqlx_error_to_todo_error("health_check", None, e))?;
            Ok(())
        })
        .await
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        tracing::info!("SQLite connections closed");
        Ok(())
    }
}
