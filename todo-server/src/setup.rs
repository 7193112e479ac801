use anyhow::{Context, Result};
use database::{SqliteTodoStore, StoreOptions};
use http_api::{ServerOptions, TodoServer};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::Config;

/// Pool settings derived from the database section
pub fn store_options(config: &Config) -> StoreOptions {
    let db = &config.database;
    StoreOptions {
        max_connections: db.max_connections,
        min_connections: db.min_connections,
        max_lifetime: (db.max_lifetime_secs > 0).then(|| Duration::from_secs(db.max_lifetime_secs)),
        acquire_timeout: Duration::from_secs(db.acquire_timeout_secs),
        query_timeout: config.query_timeout(),
    }
}

/// Server settings derived from the server section
pub fn server_options(config: &Config) -> ServerOptions {
    ServerOptions {
        request_timeout: config.request_timeout(),
        shutdown_timeout: config.shutdown_timeout(),
    }
}

/// Open the todo store and bootstrap its table
pub async fn create_store(config: &Config) -> Result<Arc<SqliteTodoStore>> {
    let database_url = config.database_url();
    info!("Initializing SQLite store at: {}", database_url);

    let store = SqliteTodoStore::connect(database_url, store_options(config))
        .await
        .with_context(|| format!("Failed to open SQLite store at {database_url}"))?;

    info!("Running database migrations");
    store
        .migrate()
        .await
        .context("Failed to run database migrations")?;

    info!("Todo store created successfully");
    Ok(Arc::new(store))
}

/// Create and configure the HTTP server
pub fn create_server(store: Arc<SqliteTodoStore>, config: &Config) -> TodoServer<SqliteTodoStore> {
    TodoServer::new(store).with_options(server_options(config))
}

/// Initialize the complete application
pub async fn initialize_app(config: &Config) -> Result<TodoServer<SqliteTodoStore>> {
    info!("Initializing application");

    let store = create_store(config)
        .await
        .context("Failed to create store")?;

    let server = create_server(store, config);

    info!("Application initialized successfully");
    Ok(server)
}

/// Ensure the database directory exists using config
pub fn ensure_database_directory_from_config(config: &Config) -> Result<()> {
    ensure_database_directory(config.database_url())
}

/// Ensure the database directory exists and set secure permissions
///
/// In-memory URLs are left alone.
pub fn ensure_database_directory(database_url: &str) -> Result<()> {
    let Some(db_path) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let db_path = Path::new(db_path);

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating database directory: {}", parent.display());
            std::fs::create_dir_all(parent).context("Failed to create database directory")?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let permissions = std::fs::Permissions::from_mode(0o700);
                std::fs::set_permissions(parent, permissions)
                    .context("Failed to set directory permissions")?;
            }
        }
    }

    if db_path.exists() {
        set_secure_file_permissions(db_path)?;
    }
    Ok(())
}

/// Set secure file permissions (owner-only access on Unix)
fn set_secure_file_permissions(file_path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(file_path, permissions)
            .with_context(|| format!("Failed to set permissions for {}", file_path.display()))?;
        info!("Set secure permissions (0600) for database file: {}", file_path.display());
    }

    #[cfg(not(unix))]
    {
        info!("Database file permissions managed by system: {}", file_path.display());
    }

    Ok(())
}
