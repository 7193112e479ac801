//! Todo HTTP server
//!
//! Builds the axum router over a [`TodoStore`] and runs it with graceful
//! shutdown: on the shutdown signal the store is closed first, then in-flight
//! requests are drained within a bounded deadline.

use axum::{
    error_handling::HandleErrorLayer,
    middleware,
    routing::{get, post},
    BoxError, Router,
};
use hyper_util::{
    rt::{TokioExecutor, TokioIo},
    server::conn::auto::Builder,
    service::TowerToHyperService,
};
use std::{future::Future, net::SocketAddr, sync::Arc, time::Duration};
use thiserror::Error;
use todo_core::{TodoError, TodoStore};
use tokio::{
    net::{TcpListener, TcpStream},
    task::JoinSet,
};
use tokio_util::sync::CancellationToken;
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tracing::{debug, error, info, warn};

use crate::{error::ApiError, handlers, request_logger::request_logging_middleware};

/// Back-off after a failed `accept`, e.g. when out of file descriptors
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Shared state handed to every handler
pub struct AppState<S> {
    pub store: Arc<S>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

/// Server tuning knobs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerOptions {
    /// Upper bound for a single request, answered like a store timeout on expiry
    pub request_timeout: Duration,
    /// How long in-flight requests may drain after the shutdown signal
    pub shutdown_timeout: Duration,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            shutdown_timeout: Duration::from_secs(5),
        }
    }
}

/// Server errors
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid address '{addr}': {reason}")]
    InvalidAddress { addr: String, reason: String },
}

/// HTTP server over any todo store
pub struct TodoServer<S> {
    state: AppState<S>,
    options: ServerOptions,
}

impl<S: TodoStore + 'static> TodoServer<S> {
    /// Create a server with default options
    pub fn new(store: Arc<S>) -> Self {
        Self {
            state: AppState { store },
            options: ServerOptions::default(),
        }
    }

    /// Replace the server options
    pub fn with_options(mut self, options: ServerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ServerOptions {
        &self.options
    }

    /// Create the router with all endpoints
    pub fn router(&self) -> Router {
        let request_timeout = self.options.request_timeout;

        Router::new()
            .route("/todos", get(handlers::list_todos::<S>))
            .route("/todo", post(handlers::create_todo::<S>))
            .route(
                "/todo/:id",
                get(handlers::get_todo::<S>).patch(handlers::mark_todo_done::<S>),
            )
            .route("/health", get(handlers::health_handler::<S>))
            .layer(
                ServiceBuilder::new()
                    .layer(HandleErrorLayer::new(move |err: BoxError| async move {
                        ApiError::from(request_error(err, request_timeout))
                    }))
                    .layer(TimeoutLayer::new(request_timeout)),
            )
            .layer(middleware::from_fn(request_logging_middleware))
            .with_state(self.state.clone())
    }

    /// Serve on `addr` until Ctrl+C or SIGTERM
    pub async fn serve(self, addr: &str) -> Result<(), ServerError> {
        self.serve_with_shutdown(addr, shutdown_signal()).await
    }

    /// Serve on `addr` until `signal` resolves
    pub async fn serve_with_shutdown<F>(self, addr: &str, signal: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let socket_addr = addr
            .parse::<SocketAddr>()
            .map_err(|e| ServerError::InvalidAddress {
                addr: addr.to_string(),
                reason: e.to_string(),
            })?;

        let listener = TcpListener::bind(socket_addr).await?;
        self.run(listener, signal).await
    }

    /// Serve on an already bound listener until `signal` resolves
    ///
    /// Every connection runs in a task owned by this call. On the signal the
    /// listener is dropped and the store closed (errors are logged, not
    /// returned). Connections then get up to
    /// [`ServerOptions::shutdown_timeout`] to finish their in-flight
    /// requests; whatever is still running at the deadline is aborted
    /// before `run` returns, so no response is written afterwards.
    pub async fn run<F>(self, listener: TcpListener, signal: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let store = Arc::clone(&self.state.store);
        let shutdown_timeout = self.options.shutdown_timeout;
        let app = self.router();

        if let Ok(local_addr) = listener.local_addr() {
            info!(%local_addr, "Starting todo server");
        }

        let drain = CancellationToken::new();
        let mut connections = JoinSet::new();
        tokio::pin!(signal);

        loop {
            tokio::select! {
                _ = &mut signal => {
                    info!("Shutdown signal received");
                    break;
                }
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        debug!(%peer, "Accepted connection");
                        connections.spawn(serve_connection(stream, app.clone(), drain.clone()));
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to accept connection");
                        tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                    }
                },
                Some(_) = connections.join_next(), if !connections.is_empty() => {}
            }
        }

        drop(listener);

        if let Err(e) = store.close().await {
            error!(error = %e, "Failed to close store during shutdown");
        } else {
            info!("Store closed");
        }

        drain.cancel();

        let drained = tokio::time::timeout(shutdown_timeout, async {
            while connections.join_next().await.is_some() {}
        })
        .await;

        if drained.is_err() {
            warn!(
                timeout_ms = shutdown_timeout.as_millis() as u64,
                remaining = connections.len(),
                "In-flight requests did not drain in time, aborting them"
            );
            connections.abort_all();
            while connections.join_next().await.is_some() {}
        }

        info!("Server shutdown complete");
        Ok(())
    }
}

/// Drive one HTTP connection until it closes or the drain token fires
///
/// On drain the connection finishes its in-flight request and closes
/// instead of waiting for the next one.
async fn serve_connection(stream: TcpStream, app: Router, drain: CancellationToken) {
    let builder = Builder::new(TokioExecutor::new());
    let conn = builder.serve_connection(TokioIo::new(stream), TowerToHyperService::new(app));
    tokio::pin!(conn);

    let mut draining = false;
    loop {
        tokio::select! {
            result = conn.as_mut() => {
                if let Err(e) = result {
                    debug!(error = %e, "Connection closed with error");
                }
                break;
            }
            _ = drain.cancelled(), if !draining => {
                draining = true;
                conn.as_mut().graceful_shutdown();
            }
        }
    }
}

/// Translate a middleware failure into the error the client sees
fn request_error(err: BoxError, request_timeout: Duration) -> TodoError {
    if err.is::<tower::timeout::error::Elapsed>() {
        TodoError::timeout("request", request_timeout)
    } else {
        TodoError::Internal(format!("Unhandled middleware error: {err}"))
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
///
/// A handler that cannot be installed is logged and never fires, so the
/// other one still works.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting shutdown");
        }
    }
}
