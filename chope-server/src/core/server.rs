//! Server Implementation
//!
//! HTTP 服务器启动和管理

use crate::core::{BackgroundTasks, Config, Result, ServerState};
use crate::db::repository::SeatStore;

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (for tests and embedding)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> Result<()> {
        // Create application state if not provided
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };

        // Start background tasks (catalog seeding + expiry sweeper)
        let mut tasks = BackgroundTasks::new();
        state.register_background_tasks(&mut tasks);
        tasks.log_summary();

        let app = crate::api::router(state.clone());

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("🍜 ChopeLah server listening on {}", addr);
        tracing::info!(
            backend = state.store().backend(),
            sweep_interval_secs = self.config.sweep_interval_secs,
            environment = %self.config.environment,
            "Service configuration"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        // Stop background tasks, bounded by the shutdown timeout
        let shutdown_timeout = self.config.shutdown_timeout();
        if tokio::time::timeout(shutdown_timeout, tasks.shutdown())
            .await
            .is_err()
        {
            tracing::warn!(
                "Background tasks did not stop within {}ms",
                shutdown_timeout.as_millis()
            );
        }

        Ok(())
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutting down...");
}
