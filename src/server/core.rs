use log::{info, warn};
use tokio::net::TcpListener;
use tokio::signal;

use crate::config::ServerConfig;
use crate::server::routes::build_router;
use crate::server::state::{AppState, StartupError};

pub struct Server {
    listener: TcpListener,
    state: AppState,
    addr: String,
}

impl Server {
    /// Binds the listener and builds shared state. Nothing is served yet.
    pub async fn new(config: &ServerConfig) -> Result<Self, StartupError> {
        let addr = config.listen_addr();
        let state = AppState::from_config(config).await?;

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| StartupError::Bind(addr.clone(), e))?;
        info!("Server bound to {}", addr);

        Ok(Self {
            listener,
            state,
            addr,
        })
    }

    /// Serves requests until Ctrl-C or SIGTERM.
    pub async fn start(self) -> Result<(), StartupError> {
        info!("Starting RAX auth server on {}", self.addr);

        axum::serve(self.listener, build_router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
