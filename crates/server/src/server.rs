//! The [`Firetest`] server handle.
//!
//! A `Firetest` owns one shared [`Executor`] and, once started, a background
//! task serving the REST router on a loopback port. Tests seed or inspect the
//! tree through [`Firetest::executor`] and talk HTTP through
//! [`Firetest::url`].

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use firetest_executor::Executor;

use crate::config::ServerConfig;
use crate::routes::router;
use crate::ServerError;

/// A running listener and the means to stop it.
#[derive(Debug)]
struct Running {
    addr: SocketAddr,
    url: String,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

/// In-process REST emulator.
///
/// # Example
///
/// ```no_run
/// use firetest_server::Firetest;
///
/// # async fn demo() -> Result<(), firetest_server::ServerError> {
/// let mut ft = Firetest::new();
/// ft.start().await?;
/// println!("serving at {}", ft.url().unwrap_or_default());
/// ft.close().await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Firetest {
    config: ServerConfig,
    executor: Executor,
    running: Option<Running>,
}

impl Default for Firetest {
    fn default() -> Self {
        Firetest::new()
    }
}

impl Firetest {
    /// Server with the default configuration and an empty tree.
    pub fn new() -> Self {
        Firetest::with_config(ServerConfig::default())
    }

    /// Server with `config` and an empty tree.
    pub fn with_config(config: ServerConfig) -> Self {
        Firetest::with_executor(config, Executor::new())
    }

    /// Server with `config` serving an existing store.
    pub fn with_executor(config: ServerConfig, executor: Executor) -> Self {
        Self {
            config,
            executor,
            running: None,
        }
    }

    /// Bind the listener and start serving in the background.
    ///
    /// The configured address is tried first, then the fallback address.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::AlreadyStarted`] if the server is running and
    /// [`ServerError::Bind`] if no address could be bound.
    pub async fn start(&mut self) -> Result<(), ServerError> {
        if let Some(running) = &self.running {
            return Err(ServerError::AlreadyStarted {
                url: running.url.clone(),
            });
        }

        let listener = self.bind().await?;
        let addr = listener.local_addr()?;
        let url = format!("http://{}", addr);

        let (shutdown, signal) = oneshot::channel::<()>();
        let app = router(self.executor.clone());
        let task = tokio::spawn(async move {
            let serve = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = signal.await;
            });
            if let Err(e) = serve.await {
                error!(target: "firetest::server", error = %e, "error serving");
            }
        });

        info!(target: "firetest::server", %url, "listening");
        self.running = Some(Running {
            addr,
            url,
            shutdown,
            task,
        });
        Ok(())
    }

    async fn bind(&self) -> Result<TcpListener, ServerError> {
        match TcpListener::bind(self.config.bind).await {
            Ok(listener) => Ok(listener),
            Err(primary) => {
                let Some(fallback) = self.config.fallback_bind else {
                    return Err(ServerError::Bind {
                        addr: self.config.bind,
                        reason: primary.to_string(),
                    });
                };
                warn!(
                    target: "firetest::server",
                    addr = %self.config.bind,
                    error = %primary,
                    "primary bind failed, trying fallback"
                );
                TcpListener::bind(fallback)
                    .await
                    .map_err(|e| ServerError::Bind {
                        addr: fallback,
                        reason: e.to_string(),
                    })
            }
        }
    }

    /// Base URL (`http://<addr>`) while running.
    pub fn url(&self) -> Option<&str> {
        self.running.as_ref().map(|r| r.url.as_str())
    }

    /// Bound address while running.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.running.as_ref().map(|r| r.addr)
    }

    /// True between `start` and `close`.
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// The shared store served by this instance.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Active configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Stop accepting connections and wait for the listener to close.
    ///
    /// The tree is kept; a later `start` serves it again on a new port.
    /// Closing a server that is not running does nothing.
    pub async fn close(&mut self) {
        let Some(running) = self.running.take() else {
            return;
        };
        let _ = running.shutdown.send(());
        if let Err(e) = running.task.await {
            error!(target: "firetest::server", error = %e, "serve task failed");
        }
        info!(target: "firetest::server", url = %running.url, "closed");
    }

    /// Serve until ctrl-c, then close.
    pub async fn run_until_ctrl_c(&mut self) -> Result<(), ServerError> {
        self.start().await?;
        tokio::signal::ctrl_c().await?;
        self.close().await;
        Ok(())
    }
}

impl Drop for Firetest {
    fn drop(&mut self) {
        if let Some(running) = self.running.take() {
            let _ = running.shutdown.send(());
        }
    }
}
