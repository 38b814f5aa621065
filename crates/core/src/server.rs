//! Server orchestrator: binds the listener and owns its lifecycle.

use std::net::TcpListener;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crate::error::{HttpotError, Result};
use crate::protocol::DEFAULT_AGENT;
use crate::router::Router;
use crate::transport;

/// Server-level configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Identity advertised in the `Server` header of responses the server
    /// synthesizes itself (the `500` on a handler fault). Handler-built
    /// responses carry whatever identity their `ResponseHeader` was
    /// constructed with.
    pub server_agent: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_agent: DEFAULT_AGENT.to_string(),
        }
    }
}

/// One-shot request server.
///
/// Takes a fully populated [`Router`] by value, so the route table cannot
/// change once serving begins. Each accepted connection carries exactly
/// one request and is closed after the response is written.
///
/// ```no_run
/// use httpot::{Router, Server, json::json};
///
/// let mut router = Router::new();
/// router.add_route("GET", "/status", |_| Ok(json(&serde_json::json!({"ok": true}), 200)?));
///
/// let mut server = Server::new("127.0.0.1:1234", router);
/// server.start().expect("bind");
/// ```
pub struct Server {
    router: Arc<Router>,
    running: Arc<AtomicBool>,
    bind_addr: String,
    config: Arc<ServerConfig>,
}

impl Server {
    pub fn new(bind_addr: &str, router: Router) -> Self {
        Self::with_config(bind_addr, router, ServerConfig::default())
    }

    /// Create a server with a custom configuration.
    pub fn with_config(bind_addr: &str, router: Router, config: ServerConfig) -> Self {
        Self {
            router: Arc::new(router),
            running: Arc::new(AtomicBool::new(false)),
            bind_addr: bind_addr.to_string(),
            config: Arc::new(config),
        }
    }

    /// Bind the listener and spawn the accept loop.
    pub fn start(&mut self) -> Result<()> {
        if self.running.load(Ordering::SeqCst) {
            return Err(HttpotError::AlreadyRunning);
        }

        let listener = TcpListener::bind(&self.bind_addr)?;
        listener.set_nonblocking(true)?;

        self.running.store(true, Ordering::SeqCst);

        let router = self.router.clone();
        let config = self.config.clone();
        let running = self.running.clone();

        tracing::info!(addr = %self.bind_addr, "server listening");

        thread::spawn(move || {
            transport::accept_loop(listener, router, config, running);
        });

        Ok(())
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        tracing::info!("server stopping");
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}
