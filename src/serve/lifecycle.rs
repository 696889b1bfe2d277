//! Server lifecycle: binding and Ctrl+C shutdown.
//!
//! - `SHUTDOWN`: has shutdown been requested?
//! - `SERVER`: the bound server, unblocked on Ctrl+C

use super::ServeError;
use crate::log;
use std::{
    net::{IpAddr, SocketAddr},
    sync::{
        Arc, OnceLock,
        atomic::{AtomicBool, Ordering},
    },
};
use tiny_http::Server;

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

static SERVER: OnceLock<Arc<Server>> = OnceLock::new();

/// Setup the global Ctrl+C handler. Call once at program start.
///
/// Before [`register_server`] the process exits right away; afterwards the
/// server is unblocked so the request loop can return.
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        SHUTDOWN.store(true, Ordering::SeqCst);

        if let Some(server) = SERVER.get() {
            log!("serve"; "shutting down...");
            server.unblock();
        } else {
            std::process::exit(0);
        }
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Register the server for graceful shutdown.
pub fn register_server(server: Arc<Server>) {
    let _ = SERVER.set(server);
}

/// Check if shutdown has been requested.
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

/// Bind to the configured interface and port. A busy port is an error.
pub fn bind(interface: IpAddr, port: u16) -> Result<(Server, SocketAddr), ServeError> {
    let addr = SocketAddr::new(interface, port);
    let server = Server::http(addr).map_err(|source| ServeError::Bind { addr, source })?;

    // Port 0 asks the OS for a free port
    let bound = server.server_addr().to_ip().unwrap_or(addr);
    Ok((server, bound))
}
