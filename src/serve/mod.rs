//! Static preview server for the export directory.
//!
//! Serves files as they will be deployed, with the feed paths answered as
//! Atom the way the `_headers` rules make the production host do.

mod lifecycle;
mod path;
mod response;

pub use lifecycle::setup_shutdown_handler;
use path::Router;

use crate::{
    config::SiteConfig,
    debug,
    generator::feed::feed_url_paths,
    log,
};
use anyhow::{Context, Result};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use thiserror::Error;
use tiny_http::{Request, Server};

/// Preview failures with a dedicated diagnostic.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("output directory `{}` not found, run the site build first", .0.display())]
    OutputMissing(PathBuf),

    #[error("failed to bind {addr}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

/// Serve the export directory until Ctrl+C.
pub fn serve(config: &SiteConfig) -> Result<()> {
    let output_dir = config.output_dir();
    if !output_dir.is_dir() {
        return Err(ServeError::OutputMissing(output_dir.to_path_buf()).into());
    }

    let router = Arc::new(
        Router::new(output_dir)
            .with_context(|| format!("Failed to resolve {}", output_dir.display()))?,
    );

    let (server, addr) = lifecycle::bind(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    lifecycle::register_server(Arc::clone(&server));

    log!("serve"; "{} at http://{}", router.root().display(), addr);
    log!("serve"; "feeds (application/atom+xml):");
    for path in feed_url_paths() {
        log!("serve"; "  http://{}{}", addr, path);
    }

    run_request_loop(&server, &router, config.serve.workers)?;
    log!("serve"; "stopped");
    Ok(())
}

fn run_request_loop(server: &Server, router: &Arc<Router>, workers: usize) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .thread_name(|i| format!("preview-{i}"))
        .build()
        .context("failed to create request thread pool")?;

    for request in server.incoming_requests() {
        if lifecycle::is_shutdown() {
            break;
        }
        let router = Arc::clone(router);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &router) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    Ok(())
}

/// Handle a single HTTP request.
fn handle_request(request: Request, router: &Router) -> Result<()> {
    let route = router.resolve(request.url());
    debug!("serve"; "{} {} -> {}", request.method(), request.url(), route);
    response::respond(request, route)
}
