//! HTTP response handlers.

use super::path::Route;
use crate::{debug, utils::mime::types::PLAIN};
use anyhow::{Result, anyhow};
use std::{fs::File, path::Path};
use tiny_http::{Header, Request, Response, StatusCode};

/// Send the response for a resolved route.
pub fn respond(request: Request, route: Route) -> Result<()> {
    match route {
        Route::File { path, content_type } => respond_file(request, &path, content_type),
        Route::Forbidden => respond_forbidden(request),
        Route::NotFound => respond_not_found(request),
    }
}

/// Stream a file with an explicit content type.
///
/// HEAD requests get the same headers; tiny_http drops the body.
pub fn respond_file(request: Request, path: &Path, content_type: &'static str) -> Result<()> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            debug!("serve"; "cannot open {}: {}", path.display(), e);
            return respond_not_found(request);
        }
    };

    let response = Response::from_file(file).with_header(make_header("Content-Type", content_type)?);
    request.respond(response)?;
    Ok(())
}

pub fn respond_not_found(request: Request) -> Result<()> {
    send_text(request, 404, "404 Not Found")
}

pub fn respond_forbidden(request: Request) -> Result<()> {
    send_text(request, 403, "403 Forbidden")
}

fn send_text(request: Request, status: u16, body: &str) -> Result<()> {
    let response = Response::from_data(body.as_bytes())
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", PLAIN)?);
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &'static str) -> Result<Header> {
    Header::from_bytes(key, value).map_err(|()| anyhow!("invalid header {key}: {value}"))
}
