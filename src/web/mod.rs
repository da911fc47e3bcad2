//! Embedded web dashboard for etsm.
//!
//! Provides a lightweight HTTP server (sync, via `tiny_http`) that serves:
//! - A single-page dashboard with usage, strategy, executive, planning and
//!   analysis panels
//! - JSON API endpoints the page renders client-side
//!
//! Launched via `etsm serve` (default: `http://127.0.0.1:8750`).

mod api;
mod frontend;

use std::io::Cursor;

use anyhow::{Context, Result};
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::config::EtsmConfig;
use crate::generator::DatasetGenerator;
use crate::insight::credential::ApiKey;

type HttpResponse = Response<Cursor<Vec<u8>>>;

/// Everything a request handler may read. Built once at startup.
pub struct DashboardState {
    config: EtsmConfig,
    api_key: Option<ApiKey>,
}

impl DashboardState {
    pub fn new(config: EtsmConfig, api_key: Option<ApiKey>) -> Self {
        Self { config, api_key }
    }

    /// A generator for one request. `?seed=N` wins over the configured
    /// seed; with neither, every request sees fresh data.
    fn generator(&self, url: &str) -> DatasetGenerator {
        let generator = DatasetGenerator::new(self.config.generator.clone());
        match api::parse_seed_param(url) {
            Some(seed) => generator.with_seed(seed),
            None => generator,
        }
    }
}

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the web dashboard server on the given address.
///
/// Blocks the current thread. Handles requests sequentially. A failing
/// handler produces a JSON 500 for that request only.
pub fn serve(addr: &str, config: EtsmConfig, api_key: Option<ApiKey>) -> Result<()> {
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    println!("etsm dashboard running at http://{addr}");
    println!("Press Ctrl+C to stop.\n");

    let url = format!("http://{addr}");
    if let Err(e) = open_browser(&url) {
        log::debug!("{e:#}");
    }

    run(&server, &DashboardState::new(config, api_key));
    Ok(())
}

/// Answer requests from `server` until it shuts down.
pub fn run(server: &Server, state: &DashboardState) {
    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        let body = if matches!(method, Method::Post) {
            let mut buf = String::new();
            if let Err(e) = request.as_reader().read_to_string(&mut buf) {
                log::warn!("failed to read request body for {url}: {e}");
            }
            Some(buf)
        } else {
            None
        };

        let response = match dispatch(state, &method, &url, body.as_deref()) {
            Ok(resp) => resp,
            Err(e) => {
                log::warn!("{method} {url} failed: {e:#}");
                let body = serde_json::json!({ "error": e.to_string() }).to_string();
                json_bytes(body.into_bytes(), 500)
            }
        };

        if let Err(e) = request.respond(response) {
            log::debug!("client went away before response to {url}: {e}");
        }

        log::info!(
            "{} {} {}",
            method,
            url,
            chrono::Local::now().format("%H:%M:%S")
        );
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Dispatch an incoming request to the appropriate handler.
fn dispatch(
    state: &DashboardState,
    method: &Method,
    url: &str,
    body: Option<&str>,
) -> Result<HttpResponse> {
    let path = url.split('?').next().unwrap_or(url);

    match (method, path) {
        (&Method::Get, "/") | (&Method::Get, "/index.html") => Ok(serve_frontend()),

        (&Method::Get, "/api/usage") => api::get_usage(state, url),
        (&Method::Get, "/api/strategies") => api::get_strategies(state, url),
        (&Method::Get, "/api/executives") => api::get_executives(state, url),
        (&Method::Get, "/api/planning") => api::get_planning(state, url),
        (&Method::Get, "/api/overview") => api::get_overview(state, url),
        (&Method::Get, "/api/prompt") => api::get_prompt(state, url),
        (&Method::Get, "/api/health") => api::get_health(state),

        (&Method::Post, "/api/analyze") => api::post_analyze(state, body.unwrap_or("{}")),

        _ => Ok(not_found()),
    }
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Serve the embedded single-page frontend.
fn serve_frontend() -> HttpResponse {
    with_content_type(
        Response::from_data(frontend::INDEX_HTML.as_bytes().to_vec()),
        "text/html; charset=utf-8",
    )
    .with_status_code(StatusCode(200))
}

/// 404 response.
fn not_found() -> HttpResponse {
    json_bytes(br#"{"error": "not found"}"#.to_vec(), 404)
}

/// Raw JSON bytes with a status code.
fn json_bytes(body: Vec<u8>, status: u16) -> HttpResponse {
    with_content_type(Response::from_data(body), "application/json; charset=utf-8")
        .with_status_code(StatusCode(status))
}

fn with_content_type(resp: HttpResponse, value: &str) -> HttpResponse {
    match Header::from_bytes("Content-Type", value) {
        Ok(header) => resp.with_header(header),
        Err(()) => resp,
    }
}

/// Attempt to open a URL in the system default browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}
