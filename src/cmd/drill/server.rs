// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::PathBuf;
use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::signal::ctrl_c;
use tokio::time::sleep;

use crate::cmd::drill::get::get_handler;
use crate::cmd::drill::get::state_handler;
use crate::cmd::drill::post::post_handler;
use crate::cmd::drill::state::ServerState;
use crate::cmd::drill::upload::upload_handler;
use crate::deck_file::load_deck;
use crate::error::Fallible;
use crate::ingest::HeaderRule;
use crate::session::Session;

/// Largest accepted upload, in bytes.
const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

pub struct DrillOptions {
    /// A spreadsheet to load before the server starts.
    pub file: Option<PathBuf>,
    pub host: String,
    pub port: u16,
    pub open_browser: bool,
    pub rule: HeaderRule,
}

pub async fn start_server(options: DrillOptions) -> Fallible<()> {
    let mut session = Session::new();
    if let Some(file) = &options.file {
        let token = session.begin_ingest();
        let deck = load_deck(file, &options.rule)?;
        session.finish_ingest(token, Ok(deck));
    }

    let state = ServerState::new(options.rule, session);
    let app = Router::new();
    let app = app.route("/", get(get_handler));
    let app = app.route("/", post(post_handler));
    let app = app.route("/upload", post(upload_handler));
    let app = app.route("/api/state", get(state_handler));
    let app = app.route("/script.js", get(script));
    let app = app.route("/style.css", get(stylesheet));
    let app = app.fallback(not_found_handler);
    let app = app.layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES));
    let app = app.with_state(state);
    let bind = format!("{}:{}", options.host, options.port);

    if options.open_browser {
        // Open the browser once the server accepts connections.
        let url = format!("http://{bind}/");
        let probe = bind.clone();
        tokio::spawn(async move {
            loop {
                if let Ok(stream) = TcpStream::connect(&probe).await {
                    drop(stream);
                    break;
                }
                sleep(Duration::from_millis(1)).await;
            }
            if let Err(e) = open::that(&url) {
                log::error!("Failed to open {url}: {e}");
            }
        });
    }

    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(&bind).await?;
    println!("Serving flashcards on http://{bind}/");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::debug!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}

async fn script() -> (StatusCode, [(HeaderName, &'static str); 1], &'static str) {
    (
        StatusCode::OK,
        [(CONTENT_TYPE, "text/javascript")],
        include_str!("script.js"),
    )
}

async fn stylesheet() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, "public, max-age=604800, immutable"),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}
