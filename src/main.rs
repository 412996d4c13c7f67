use crate::api::HttpRecordApi;
use crate::auth::SessionStore;
use crate::config::Config;
use crate::router::{handle, AppState};
use astra::Server;
use clap::Parser;
use std::sync::Arc;

mod api;
mod auth;
mod config;
mod domain;
mod errors;
mod exports;
mod forms;
mod presentation;
mod report;
mod responses;
mod router;
mod store;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();

    let api = match HttpRecordApi::new(&config.api_base_url, config.request_timeout()) {
        Ok(api) => api,
        Err(e) => {
            log::error!("Cannot use record service at {}: {e}", config.api_base_url);
            std::process::exit(1);
        }
    };

    let addr = config.bind;
    let workers = config.workers;
    log::info!(
        "Starting server at http://{addr} (record service: {})",
        config.api_base_url
    );

    let state = AppState {
        sessions: SessionStore::new(config.session_ttl_secs),
        api: Arc::new(api),
        config,
    };

    let server = Server::bind(&addr).max_workers(workers);

    let result = server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => {
            if err.status() >= 500 {
                log::error!("request failed: {err}");
            }
            templates::html_error_response(err)
        }
    });

    if let Err(e) = result {
        log::error!("Server ended with error: {e}");
    }

    log::info!("Server shut down cleanly.");
}
