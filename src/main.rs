#![warn(clippy::pedantic, clippy::all, clippy::nursery)]
#![allow(clippy::single_match_else)]

use crate::{
    config::RuntimeConfiguration,
    routes::{
        health::get_health,
        index::{get_index_route, not_found},
        portal::{get_portal, internal_post_lookup, post_portal},
    },
    state::PortalState,
    verify::HttpVerifyClient,
};
use axum::{
    Router,
    handler::HandlerWithoutStateExt,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[macro_use]
extern crate tracing;

mod backend;
mod components;
mod config;
mod error;
mod lookup;
mod maud_conveniences;
mod routes;
mod state;
mod verify;

#[cfg(test)]
mod test_support;

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    warn!("signal received, starting graceful shutdown");
}

pub fn router(state: PortalState) -> Router {
    // anything that isn't a page comes from the assets dir (logos, certificate template)
    let assets = ServeDir::new(&state.config().server_config().assets_dir)
        .not_found_service(not_found.into_service());

    Router::new()
        .route("/", get(get_index_route))
        .route("/portal", get(get_portal).post(post_portal))
        .route("/internal/portal/lookup", post(internal_post_lookup))
        .route("/health", get(get_health))
        .fallback_service(assets)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    let dotenv = dotenvy::dotenv();

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish(),
    )
    .expect("unable to set tracing subscriber");

    info!("`tracing` online");
    if let Err(e) = dotenv {
        debug!(?e, "no .env loaded, using process environment only");
    }

    let config =
        RuntimeConfiguration::new().unwrap_or_else(|e| panic!("unable to create config: {e}"));
    let verifier = HttpVerifyClient::new().expect("unable to create verify client");
    if config.backend_origin().is_same_origin() {
        info!(
            public_origin = config.public_origin(),
            "backend shares the portal's public origin"
        );
    } else {
        info!(origin = config.backend_origin().as_str(), "using backend origin");
    }

    let server_ip = config.server_config().address;
    let state = PortalState::new(config, Arc::new(verifier));
    let app = router(state);

    let listener = TcpListener::bind(server_ip)
        .await
        .expect("unable to listen on server ip");

    info!(?server_ip, "Listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("unable to serve app");
}
