// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{collections::HashMap, net::SocketAddr, sync::Arc};

use axum::{routing::get, Router};
use tokio::sync::watch;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::application::chart_renderer::dimension_charts;
use crate::application::demo_repository::DemoDataRepository;
use crate::application::poll_service::{FailurePolicy, LiveCharts, PagePoller};
use crate::domain::page::PageParameters;
use crate::infrastructure::config::{load_demos_config, load_server_config, OnError};
use crate::infrastructure::http_repository::HttpDataRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    dimensions_charts, dimensions_data, dimensions_page, dimensions_redirect, dimensions_stream,
    health_check, index, machine_data, machine_page, machine_redirect, mobile_page,
    mobile_redirect, siteops_data, siteops_page, siteops_redirect, twitter_page, twitter_redirect,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let server_config = load_server_config()?;
    let demos_config = load_demos_config()?;

    // Create repository (infrastructure layer)
    let repository: Arc<dyn DemoDataRepository> =
        Arc::new(HttpDataRepository::new(server_config.upstream.host.clone()));

    // One live chart surface per demo the typed renderer set covers
    let mut live_charts = HashMap::new();
    let dimensions_live = Arc::new(LiveCharts::new("dimensions"));
    live_charts.insert("dimensions".to_string(), dimensions_live.clone());

    // Spawn pollers (application layer), wired to a shared shutdown signal
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    for (name, demo) in &demos_config.demos {
        if !demo.poll {
            continue;
        }
        if name != "dimensions" {
            tracing::warn!("demo {} has polling enabled but no chart set; skipping", name);
            continue;
        }

        let params = PageParameters::from_query(demo.params.as_deref().unwrap_or(""));
        let policy = match demo.on_error {
            OnError::Halt => FailurePolicy::Halt,
            OnError::Retry => FailurePolicy::Retry {
                max_attempts: demo.retry_attempts,
                backoff_seconds: demo.retry_backoff_seconds,
            },
        };

        let poller = PagePoller::new(
            name,
            params,
            dimension_charts(),
            repository.clone(),
            dimensions_live.clone(),
            policy,
            chrono::Utc::now().timestamp_millis(),
        );
        tokio::spawn(poller.run(shutdown_rx.clone()));
    }

    // Create application state
    let state = Arc::new(AppState {
        repository,
        live_charts,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/", get(index))
        // Twitter Demo
        .route("/twitter", get(twitter_redirect))
        .route("/twitter/main", get(twitter_page))
        // Mobile Demo
        .route("/mobile", get(mobile_redirect))
        .route("/mobile/main", get(mobile_page))
        // Ads Dimensions Demo
        .route("/dimensions", get(dimensions_redirect))
        .route("/dimensions/main", get(dimensions_page))
        .route("/dimensions/data", get(dimensions_data))
        .route("/dimensions/charts", get(dimensions_charts))
        .route("/dimensions/stream", get(dimensions_stream))
        // Site Operations Demo
        .route("/siteops", get(siteops_redirect))
        .route("/siteops/main", get(siteops_page))
        .route("/siteops/:endpoint", get(siteops_data))
        // Machine Generated Data Demo
        .route("/machine", get(machine_redirect))
        .route("/machine/main", get(machine_page))
        .route("/machine/data", get(machine_data))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(state);

    // Start server
    let addr: SocketAddr = ([0, 0, 0, 0], server_config.web.port).into();
    println!("Starting demo-dashboards service on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(shutdown_tx))
        .await?;

    Ok(())
}

/// Wait for ctrl-c, then tell every poller to stop before the listener
/// drains.
async fn shutdown_signal(shutdown_tx: watch::Sender<bool>) {
    if tokio::signal::ctrl_c().await.is_err() {
        return;
    }
    tracing::info!("shutdown signal received, stopping pollers");
    let _ = shutdown_tx.send(true);
}
