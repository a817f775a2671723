// HTTP request handlers
use crate::application::demo_repository::DataQuery;
use crate::domain::data_point::DataPoint;
use crate::domain::page::PageParameters;
use crate::presentation::app_state::AppState;
use crate::presentation::pages;
use axum::{
    Json,
    extract::{Path, Query, RawQuery, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    response::{Html, IntoResponse, Redirect},
};
use futures::StreamExt;
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;
use tokio_stream::wrappers::BroadcastStream;

/// The site-operations endpoints this server forwards to the provider.
const SITEOPS_ENDPOINTS: &[&str] = &[
    "clientData",
    "totalViews",
    "topUrlData",
    "topServer",
    "topIpData",
    "topIpClientData",
    "url404",
    "server404",
    "pageViewTimeData",
    "serverLoad",
];

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn index() -> Html<String> {
    Html(pages::index_page())
}

// Demo roots redirect to their main page.

pub async fn twitter_redirect() -> Redirect {
    Redirect::temporary("/twitter/main")
}

pub async fn mobile_redirect() -> Redirect {
    Redirect::temporary("/mobile/main")
}

pub async fn dimensions_redirect() -> Redirect {
    Redirect::temporary("/dimensions/main")
}

pub async fn siteops_redirect() -> Redirect {
    Redirect::temporary("/siteops/main")
}

pub async fn machine_redirect() -> Redirect {
    Redirect::temporary("/machine/main")
}

pub async fn twitter_page() -> Html<String> {
    Html(pages::demo_page("Twitter Feed Demo", &[]))
}

pub async fn mobile_page() -> Html<String> {
    Html(pages::demo_page("Mobile Demo", &[]))
}

pub async fn siteops_page() -> Html<String> {
    Html(pages::demo_page("Site Operations Demo", SITEOPS_ENDPOINTS))
}

pub async fn machine_page() -> Html<String> {
    Html(pages::demo_page("Machine Generated Data Demo", &["data"]))
}

/// Dimensions page, with the request's query string seeding the form.
pub async fn dimensions_page(RawQuery(query): RawQuery) -> Html<String> {
    let params = PageParameters::from_query(query.as_deref().unwrap_or(""));
    Html(pages::dimensions_page(&params))
}

/// Data-route query, in the provider contract's parameter names.
#[derive(Deserialize)]
pub struct DataRouteQuery {
    pub publisher: Option<String>,
    pub advertiser: Option<String>,
    pub adunit: Option<String>,
    #[serde(rename = "lookbackHours")]
    pub lookback_hours: Option<i64>,
    #[serde(rename = "endTime")]
    pub end_time: Option<i64>,
}

/// Typed data window for the dimensions demo.
pub async fn dimensions_data(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DataRouteQuery>,
) -> Json<Vec<DataPoint>> {
    let data_query = DataQuery {
        publisher: query.publisher,
        advertiser: query.advertiser,
        adunit: query.adunit,
        lookback_hours: query.lookback_hours.unwrap_or(2),
        end_time_ms: query.end_time,
    };

    match state
        .repository
        .fetch_data_points("dimensions", &data_query)
        .await
    {
        Ok(points) => Json(points),
        Err(e) => {
            eprintln!("Error fetching dimensions data: {}", e);
            // Empty window on provider failure
            Json(Vec::new())
        }
    }
}

/// Latest rendered chart tables for the dimensions demo.
pub async fn dimensions_charts(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.live_charts("dimensions") {
        Some(live) => Json(live.snapshot()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Live chart redraws for the dimensions demo, one SSE event per table.
pub async fn dimensions_stream(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let Some(live) = state.live_charts("dimensions") else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let stream = BroadcastStream::new(live.subscribe()).filter_map(|message| async move {
        match message {
            Ok(table) => Event::default()
                .event("chart")
                .json_data(&table)
                .ok()
                .map(Ok::<_, Infallible>),
            // A lagged subscriber just misses redraws; the next one catches up.
            Err(_) => None,
        }
    });

    Sse::new(stream)
        .keep_alive(KeepAlive::default())
        .into_response()
}

/// Passthrough proxy for the enumerated site-operations endpoints.
pub async fn siteops_data(
    Path(endpoint): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    if !SITEOPS_ENDPOINTS.contains(&endpoint.as_str()) {
        return StatusCode::NOT_FOUND.into_response();
    }

    proxy(&state, "siteops", &endpoint, &params).await.into_response()
}

pub async fn machine_data(
    Query(params): Query<Vec<(String, String)>>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    proxy(&state, "machine", "data", &params).await.into_response()
}

async fn proxy(
    state: &AppState,
    demo: &str,
    endpoint: &str,
    params: &[(String, String)],
) -> Json<serde_json::Value> {
    match state.repository.fetch_raw(demo, endpoint, params).await {
        Ok(value) => Json(value),
        Err(e) => {
            eprintln!("Error fetching {}/{}: {}", demo, endpoint, e);
            // Empty payload on provider failure
            Json(serde_json::json!([]))
        }
    }
}
