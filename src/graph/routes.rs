use super::assets::INDEX_HTML;
use super::data::GraphData;
use super::svg::render_svg;
use crate::api::AnalysisReport;
use crate::insights::{InsightsRequest, SharedProvider, fetch_insights};
use crate::model::AnalysisRecord;
use axum::{
    Json, Router,
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    routing::get,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Application state shared across handlers
pub struct AppState {
    pub graph_data: GraphData,
    pub record: RwLock<AnalysisRecord>,
}

/// Background insights request started alongside the server.
pub struct InsightsJob {
    pub provider: SharedProvider,
    pub timeout: Duration,
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/graph", get(graph_handler))
        .route("/api/graph.svg", get(svg_handler))
        .route("/api/analysis", get(analysis_handler))
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server for graph visualization.
///
/// The analysis is served from the first request on. When `insights` is set,
/// the advisory call runs in the background and is merged into the served
/// record once it resolves; shutting the server down cancels it.
pub async fn serve(
    report: AnalysisReport,
    port: u16,
    open_browser: bool,
    insights: Option<InsightsJob>,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState {
        graph_data: GraphData::from_report(&report),
        record: RwLock::new(report.record()),
    });
    let cancel = CancellationToken::new();

    if let Some(job) = insights {
        spawn_insights(
            Arc::clone(&state),
            job,
            report.insights_request(),
            cancel.clone(),
        );
    }

    let app = router(state);

    let addr = format!("127.0.0.1:{}", port);
    let url = format!("http://{}", addr);

    crate::style::status("Starting svcgraph visualization server...");
    println!("Open in browser: {}", crate::style::url(&url));
    println!("Press Ctrl+C to stop");

    if open_browser {
        if let Err(e) = open::that(&url) {
            crate::style::warning(&format!("Could not open browser: {}", e));
        }
    }

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let shutdown = cancel.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            shutdown.cancel();
        })
        .await?;

    Ok(())
}

/// Fetch insights in the background and merge them into the served record.
///
/// The record stays available throughout; a failed or cancelled request
/// leaves it without insights.
pub fn spawn_insights(
    state: Arc<AppState>,
    job: InsightsJob,
    request: InsightsRequest,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Ok(insights) =
            fetch_insights(job.provider.as_ref(), &request, job.timeout, &cancel).await
        {
            state.record.write().await.merge_insights(insights);
            info!("insights merged into analysis record");
        }
    })
}

async fn index_handler() -> impl IntoResponse {
    Html(INDEX_HTML)
}

async fn graph_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.graph_data.clone())
}

async fn svg_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "image/svg+xml")],
        render_svg(&state.graph_data),
    )
}

async fn analysis_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.record.read().await.clone())
}
