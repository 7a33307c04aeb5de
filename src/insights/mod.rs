//! Advisory insights from an LLM-backed provider.
//!
//! Insights enrich an analysis that already exists. Nothing here feeds back
//! into the deterministic result: callers run `analyze` first, hand the result
//! out, and merge insights into the record if and when they arrive.

mod openai;
mod prompt;

pub use openai::OpenAiInsightsProvider;
pub use prompt::{build_prompt, parse_insights};

use crate::model::{AnalysisResult, Hotspot, Insights, Metrics, NodeId, Service};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum InsightsError {
    #[error("Insights provider is not configured: {0}")]
    NotConfigured(String),
    #[error("Insights request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Insights provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Malformed insights response: {0}")]
    Malformed(String),
    #[error("Insights request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Insights request was cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSummary {
    pub id: String,
    pub name: String,
    pub category: String,
    pub depends_on: Vec<String>,
}

/// Payload sent to the advisory function.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsRequest {
    pub metrics: Metrics,
    pub orphaned_nodes: Vec<NodeId>,
    pub hotspots: Vec<Hotspot>,
    pub cycles: Vec<Vec<NodeId>>,
    pub service_summaries: Vec<ServiceSummary>,
}

impl InsightsRequest {
    pub fn from_analysis(result: &AnalysisResult, services: &[Service]) -> Self {
        Self {
            metrics: result.metrics.clone(),
            orphaned_nodes: result.orphaned_nodes.clone(),
            hotspots: result.hotspots.clone(),
            cycles: result.cycles.clone(),
            service_summaries: services
                .iter()
                .map(|s| ServiceSummary {
                    id: s.id.clone(),
                    name: s.name.clone(),
                    category: s.category.clone(),
                    depends_on: s.depends_on.clone(),
                })
                .collect(),
        }
    }
}

#[async_trait]
pub trait InsightsProvider: Send + Sync {
    async fn advise(&self, request: &InsightsRequest) -> Result<Insights, InsightsError>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

pub type SharedProvider = Arc<dyn InsightsProvider>;

/// Ask `provider` for insights, giving up after `timeout` or when `cancel` fires.
pub async fn fetch_insights(
    provider: &dyn InsightsProvider,
    request: &InsightsRequest,
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<Insights, InsightsError> {
    debug!(provider = provider.name(), ?timeout, "requesting insights");

    let outcome = tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(InsightsError::Cancelled),
        response = tokio::time::timeout(timeout, provider.advise(request)) => {
            response.unwrap_or(Err(InsightsError::Timeout(timeout)))
        }
    };

    if let Err(e) = &outcome {
        warn!(provider = provider.name(), error = %e, "insights unavailable");
    }

    outcome
}
