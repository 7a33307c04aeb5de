mod analyze;
mod graph;
mod init;

pub use analyze::cmd_analyze;
pub use graph::cmd_graph;
pub use init::cmd_init;

use crate::config::{Config, InsightsConfig};
use crate::insights::OpenAiInsightsProvider;
use crate::style;
use std::path::Path;

/// Shared context for command execution, reducing boilerplate across commands.
pub struct CommandContext {
    pub config: Config,
}

impl CommandContext {
    /// Load `.svcgraph.toml` from `dir`, falling back to defaults when absent.
    /// Returns Err(exit_code) if the file exists but is invalid.
    pub fn new(dir: &Path) -> Result<Self, i32> {
        match Config::load(dir) {
            Ok(config) => Ok(Self { config }),
            Err(e) => {
                style::error(&format!("Failed to load config: {}", e));
                Err(1)
            }
        }
    }
}

/// Build the insights provider, or explain why insights are skipped.
fn insights_provider(config: &InsightsConfig) -> Option<OpenAiInsightsProvider> {
    match OpenAiInsightsProvider::new(config) {
        Ok(provider) => Some(provider),
        Err(e) => {
            style::warning(&format!("{}. Continuing without insights.", e));
            None
        }
    }
}

fn runtime() -> Result<tokio::runtime::Runtime, i32> {
    tokio::runtime::Runtime::new().map_err(|e| {
        style::error(&format!("Failed to start async runtime: {}", e));
        1
    })
}
