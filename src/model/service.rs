use crate::fs::FileSystem;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CATEGORY: &str = "service";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to read services file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse services: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Service at position {0} has an empty id")]
    EmptyId(usize),
    #[error("Duplicate service id: {0}")]
    DuplicateId(String),
}

/// A microservice as declared by the service-management layer.
///
/// `depends_on` lists the ids of services this one requires, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    pub category: String,
    pub depends_on: Vec<String>,
}

impl Service {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            category: DEFAULT_CATEGORY.to_string(),
            depends_on: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn depends_on<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on = deps.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDocument {
    List(Vec<RawService>),
    Wrapped { services: Vec<RawService> },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawService {
    id: Option<String>,
    name: Option<String>,
    category: Option<String>,
    #[serde(default, alias = "depends_on", alias = "dependencies")]
    depends_on: Option<Vec<String>>,
}

/// Parse service records from JSON, either a bare array or `{"services": [...]}`.
///
/// Optional fields are filled in here so downstream stages never re-check them.
pub fn parse_services(json: &str) -> Result<Vec<Service>, IngestError> {
    let raw = match serde_json::from_str::<RawDocument>(json)? {
        RawDocument::List(list) => list,
        RawDocument::Wrapped { services } => services,
    };

    let mut seen = HashSet::new();
    let mut services = Vec::with_capacity(raw.len());

    for (position, record) in raw.into_iter().enumerate() {
        let id = record.id.as_deref().map(str::trim).unwrap_or_default();
        if id.is_empty() {
            return Err(IngestError::EmptyId(position));
        }
        if !seen.insert(id.to_string()) {
            return Err(IngestError::DuplicateId(id.to_string()));
        }

        let name = record
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| id.to_string());
        let category = record
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
        let depends_on = record
            .depends_on
            .unwrap_or_default()
            .into_iter()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .collect();

        services.push(Service {
            id: id.to_string(),
            name,
            category,
            depends_on,
        });
    }

    Ok(services)
}

pub fn load_services(path: &Path, fs: &dyn FileSystem) -> Result<Vec<Service>, IngestError> {
    let content = fs.read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_services(&content)
}
