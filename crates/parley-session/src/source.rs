use async_trait::async_trait;
use parley_core::{ParleyError, ParleyResult};
use parley_intents::IntentCatalog;
use std::path::PathBuf;
use tracing::warn;

/// Where new sessions get their intent catalog from.
///
/// Each session owns its own copy, so `load` is called once per session creation.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load(&self) -> ParleyResult<IntentCatalog>;

    /// Short description used in logs.
    fn describe(&self) -> String;
}

/// Reads the definition file on every load, so edits apply to new sessions.
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalog {
    async fn load(&self) -> ParleyResult<IntentCatalog> {
        let data = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "Failed to read catalog");
            ParleyError::Io(e)
        })?;
        IntentCatalog::from_json_str(&data)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// A catalog parsed once up front and cloned for every session.
pub struct StaticCatalog {
    catalog: IntentCatalog,
}

impl StaticCatalog {
    pub fn new(catalog: IntentCatalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn load(&self) -> ParleyResult<IntentCatalog> {
        Ok(self.catalog.clone())
    }

    fn describe(&self) -> String {
        format!("static ({} intents)", self.catalog.len())
    }
}

/// The catalog compiled into `parley-intents`.
pub struct BundledCatalog;

#[async_trait]
impl CatalogSource for BundledCatalog {
    async fn load(&self) -> ParleyResult<IntentCatalog> {
        IntentCatalog::bundled()
    }

    fn describe(&self) -> String {
        "bundled".to_string()
    }
}
