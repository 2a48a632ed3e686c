//! Dataset sources.
//!
//! Pluggable loaders for the production catalog. The dashboard performs
//! exactly one load at startup; implementations fetch the full catalog or
//! fail as a unit (a single malformed entry rejects the whole load at the
//! deserialization boundary).

use std::collections::HashSet;

use crate::error::AppResult;
use crate::models::Production;

pub mod demo;
pub mod file;
pub mod http;

pub use demo::DemoSource;
pub use file::FileSource;
pub use http::HttpSource;

/// A source for the production dataset
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ProductionSource: Send + Sync {
    /// Loads the complete production list
    async fn load(&self) -> AppResult<Vec<Production>>;

    /// Human-readable description of where the data comes from, for logs
    /// and error messages
    fn describe(&self) -> String;
}

/// Loads the catalog from `source` and normalizes it for display
///
/// Normalization drops entries whose title was already seen: titles are the
/// identity key for watched state and render identity, so a duplicate would
/// make both ambiguous. The first occurrence wins.
pub async fn load_catalog(source: &dyn ProductionSource) -> AppResult<Vec<Production>> {
    let productions = source.load().await?;
    tracing::info!(
        count = productions.len(),
        source = %source.describe(),
        "catalog loaded"
    );
    Ok(dedup_by_title(productions))
}

fn dedup_by_title(productions: Vec<Production>) -> Vec<Production> {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(productions.len());
    for production in productions {
        if seen.insert(production.title.clone()) {
            unique.push(production);
        } else {
            tracing::warn!(title = %production.title, "duplicate production title, keeping first");
        }
    }
    unique
}
