use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::Production;

use super::ProductionSource;

/// Loads the dataset from a local JSON file
///
/// The original deployment serves the catalog as a static JSON asset; a
/// local path is its offline equivalent.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ProductionSource for FileSource {
    async fn load(&self) -> AppResult<Vec<Production>> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
