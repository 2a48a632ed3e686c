use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::Production;

use super::ProductionSource;

const DEMO_DATA: &str = include_str!("../../data/productions.json");

/// Compiled-in sample catalog, for running the dashboard with no dataset
/// endpoint or file at hand (`--demo`)
pub struct DemoSource;

#[async_trait]
impl ProductionSource for DemoSource {
    async fn load(&self) -> AppResult<Vec<Production>> {
        Ok(serde_json::from_str(DEMO_DATA)?)
    }

    fn describe(&self) -> String {
        "built-in demo dataset".to_string()
    }
}
