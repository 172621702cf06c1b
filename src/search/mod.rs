pub mod google;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::errors::GuardiaoError;

pub use google::GoogleSearch;

/// One web-search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchItem {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub snippet: String,
}

/// The web-search capability.
#[async_trait]
pub trait WebSearch: Send + Sync {
    async fn search(&self, query: &str, num: u32) -> Result<Vec<SearchItem>, GuardiaoError>;
}
