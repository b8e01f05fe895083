use async_trait::async_trait;
use crate::types::ResourceRow;
use crate::Result;

#[async_trait]
pub trait ResourceFeed: Send + Sync {
    /// Name of the backend, used in logs
    fn name(&self) -> &str;

    /// Fetch up to `limit` rows flagged `new`, newest first
    async fn fetch_new(&self, limit: usize) -> Result<Vec<ResourceRow>>;
}
