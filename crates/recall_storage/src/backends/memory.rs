use async_trait::async_trait;
use recall_core::{ResourceFeed, ResourceRow, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

pub const STATUS_NEW: &str = "new";

pub struct MemoryStore {
    rows: Vec<(ResourceRow, String)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn insert(&mut self, row: ResourceRow, status: &str) {
        if let Some((existing, existing_status)) = self.rows.iter_mut().find(|(r, _)| r.id == row.id) {
            *existing = row;
            *existing_status = status.to_string();
        } else {
            self.rows.push((row, status.to_string()));
        }
    }

    pub fn fetch_new(&self, limit: usize) -> Vec<ResourceRow> {
        let mut rows = self.rows.iter()
            .filter(|(_, status)| status == STATUS_NEW)
            .map(|(row, _)| row.clone())
            .collect::<Vec<_>>();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.into_iter().take(limit).collect()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// In-process feed, handy for demos and tests.
#[derive(Clone, Default)]
pub struct MemoryFeed {
    store: Arc<RwLock<MemoryStore>>,
}

impl MemoryFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, row: ResourceRow, status: &str) {
        self.store.write().await.insert(row, status);
    }

    pub async fn with_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = ResourceRow>,
    {
        let feed = Self::new();
        for row in rows {
            feed.insert(row, STATUS_NEW).await;
        }
        feed
    }
}

#[async_trait]
impl ResourceFeed for MemoryFeed {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch_new(&self, limit: usize) -> Result<Vec<ResourceRow>> {
        let store = self.store.read().await;
        Ok(store.fetch_new(limit))
    }
}
