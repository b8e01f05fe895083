use recall_core::{IncomingResource, ResourceFeed};

/// Maximum number of resources shown on the dashboard.
pub const FEED_LIMIT: usize = 6;

/// Load the dashboard feed. Never fails: an unreachable or empty store
/// yields the single placeholder resource.
pub async fn load_resources(feed: &dyn ResourceFeed) -> Vec<IncomingResource> {
    match feed.fetch_new(FEED_LIMIT).await {
        Ok(rows) if !rows.is_empty() => {
            tracing::info!("📥 Loaded {} new resources from {}", rows.len(), feed.name());
            rows.into_iter()
                .take(FEED_LIMIT)
                .map(IncomingResource::from_row)
                .collect()
        }
        Ok(_) => {
            tracing::warn!("Feed {} returned no new resources, using placeholder", feed.name());
            vec![IncomingResource::placeholder()]
        }
        Err(e) => {
            tracing::warn!("Feed {} unavailable, using placeholder: {}", feed.name(), e);
            vec![IncomingResource::placeholder()]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::MemoryFeed;
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use recall_core::{Error, ResourceKind, ResourceRow, Result};

    struct FailingFeed;

    #[async_trait]
    impl ResourceFeed for FailingFeed {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch_new(&self, _limit: usize) -> Result<Vec<ResourceRow>> {
            Err(Error::Feed("connection refused".to_string()))
        }
    }

    fn row(id: &str, minutes_ago: i64, source: Option<&str>) -> ResourceRow {
        ResourceRow {
            id: id.to_string(),
            kind: ResourceKind::Video,
            title: format!("Talk {}", id),
            source: source.map(str::to_string),
            created_at: Utc::now() - Duration::minutes(minutes_ago),
            content: None,
            url: Some(format!("https://youtu.be/{}", id)),
        }
    }

    #[tokio::test]
    async fn test_empty_feed_yields_placeholder() {
        let feed = MemoryFeed::new();
        let resources = load_resources(&feed).await;
        assert_eq!(resources, vec![IncomingResource::placeholder()]);
    }

    #[tokio::test]
    async fn test_failing_feed_yields_placeholder() {
        let resources = load_resources(&FailingFeed).await;
        assert_eq!(resources, vec![IncomingResource::placeholder()]);
    }

    #[tokio::test]
    async fn test_rows_are_mapped_newest_first() {
        let feed = MemoryFeed::with_rows(vec![
            row("b", 20, Some("TED")),
            row("a", 5, None),
            row("c", 40, Some("BBC")),
        ])
        .await;

        let resources = load_resources(&feed).await;
        let ids: Vec<_> = resources.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(resources[0].source, "Unknown Source");
        assert_eq!(resources[1].source, "TED");
    }

    #[tokio::test]
    async fn test_feed_is_capped_at_limit() {
        let feed = MemoryFeed::with_rows((0..9).map(|i| row(&i.to_string(), i, None))).await;
        let resources = load_resources(&feed).await;
        assert_eq!(resources.len(), FEED_LIMIT);
    }
}
