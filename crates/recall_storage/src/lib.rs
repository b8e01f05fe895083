use recall_core::{Config, Error, ResourceFeed, Result};
use std::sync::Arc;

pub mod backends;
pub mod feed;

pub use backends::*;
pub use feed::{load_resources, FEED_LIMIT};

/// Build a feed backend by name (`supabase` or `memory`).
pub fn create_feed(kind: &str, config: &Config) -> Result<Arc<dyn ResourceFeed>> {
    match kind {
        "supabase" => {
            if config.has_placeholder_store() {
                tracing::warn!("Supabase credentials are not configured; the feed will fall back to the placeholder");
            }
            Ok(Arc::new(SupabaseFeed::new(config)?))
        }
        "memory" => Ok(Arc::new(MemoryFeed::new())),
        other => Err(Error::Config(format!("Unknown feed backend: {}", other))),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{create_feed, load_resources};
}
