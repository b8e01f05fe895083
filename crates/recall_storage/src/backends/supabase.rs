use async_trait::async_trait;
use recall_core::{Config, Error, ResourceFeed, ResourceRow, Result};
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use url::Url;

pub const TABLE: &str = "incoming_resources";
const COLUMNS: &str = "id,type,title,source,created_at,content,url";

/// Reads captured resources from a Supabase (PostgREST) table.
pub struct SupabaseFeed {
    client: Client,
    endpoint: Url,
    anon_key: String,
}

impl fmt::Debug for SupabaseFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseFeed")
            .field("client", &"<reqwest::Client>")
            .field("endpoint", &self.endpoint.as_str())
            .field("anon_key", &"<redacted>")
            .finish()
    }
}

impl SupabaseFeed {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: table_endpoint(&config.supabase_url)?,
            anon_key: config.supabase_anon_key.clone(),
        })
    }

    pub fn query_url(&self, limit: usize) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("select", COLUMNS)
            .append_pair("status", "eq.new")
            .append_pair("order", "created_at.desc")
            .append_pair("limit", &limit.to_string());
        url
    }
}

fn table_endpoint(base: &str) -> Result<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| Error::Config(format!("Invalid Supabase URL '{}': {}", base, e)))?;
    if url.cannot_be_a_base() {
        return Err(Error::Config(format!("Invalid Supabase URL '{}'", base)));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.join(&format!("rest/v1/{}", TABLE))
        .map_err(|e| Error::Config(format!("Invalid Supabase URL '{}': {}", base, e)))
}

#[async_trait]
impl ResourceFeed for SupabaseFeed {
    fn name(&self) -> &str {
        "supabase"
    }

    async fn fetch_new(&self, limit: usize) -> Result<Vec<ResourceRow>> {
        let url = self.query_url(limit);
        tracing::debug!("Fetching new resources from {}", url);

        let response = self.client
            .get(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Feed(format!("Supabase returned {}: {}", status, body)));
        }

        let rows = response.json::<Vec<Value>>().await?;
        Ok(decode_rows(rows))
    }
}

/// Decode rows one by one; a malformed row is skipped, not the whole page.
fn decode_rows(rows: Vec<Value>) -> Vec<ResourceRow> {
    rows.into_iter()
        .filter_map(|value| match serde_json::from_value::<ResourceRow>(value) {
            Ok(row) => Some(row),
            Err(e) => {
                tracing::warn!("Skipping malformed resource row: {}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Query,
        http::{HeaderMap, StatusCode},
        routing::get,
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;

    fn config(url: &str) -> Config {
        Config {
            supabase_url: url.to_string(),
            supabase_anon_key: "anon".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_query_url() {
        let feed = SupabaseFeed::new(&config("https://abc.supabase.co")).unwrap();
        let url = feed.query_url(6);

        assert_eq!(url.path(), "/rest/v1/incoming_resources");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("select".to_string(), COLUMNS.to_string())));
        assert!(pairs.contains(&("status".to_string(), "eq.new".to_string())));
        assert!(pairs.contains(&("order".to_string(), "created_at.desc".to_string())));
        assert!(pairs.contains(&("limit".to_string(), "6".to_string())));
    }

    #[test]
    fn test_base_url_with_path() {
        let feed = SupabaseFeed::new(&config("http://localhost:54321/proxy")).unwrap();
        assert_eq!(feed.query_url(1).path(), "/proxy/rest/v1/incoming_resources");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = SupabaseFeed::new(&config("not a url"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_decode_rows_skips_malformed_rows() {
        let rows = decode_rows(vec![
            json!({ "id": 1, "type": "video", "title": "Good", "created_at": "2024-05-01T14:30:00Z" }),
            json!({ "id": 2, "type": "podcast", "title": "Unknown kind", "created_at": "2024-05-01T14:30:00Z" }),
            json!({ "id": 3, "type": "article", "title": "No date", "created_at": null }),
            json!({ "id": 4, "type": "article", "title": null, "created_at": "2024-05-01T14:29:00Z" }),
        ]);

        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
        assert_eq!(rows[1].title, "");
    }

    /// Serves `handler` on an ephemeral local port and returns its base URL.
    async fn stub<H, T>(handler: H) -> String
    where
        H: axum::handler::Handler<T, ()>,
        T: 'static,
    {
        let app = Router::new().route("/rest/v1/incoming_resources", get(handler));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_fetch_new_decodes_rows() {
        let base = stub(|headers: HeaderMap, Query(query): Query<HashMap<String, String>>| async move {
            assert_eq!(headers["apikey"], "anon");
            assert_eq!(headers["authorization"], "Bearer anon");
            assert_eq!(query["status"], "eq.new");
            assert_eq!(query["limit"], "6");
            Json(json!([
                { "id": 9, "type": "article", "title": "Fresh", "source": "BBC", "created_at": "2024-05-01T14:30:00Z", "content": "Body" },
                { "id": 8, "title": "Missing type", "created_at": "2024-05-01T14:00:00Z" }
            ]))
        })
        .await;

        let feed = SupabaseFeed::new(&config(&base)).unwrap();
        let rows = feed.fetch_new(6).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "9");
        assert_eq!(rows[0].content.as_deref(), Some("Body"));
    }

    #[tokio::test]
    async fn test_fetch_new_maps_server_error_to_feed_error() {
        let base = stub(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "relation does not exist") }).await;

        let feed = SupabaseFeed::new(&config(&base)).unwrap();
        let err = feed.fetch_new(6).await.unwrap_err();
        assert!(matches!(err, Error::Feed(ref msg) if msg.contains("relation does not exist")));
    }

    #[test]
    fn test_debug_redacts_key() {
        let feed = SupabaseFeed::new(&config("https://abc.supabase.co")).unwrap();
        assert!(!format!("{:?}", feed).contains("\"anon\""));
    }
}
