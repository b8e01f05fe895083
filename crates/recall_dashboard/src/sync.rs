use async_trait::async_trait;
use recall_core::{Config, Error, Result, VocabularyItem};
use reqwest::Client;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Downstream destination for saved words (the spaced-repetition pipeline).
#[async_trait]
pub trait VocabSink: Send + Sync {
    fn name(&self) -> &str;

    async fn push(&self, items: &[VocabularyItem]) -> Result<()>;
}

/// Waits a fixed delay and reports success.
#[derive(Debug, Clone)]
pub struct SimulatedSink {
    delay: Duration,
}

impl SimulatedSink {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl VocabSink for SimulatedSink {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn push(&self, items: &[VocabularyItem]) -> Result<()> {
        tokio::time::sleep(self.delay).await;
        tracing::info!("✈️ Pushed {} words (simulated)", items.len());
        Ok(())
    }
}

#[derive(Serialize)]
struct WebhookPayload<'a> {
    words: &'a [VocabularyItem],
}

/// Posts new words to an n8n webhook as `{"words": [...]}`.
pub struct WebhookSink {
    client: Client,
    url: Url,
}

impl fmt::Debug for WebhookSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookSink")
            .field("client", &"<reqwest::Client>")
            .field("url", &self.url.as_str())
            .finish()
    }
}

impl WebhookSink {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|e| Error::Config(format!("Invalid sync webhook '{}': {}", url, e)))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl VocabSink for WebhookSink {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn push(&self, items: &[VocabularyItem]) -> Result<()> {
        let response = self.client
            .post(self.url.clone())
            .json(&WebhookPayload { words: items })
            .send()
            .await
            .map_err(|e| Error::Sync(format!("Webhook unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Sync(format!("Webhook returned {}: {}", status, body)));
        }

        tracing::info!("✈️ Pushed {} words to {}", items.len(), self.url);
        Ok(())
    }
}

/// Webhook sink when one is configured, otherwise the simulated one.
pub fn create_sink(config: &Config) -> Result<Arc<dyn VocabSink>> {
    match config.sync_webhook.as_deref() {
        Some(url) => Ok(Arc::new(WebhookSink::new(url, config.request_timeout)?)),
        None => Ok(Arc::new(SimulatedSink::new(config.sync_delay))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_core::NewVocabulary;

    #[tokio::test]
    async fn test_simulated_sink_always_succeeds() {
        let sink = SimulatedSink::new(Duration::from_millis(1));
        let item = VocabularyItem::create(NewVocabulary {
            word: "resilient".to_string(),
            part_of_speech: "Adjective".to_string(),
            definition: "able to recover".to_string(),
            context: "The economy is resilient.".to_string(),
            source: "Article Analysis".to_string(),
        });
        assert!(sink.push(&[item]).await.is_ok());
    }

    #[test]
    fn test_create_sink() {
        let config = Config::default();
        assert_eq!(create_sink(&config).unwrap().name(), "simulated");

        let config = Config {
            sync_webhook: Some("https://n8n.example.com/webhook/vocab".to_string()),
            ..Config::default()
        };
        assert_eq!(create_sink(&config).unwrap().name(), "webhook");

        let config = Config {
            sync_webhook: Some("not a url".to_string()),
            ..Config::default()
        };
        assert!(matches!(create_sink(&config), Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_unreachable_webhook_is_sync_error() {
        // Port 9 (discard) on localhost is not expected to accept HTTP.
        let sink = WebhookSink::new("http://127.0.0.1:9/hook", Duration::from_secs(2)).unwrap();
        let err = sink.push(&[]).await.unwrap_err();
        assert!(matches!(err, Error::Sync(_)));
    }
}
