use std::fmt;
use std::time::Duration;

pub const PLACEHOLDER_SUPABASE_URL: &str = "https://your-project.supabase.co";
pub const PLACEHOLDER_SUPABASE_ANON_KEY: &str = "your-anon-key";
pub const DEFAULT_MODEL_NAME: &str = "gemini-3-flash-preview";
pub const DEFAULT_SYNC_DELAY: Duration = Duration::from_millis(1500);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct Config {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub api_key: Option<String>,
    pub model_name: String,
    /// n8n webhook receiving synced words; the sync is simulated when unset
    pub sync_webhook: Option<String>,
    pub sync_delay: Duration,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            supabase_url: PLACEHOLDER_SUPABASE_URL.to_string(),
            supabase_anon_key: PLACEHOLDER_SUPABASE_ANON_KEY.to_string(),
            api_key: None,
            model_name: DEFAULT_MODEL_NAME.to_string(),
            sync_webhook: None,
            sync_delay: DEFAULT_SYNC_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("supabase_url", &self.supabase_url)
            .field("supabase_anon_key", &"<redacted>")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("sync_webhook", &self.sync_webhook)
            .field("sync_delay", &self.sync_delay)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            supabase_url: get("SUPABASE_URL").unwrap_or(defaults.supabase_url),
            supabase_anon_key: get("SUPABASE_ANON_KEY").unwrap_or(defaults.supabase_anon_key),
            api_key: get("API_KEY").or_else(|| get("GEMINI_API_KEY")),
            model_name: get("RECALL_MODEL").unwrap_or(defaults.model_name),
            sync_webhook: get("RECALL_SYNC_WEBHOOK"),
            ..defaults
        }
    }

    /// True while the store credentials are still the shipped placeholders.
    pub fn has_placeholder_store(&self) -> bool {
        self.supabase_url == PLACEHOLDER_SUPABASE_URL || self.supabase_anon_key == PLACEHOLDER_SUPABASE_ANON_KEY
    }
}
