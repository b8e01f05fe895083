use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub const UNKNOWN_SOURCE: &str = "Unknown Source";
pub const ARTICLE_ANALYSIS_SOURCE: &str = "Article Analysis";

/// Display format for feed timestamps, e.g. `Oct 18, 08:07 AM`.
const DISPLAY_DATE_FORMAT: &str = "%b %-d, %I:%M %p";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Article,
    Video,
}

/// A row as stored by the capture pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceRow {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub title: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomingResource {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub title: String,
    pub source: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl IncomingResource {
    pub fn from_row(row: ResourceRow) -> Self {
        let source = row
            .source
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_SOURCE.to_string());

        Self {
            id: row.id,
            kind: row.kind,
            title: row.title,
            source,
            date: row.created_at.format(DISPLAY_DATE_FORMAT).to_string(),
            content: row.content,
            url: row.url,
        }
    }

    /// Shown in place of the feed when the store is unreachable or empty.
    pub fn placeholder() -> Self {
        Self {
            id: "demo-1".to_string(),
            kind: ResourceKind::Article,
            title: "Setup Supabase to see real data".to_string(),
            source: "System".to_string(),
            date: "Now".to_string(),
            content: Some(
                "Please configure SUPABASE_URL and SUPABASE_ANON_KEY with your credentials to see data from n8n."
                    .to_string(),
            ),
            url: None,
        }
    }

    pub fn youtube_id(&self) -> Option<&str> {
        self.url.as_deref().and_then(youtube_id)
    }
}

/// Extracts the 11 character video id from the usual YouTube URL shapes:
/// `youtu.be/`, `v/`, `embed/`, `watch?v=`, `&v=` and `u/<c>/`. When several
/// markers appear, the last one wins.
pub fn youtube_id(url: &str) -> Option<&str> {
    const MARKERS: [&str; 5] = ["youtu.be/", "v/", "embed/", "watch?v=", "&v="];

    for (i, _) in url.char_indices().rev() {
        let rest = &url[i..];
        let skip = MARKERS
            .iter()
            .find(|m| rest.starts_with(**m))
            .map(|m| m.len())
            .or_else(|| user_marker_len(rest));

        if let Some(skip) = skip {
            let tail = &rest[skip..];
            let end = tail.find(['#', '&', '?']).unwrap_or(tail.len());
            let id = &tail[..end];
            return (id.len() == 11).then_some(id);
        }
    }
    None
}

/// Matches `u/<word char>/`.
fn user_marker_len(rest: &str) -> Option<usize> {
    let mut chars = rest.chars();
    match (chars.next(), chars.next(), chars.next(), chars.next()) {
        (Some('u'), Some('/'), Some(c), Some('/')) if c.is_ascii_alphanumeric() || c == '_' => Some(4),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyVocabulary {
    pub word: String,
    #[serde(default)]
    pub part_of_speech: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub example: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleAnalysisResult {
    pub summary: String,
    #[serde(default)]
    pub key_vocabulary: Vec<KeyVocabulary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiveW1H {
    pub who: String,
    pub what: String,
    #[serde(rename = "where")]
    pub where_: String,
    pub when: String,
    pub why: String,
    pub how: String,
}

impl FiveW1H {
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("Who", self.who.as_str()),
            ("What", self.what.as_str()),
            ("Where", self.where_.as_str()),
            ("When", self.when.as_str()),
            ("Why", self.why.as_str()),
            ("How", self.how.as_str()),
        ]
    }

    /// The student's answers in the line-per-question layout sent to the tutor.
    pub fn draft(&self) -> String {
        self.fields()
            .iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn answered(&self) -> usize {
        self.fields().iter().filter(|(_, v)| !v.trim().is_empty()).count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastCorrectionResult {
    pub corrected_text: String,
    #[serde(default)]
    pub grammar_feedback: Vec<String>,
    #[serde(default)]
    pub content_feedback: String,
    pub overall_score: f64,
}

impl PodcastCorrectionResult {
    pub fn has_perfect_grammar(&self) -> bool {
        self.grammar_feedback.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VocabStatus {
    #[serde(rename = "new")]
    New,
    #[serde(rename = "synced_to_telegram")]
    Synced,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVocabulary {
    pub word: String,
    pub part_of_speech: String,
    pub definition: String,
    pub context: String,
    pub source: String,
}

impl From<&KeyVocabulary> for NewVocabulary {
    fn from(entry: &KeyVocabulary) -> Self {
        Self {
            word: entry.word.clone(),
            part_of_speech: entry.part_of_speech.clone(),
            definition: entry.definition.clone(),
            context: entry.example.clone(),
            source: ARTICLE_ANALYSIS_SOURCE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    pub id: String,
    pub word: String,
    pub part_of_speech: String,
    pub definition: String,
    pub context: String,
    pub source: String,
    pub added_at: DateTime<Utc>,
    pub status: VocabStatus,
}

impl VocabularyItem {
    pub fn create(entry: NewVocabulary) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            word: entry.word,
            part_of_speech: entry.part_of_speech,
            definition: entry.definition,
            context: entry.context,
            source: entry.source,
            added_at: Utc::now(),
            status: VocabStatus::New,
        }
    }

    pub fn is_new(&self) -> bool {
        self.status == VocabStatus::New
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewState {
    #[default]
    Dashboard,
    ArticleAnalyzer,
    PodcastPractice,
    VocabBank,
}

impl ViewState {
    pub fn label(&self) -> &'static str {
        match self {
            ViewState::Dashboard => "Dashboard",
            ViewState::ArticleAnalyzer => "Read Articles",
            ViewState::PodcastPractice => "Podcast & 5W1H",
            ViewState::VocabBank => "Vocab Bank",
        }
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!("unsupported id value: {}", other))),
    }
}

fn deserialize_nullable_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// Accepts `timestamptz` values as well as plain `timestamp` columns (read as UTC).
fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| de::Error::custom(format!("invalid created_at '{}': {}", raw, e)))
}
