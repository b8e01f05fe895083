//! The dashboard service: owns the session state and routes user actions to
//! the feed, the tutor model and the vocabulary sink.
//!
//! State lives behind a [`RwLock`] that is never held across an external
//! call. Each long-running action (analysis, review, sync) has an in-flight
//! flag; starting the same action again while it is outstanding fails with
//! [`Error::Busy`]. A result that arrives after the user navigated elsewhere
//! still lands in its own view's draft.

use recall_core::{
    ArticleAnalysisResult, Error, FiveW1H, IncomingResource, NewVocabulary, PodcastCorrectionResult, ResourceFeed,
    Result, TutorModel, ViewState, VocabularyItem,
};
use recall_storage::load_resources;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::state::DashboardState;
use crate::sync::VocabSink;

/// Clears its flag when dropped, including when the caller's future is cancelled.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn begin(flag: &'a AtomicBool, action: &str) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| Error::Busy(action.to_string()))?;
        Ok(Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct Dashboard {
    feed: Arc<dyn ResourceFeed>,
    model: Arc<dyn TutorModel>,
    sink: Arc<dyn VocabSink>,
    state: RwLock<DashboardState>,
    analyzing: AtomicBool,
    reviewing: AtomicBool,
    syncing: AtomicBool,
}

impl fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dashboard")
            .field("feed", &self.feed.name())
            .field("model", &self.model.name())
            .field("sink", &self.sink.name())
            .finish()
    }
}

impl Dashboard {
    pub fn new(feed: Arc<dyn ResourceFeed>, model: Arc<dyn TutorModel>, sink: Arc<dyn VocabSink>) -> Self {
        Self {
            feed,
            model,
            sink,
            state: RwLock::new(DashboardState::default()),
            analyzing: AtomicBool::new(false),
            reviewing: AtomicBool::new(false),
            syncing: AtomicBool::new(false),
        }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// (Re)load the resource feed. Falls back to the placeholder on failure.
    pub async fn load_feed(&self) -> Vec<IncomingResource> {
        let resources = load_resources(self.feed.as_ref()).await;
        self.state.write().await.resources = resources.clone();
        resources
    }

    pub async fn resources(&self) -> Vec<IncomingResource> {
        self.state.read().await.resources.clone()
    }

    /// A copy of the current state, with in-flight flags filled in.
    pub async fn snapshot(&self) -> DashboardState {
        let mut state = self.state.read().await.clone();
        state.analyzer.loading = self.analyzing.load(Ordering::Acquire);
        state.podcast.submitting = self.reviewing.load(Ordering::Acquire);
        state.syncing = self.syncing.load(Ordering::Acquire);
        state
    }

    pub async fn navigate(&self, view: ViewState) {
        self.state.write().await.navigate(view);
    }

    pub async fn open_manual(&self, view: ViewState) {
        self.state.write().await.open_manual(view);
    }

    pub async fn process_resource(&self, id: &str) -> Result<ViewState> {
        let view = self.state.write().await.process_resource(id)?;
        tracing::info!("Processing resource {} in {}", id, view.label());
        Ok(view)
    }

    pub async fn analyze_article(&self, text: Option<String>) -> Result<ArticleAnalysisResult> {
        let _in_flight = InFlight::begin(&self.analyzing, "Article analysis")?;
        let text = self.state.write().await.prepare_analysis(text)?;

        tracing::debug!("Analyzing {} characters with {}", text.chars().count(), self.model.name());
        let result = self.model.analyze_article(&text).await.map_err(|e| {
            tracing::error!("Article analysis failed: {}", e);
            e
        })?;

        self.state.write().await.analyzer.result = Some(result.clone());
        Ok(result)
    }

    pub async fn review_podcast(&self, topic: Option<String>, inputs: Option<FiveW1H>) -> Result<PodcastCorrectionResult> {
        let _in_flight = InFlight::begin(&self.reviewing, "Podcast review")?;
        let (topic, inputs) = self.state.write().await.prepare_review(topic, inputs)?;

        tracing::debug!("Reviewing 5W1H summary of '{}' ({} of 6 answered)", topic, inputs.answered());
        let result = self.model.review_summary(&topic, &inputs).await.map_err(|e| {
            tracing::error!("Podcast review failed: {}", e);
            e
        })?;

        self.state.write().await.podcast.feedback = Some(result.clone());
        Ok(result)
    }

    pub async fn save_vocab(&self, entry: NewVocabulary) -> VocabularyItem {
        let item = self.state.write().await.vocab.save(entry);
        tracing::info!("💾 Saved '{}' to the vocabulary bank", item.word);
        item
    }

    /// Save entry `index` of the latest analysis.
    pub async fn save_from_analysis(&self, index: usize) -> Result<VocabularyItem> {
        let mut state = self.state.write().await;
        let entry = state.analyzer.result
            .as_ref()
            .and_then(|result| result.key_vocabulary.get(index))
            .map(NewVocabulary::from)
            .ok_or_else(|| Error::NotFound(format!("vocabulary entry {}", index)))?;
        Ok(state.vocab.save(entry))
    }

    pub async fn vocab(&self) -> Vec<VocabularyItem> {
        self.state.read().await.vocab.items().to_vec()
    }

    /// Push every `new` word to the sink, then mark exactly those as synced.
    /// Returns the number of words moved; words saved meanwhile stay `new`.
    pub async fn sync_vocab(&self) -> Result<usize> {
        let _in_flight = InFlight::begin(&self.syncing, "Vocabulary sync")?;

        let pending = self.state.read().await.vocab.pending();
        if pending.is_empty() {
            return Ok(0);
        }

        self.sink.push(&pending).await.map_err(|e| {
            tracing::error!("Vocabulary sync via {} failed: {}", self.sink.name(), e);
            e
        })?;

        let ids: Vec<String> = pending.into_iter().map(|item| item.id).collect();
        let moved = self.state.write().await.vocab.mark_synced(&ids);
        tracing::info!("Synced {} words via {}", moved, self.sink.name());
        Ok(moved)
    }

    pub async fn export_vocab(&self) -> Result<String> {
        let state = self.state.read().await;
        Ok(serde_json::to_string_pretty(state.vocab.items())?)
    }
}
