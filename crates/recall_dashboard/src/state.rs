use recall_core::{
    youtube_id, ArticleAnalysisResult, Error, FiveW1H, IncomingResource, PodcastCorrectionResult, ResourceKind,
    Result, ViewState,
};
use serde::Serialize;

use crate::vocab::VocabularyBank;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerDraft {
    pub input_text: String,
    pub result: Option<ArticleAnalysisResult>,
    pub loading: bool,
}

impl AnalyzerDraft {
    pub fn char_count(&self) -> usize {
        self.input_text.chars().count()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastDraft {
    pub video_url: String,
    pub topic: String,
    pub inputs: FiveW1H,
    pub feedback: Option<PodcastCorrectionResult>,
    pub submitting: bool,
}

impl PodcastDraft {
    pub fn youtube_id(&self) -> Option<&str> {
        youtube_id(&self.video_url)
    }
}

/// Everything the dashboard shows. Owned by [`crate::Dashboard`]; the
/// methods here are the only writers.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    pub view: ViewState,
    pub resources: Vec<IncomingResource>,
    pub active_resource: Option<IncomingResource>,
    pub analyzer: AnalyzerDraft,
    pub podcast: PodcastDraft,
    pub vocab: VocabularyBank,
    pub syncing: bool,
}

impl DashboardState {
    pub fn navigate(&mut self, view: ViewState) {
        self.view = view;
    }

    /// Manual entry points start without a selected resource.
    pub fn open_manual(&mut self, view: ViewState) {
        self.active_resource = None;
        self.view = view;
    }

    pub fn process_resource(&mut self, id: &str) -> Result<ViewState> {
        let resource = self.resources
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("resource {}", id)))?;

        let view = match resource.kind {
            ResourceKind::Article => {
                if let Some(content) = resource.content.as_deref().filter(|c| !c.is_empty()) {
                    self.analyzer.input_text = content.to_string();
                }
                ViewState::ArticleAnalyzer
            }
            ResourceKind::Video => {
                if let Some(url) = resource.url.as_deref().filter(|u| !u.is_empty()) {
                    self.podcast.video_url = url.to_string();
                }
                if !resource.title.is_empty() {
                    self.podcast.topic = resource.title.clone();
                }
                ViewState::PodcastPractice
            }
        };

        self.active_resource = Some(resource);
        self.view = view;
        Ok(view)
    }

    /// Apply an optional new draft and return the text to analyze.
    pub fn prepare_analysis(&mut self, text: Option<String>) -> Result<String> {
        if let Some(text) = text {
            self.analyzer.input_text = text;
        }
        if self.analyzer.input_text.trim().is_empty() {
            return Err(Error::Validation("Please paste some article text to analyze.".to_string()));
        }
        Ok(self.analyzer.input_text.clone())
    }

    /// Apply optional topic/answers and return what to grade.
    pub fn prepare_review(&mut self, topic: Option<String>, inputs: Option<FiveW1H>) -> Result<(String, FiveW1H)> {
        if let Some(topic) = topic {
            self.podcast.topic = topic;
        }
        if let Some(inputs) = inputs {
            self.podcast.inputs = inputs;
        }
        if self.podcast.topic.trim().is_empty() {
            return Err(Error::Validation(
                "Please enter the topic or title so AI can verify context.".to_string(),
            ));
        }
        Ok((self.podcast.topic.clone(), self.podcast.inputs.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(id: &str, kind: ResourceKind) -> IncomingResource {
        IncomingResource {
            id: id.to_string(),
            kind,
            title: format!("Title {}", id),
            source: "TED".to_string(),
            date: "Oct 18, 08:07 AM".to_string(),
            content: Some(format!("Content {}", id)),
            url: Some(format!("https://www.youtube.com/watch?v={}", id)),
        }
    }

    fn state() -> DashboardState {
        DashboardState {
            resources: vec![
                resource("article-001", ResourceKind::Article),
                resource("dQw4w9WgXcQ", ResourceKind::Video),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_initial_view_is_dashboard() {
        assert_eq!(DashboardState::default().view, ViewState::Dashboard);
    }

    #[test]
    fn test_article_routes_to_analyzer_with_content() {
        let mut state = state();
        let view = state.process_resource("article-001").unwrap();

        assert_eq!(view, ViewState::ArticleAnalyzer);
        assert_eq!(state.view, ViewState::ArticleAnalyzer);
        assert_eq!(state.analyzer.input_text, "Content article-001");
        assert_eq!(state.active_resource.as_ref().unwrap().id, "article-001");
    }

    #[test]
    fn test_video_routes_to_podcast_with_title_and_url() {
        let mut state = state();
        let view = state.process_resource("dQw4w9WgXcQ").unwrap();

        assert_eq!(view, ViewState::PodcastPractice);
        assert_eq!(state.podcast.topic, "Title dQw4w9WgXcQ");
        assert_eq!(state.podcast.video_url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(state.podcast.youtube_id(), Some("dQw4w9WgXcQ"));
    }

    #[test]
    fn test_unknown_resource() {
        let mut state = state();
        assert!(matches!(state.process_resource("missing"), Err(Error::NotFound(_))));
        assert_eq!(state.view, ViewState::Dashboard);
    }

    #[test]
    fn test_navigation_keeps_drafts() {
        let mut state = state();
        state.analyzer.input_text = "draft text".to_string();
        state.podcast.topic = "draft topic".to_string();

        state.navigate(ViewState::VocabBank);
        state.navigate(ViewState::ArticleAnalyzer);

        assert_eq!(state.analyzer.input_text, "draft text");
        assert_eq!(state.podcast.topic, "draft topic");
    }

    #[test]
    fn test_manual_entry_clears_active_resource_only() {
        let mut state = state();
        state.process_resource("article-001").unwrap();
        state.open_manual(ViewState::PodcastPractice);

        assert!(state.active_resource.is_none());
        assert_eq!(state.view, ViewState::PodcastPractice);
        assert_eq!(state.analyzer.input_text, "Content article-001");
    }

    #[test]
    fn test_prepare_analysis_requires_text() {
        let mut state = state();
        assert!(matches!(state.prepare_analysis(None), Err(Error::Validation(_))));
        assert!(matches!(state.prepare_analysis(Some("   ".to_string())), Err(Error::Validation(_))));
        assert_eq!(state.prepare_analysis(Some("Text".to_string())).unwrap(), "Text");
        assert_eq!(state.analyzer.char_count(), 4);
    }

    #[test]
    fn test_prepare_review_requires_topic() {
        let mut state = state();
        let inputs = FiveW1H {
            who: "Someone".to_string(),
            ..Default::default()
        };
        let err = state.prepare_review(None, Some(inputs.clone())).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(state.podcast.feedback.is_none());

        let (topic, answers) = state.prepare_review(Some("Sleep".to_string()), None).unwrap();
        assert_eq!(topic, "Sleep");
        assert_eq!(answers, inputs);
    }
}
