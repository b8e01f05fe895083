use async_trait::async_trait;
use crate::types::{ArticleAnalysisResult, FiveW1H, PodcastCorrectionResult};
use crate::Result;

#[async_trait]
pub trait TutorModel: Send + Sync {
    fn name(&self) -> &str;

    /// Summarize an article and pull out advanced vocabulary
    async fn analyze_article(&self, text: &str) -> Result<ArticleAnalysisResult>;

    /// Grade a 5W1H recall summary of a podcast or video
    async fn review_summary(&self, topic: &str, inputs: &FiveW1H) -> Result<PodcastCorrectionResult>;
}
