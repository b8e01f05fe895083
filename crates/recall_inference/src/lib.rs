pub mod models;
pub mod prompts;

pub use models::create_model;
pub use recall_core::TutorModel;

pub mod prelude {
    pub use super::models::{create_model, dummy::DummyModel, gemini::GeminiModel};
    pub use recall_core::{ArticleAnalysisResult, Error, FiveW1H, PodcastCorrectionResult, Result, TutorModel};
}
