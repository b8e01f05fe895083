use recall_core::{Config, Error, Result, TutorModel};
use std::sync::Arc;

pub mod dummy;
pub mod gemini;

pub use dummy::DummyModel;
pub use gemini::GeminiModel;

/// Build a tutor model by name (`gemini` or `dummy`).
pub fn create_model(name: &str, config: &Config) -> Result<Arc<dyn TutorModel>> {
    match name {
        "gemini" => Ok(Arc::new(GeminiModel::new(config)?)),
        "dummy" => Ok(Arc::new(DummyModel::new())),
        other => Err(Error::Config(format!(
            "Unknown model '{}'. Available models: gemini, dummy",
            other
        ))),
    }
}
