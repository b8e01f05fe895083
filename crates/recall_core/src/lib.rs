pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use models::TutorModel;
pub use storage::ResourceFeed;
pub use types::*;

pub mod prelude {
    pub use crate::{Config, Error, Result, ResourceFeed, TutorModel};
    pub use crate::types::{
        ArticleAnalysisResult, FiveW1H, IncomingResource, NewVocabulary, PodcastCorrectionResult,
        ResourceKind, ViewState, VocabStatus, VocabularyItem,
    };
}
