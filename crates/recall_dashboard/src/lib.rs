pub mod dashboard;
pub mod state;
pub mod sync;
pub mod vocab;

pub use dashboard::Dashboard;
pub use state::{AnalyzerDraft, DashboardState, PodcastDraft};
pub use sync::{create_sink, SimulatedSink, VocabSink, WebhookSink};
pub use vocab::VocabularyBank;

pub mod prelude {
    pub use super::{create_sink, Dashboard, DashboardState, VocabSink, VocabularyBank};
    pub use recall_core::{Error, Result, ViewState};
}
