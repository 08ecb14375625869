//! Server application state

use std::sync::Arc;

use crate::llm::LlmClient;
use crate::pipeline::LessonPipeline;
use crate::store::LessonStore;

/// Shared application state for all route handlers
pub struct AppState {
    pub store: Arc<LessonStore>,
    pub pipeline: LessonPipeline,
}

impl AppState {
    pub fn new(store: Arc<LessonStore>, llm: Arc<LlmClient>) -> Arc<Self> {
        let pipeline = LessonPipeline::new(Arc::clone(&store), llm);
        Arc::new(Self { store, pipeline })
    }
}
