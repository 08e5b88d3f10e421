use cinescope_core::LookupPipeline;

use crate::telegram::TelegramClient;

/// Shared application state
pub struct AppState {
    pipeline: LookupPipeline,
    telegram: TelegramClient,
}

impl AppState {
    pub fn new(pipeline: LookupPipeline, telegram: TelegramClient) -> Self {
        Self { pipeline, telegram }
    }

    pub fn pipeline(&self) -> &LookupPipeline {
        &self.pipeline
    }

    pub fn telegram(&self) -> &TelegramClient {
        &self.telegram
    }
}
