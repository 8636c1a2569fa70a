//! Test doubles for the disk chooser.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use nx_core::DiskChoice;

use super::DiskChooser;
use crate::application::mount_disk::{ChoicePrompter, ChooserRequest};

/// Records every prompt and never answers.
///
/// Use it to assert how often the chooser was opened, then feed answers to
/// the session by hand with the recorded tokens.
#[derive(Debug, Default)]
pub struct RecordingPrompter {
    pub requests: Mutex<Vec<ChooserRequest>>,
}

impl RecordingPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The request opened most recently.
    pub fn last(&self) -> Option<ChooserRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl ChoicePrompter for RecordingPrompter {
    fn prompt(&self, request: ChooserRequest) {
        self.requests.lock().unwrap().push(request);
    }
}

/// A user who takes `delay` to answer with `choice`.
#[derive(Debug, Clone)]
pub struct SlowDiskChooser {
    pub delay: Duration,
    pub choice: DiskChoice,
}

#[async_trait]
impl DiskChooser for SlowDiskChooser {
    async fn choose(&self, _request: &ChooserRequest) -> DiskChoice {
        tokio::time::sleep(self.delay).await;
        self.choice.clone()
    }
}
