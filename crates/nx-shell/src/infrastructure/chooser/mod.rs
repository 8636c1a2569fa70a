//! The disk chooser: asks the user which disk image to use.
//!
//! # Prompting without blocking (for beginners)
//!
//! The core asks for its disk in the middle of a frame, and the frame must
//! finish quickly.  [`SpawningPrompter`] therefore never waits for the user.
//! It spawns a Tokio task that runs the [`DiskChooser`] and, once the user has
//! answered, sends a [`ChoiceResponse`] back to the scheduler's loop.  If the
//! session has already ended by then, the send fails and the answer is simply
//! dropped.
//!
//! The headless binary uses [`PresetDiskChooser`], which answers with the
//! `--disk` path from the command line (or "declined" when there is none).

pub mod mock;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use nx_core::DiskChoice;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::application::mount_disk::{ChoicePrompter, ChooserRequest, ChoiceResponse};

/// Presents a file chooser and waits for the user's answer.
#[async_trait]
pub trait DiskChooser: Send + Sync {
    async fn choose(&self, request: &ChooserRequest) -> DiskChoice;
}

/// A chooser that always answers with a path fixed at startup.
#[derive(Debug, Clone, Default)]
pub struct PresetDiskChooser {
    preset: Option<PathBuf>,
}

impl PresetDiskChooser {
    pub fn new(preset: Option<PathBuf>) -> Self {
        Self { preset }
    }
}

#[async_trait]
impl DiskChooser for PresetDiskChooser {
    async fn choose(&self, request: &ChooserRequest) -> DiskChoice {
        let Some(path) = &self.preset else {
            return DiskChoice::Declined;
        };
        // Only files with the disk extension are selectable.
        let matches = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&request.extension));
        if matches {
            DiskChoice::Explicit(path.clone())
        } else {
            warn!(
                path = %path.display(),
                extension = %request.extension,
                "preset disk has the wrong extension; using the default disk"
            );
            DiskChoice::Declined
        }
    }
}

/// [`ChoicePrompter`] that runs a [`DiskChooser`] in a spawned task.
///
/// Must be used from inside a Tokio runtime.
pub struct SpawningPrompter {
    chooser: Arc<dyn DiskChooser>,
    responses: mpsc::UnboundedSender<ChoiceResponse>,
}

impl SpawningPrompter {
    pub fn new(
        chooser: Arc<dyn DiskChooser>,
        responses: mpsc::UnboundedSender<ChoiceResponse>,
    ) -> Self {
        Self { chooser, responses }
    }
}

impl ChoicePrompter for SpawningPrompter {
    fn prompt(&self, request: ChooserRequest) {
        let chooser = Arc::clone(&self.chooser);
        let responses = self.responses.clone();
        debug!(token = %request.token, prompt = request.prompt, "opening disk chooser");
        tokio::spawn(async move {
            let choice = chooser.choose(&request).await;
            let response = ChoiceResponse {
                token: request.token,
                choice,
            };
            if responses.send(response).is_err() {
                debug!(token = %request.token, "session ended before the disk was chosen; answer dropped");
            }
        });
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
