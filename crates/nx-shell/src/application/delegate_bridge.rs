//! DelegateBridge: receives the core's callbacks and routes them.
//!
//! One bridge is created when a session starts and lives exactly as long as
//! the session.  The core never stores it; the session lends it as
//! `&mut dyn CoreDelegate` for each frame, and every callback is handled
//! synchronously inside that frame.
//!
//! | Callback                 | Routed to                                   |
//! |--------------------------|---------------------------------------------|
//! | `interpreter_did_fail`   | error surface, run marked as faulted        |
//! | `disk_drive_will_access` | [`DiskMountBroker::begin`] + chooser prompt |
//! | `disk_drive_did_save`    | [`DiskMountBroker::export`]                 |
//! | `controls_did_change`    | logged only                                 |

use std::sync::Arc;

use nx_core::{ControlsInfo, CoreDelegate, CoreError, DiskSnapshot, ShellFault};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::error_surface::ErrorSurface;
use super::mount_disk::{ChoicePrompter, DiskMountBroker};

/// The session's [`CoreDelegate`].
pub struct DelegateBridge {
    registration: Uuid,
    broker: DiskMountBroker,
    prompter: Arc<dyn ChoicePrompter>,
    errors: Arc<dyn ErrorSurface>,
    faulted: bool,
}

impl DelegateBridge {
    pub fn new(
        broker: DiskMountBroker,
        prompter: Arc<dyn ChoicePrompter>,
        errors: Arc<dyn ErrorSurface>,
    ) -> Self {
        let registration = Uuid::new_v4();
        info!(%registration, "core delegate registered");
        Self {
            registration,
            broker,
            prompter,
            errors,
            faulted: false,
        }
    }

    /// Identifier of this registration, used in log fields.
    pub fn registration(&self) -> Uuid {
        self.registration
    }

    pub fn broker(&self) -> &DiskMountBroker {
        &self.broker
    }

    pub fn broker_mut(&mut self) -> &mut DiskMountBroker {
        &mut self.broker
    }

    /// `true` once the core has reported an execution fault.
    pub fn is_faulted(&self) -> bool {
        self.faulted
    }
}

impl CoreDelegate for DelegateBridge {
    fn interpreter_did_fail(&mut self, error: CoreError) {
        error!(registration = %self.registration, "program stopped: {error}");
        self.faulted = true;
        self.errors.present_error(&ShellFault::Execution(error));
    }

    fn disk_drive_will_access(&mut self) -> bool {
        match self.broker.begin() {
            Ok(request) => self.prompter.prompt(request),
            Err(e) => warn!(registration = %self.registration, "{e}; request rejected"),
        }
        // The disk is never ready synchronously; the core waits for disk_loaded.
        false
    }

    fn disk_drive_did_save(&mut self, disk: &dyn DiskSnapshot) {
        let outcome = self.broker.export(disk);
        debug!(registration = %self.registration, ?outcome, "disk save handled");
    }

    fn controls_did_change(&mut self, controls: ControlsInfo) {
        debug!(registration = %self.registration, ?controls, "controls changed");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
