//! Recording output adapters for tests.

use std::sync::Mutex;

use nx_core::{DisplayFit, FaultKind, Frame, ShellFault};

use crate::application::error_surface::ErrorSurface;
use crate::application::session::FrameRenderer;

/// Records every presented fault as `(kind, message)`.
#[derive(Debug, Default)]
pub struct RecordingErrorSurface {
    pub faults: Mutex<Vec<(FaultKind, String)>>,
}

impl RecordingErrorSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The kinds of all presented faults, in order.
    pub fn kinds(&self) -> Vec<FaultKind> {
        self.faults.lock().unwrap().iter().map(|(kind, _)| *kind).collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.faults
            .lock()
            .unwrap()
            .iter()
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl ErrorSurface for RecordingErrorSurface {
    fn present_error(&self, fault: &ShellFault) {
        self.faults
            .lock()
            .unwrap()
            .push((fault.kind(), fault.to_string()));
    }
}

/// Records how many frames were rendered and every surface size.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub frames: Mutex<usize>,
    pub fits: Mutex<Vec<DisplayFit>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameRenderer for RecordingRenderer {
    fn render(&self, _frame: Frame<'_>) {
        *self.frames.lock().unwrap() += 1;
    }

    fn resize_surface(&self, fit: DisplayFit) {
        self.fits.lock().unwrap().push(fit);
    }
}
