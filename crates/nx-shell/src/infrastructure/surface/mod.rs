//! Output adapters: where faults and frames go.
//!
//! The headless shell has no window, so faults are presented as `error!`
//! log records and frames are only counted.  A windowed front end would
//! replace both with an alert sheet and a texture upload.

pub mod mock;

use std::sync::atomic::{AtomicU64, Ordering};

use nx_core::{DisplayFit, Frame, ShellFault};
use tracing::{debug, error, info, trace};

use crate::application::error_surface::ErrorSurface;
use crate::application::session::FrameRenderer;

/// Presents faults as log records.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingErrorSurface;

impl TracingErrorSurface {
    pub fn new() -> Self {
        Self
    }
}

impl ErrorSurface for TracingErrorSurface {
    fn present_error(&self, fault: &ShellFault) {
        error!(kind = ?fault.kind(), "{fault}");
    }
}

/// Counts frames instead of drawing them.
#[derive(Debug, Default)]
pub struct TracingRenderer {
    presented: AtomicU64,
}

impl TracingRenderer {
    /// Frames are summarised at debug level once per this many frames.
    const REPORT_EVERY: u64 = 300;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_presented(&self) -> u64 {
        self.presented.load(Ordering::Relaxed)
    }
}

impl FrameRenderer for TracingRenderer {
    fn render(&self, frame: Frame<'_>) {
        let count = self.presented.fetch_add(1, Ordering::Relaxed) + 1;
        trace!(width = frame.width, height = frame.height, "frame presented");
        if count % Self::REPORT_EVERY == 0 {
            debug!(frames = count, "frames presented");
        }
    }

    fn resize_surface(&self, fit: DisplayFit) {
        info!(scale = fit.scale, width = fit.width, height = fit.height, "surface resized");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
