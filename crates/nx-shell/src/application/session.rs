//! Session: one running program and everything attached to it.
//!
//! A session exclusively owns the console core, the delegate bridge (and,
//! through it, the disk-mount broker) and the input translator.  Everything
//! that touches the core goes through `&mut Session`, so the core is never
//! driven from two places at once.
//!
//! # Lifecycle
//!
//! ```text
//! Session::start()           -- gamepads, uptime, initial surface size
//!   ├─ tick()                -- one core frame, then one render
//!   ├─ handle_platform_event -- keys, pointer, resize, close
//!   └─ handle_choice()       -- the only place a disk request resumes the core
//! Session::shutdown()        -- releases the core
//! ```
//!
//! The [`Scheduler`](super::scheduler::Scheduler) decides *when* each of these
//! runs; the session only defines *what* they do.

use std::path::PathBuf;
use std::sync::Arc;

use nx_core::{
    Console, DisplayFit, Frame, MountState, PadIndex, PlatformEvent, ScreenTransform, ViewSize,
    WindowSize,
};
use tracing::{debug, info, warn};

use super::delegate_bridge::DelegateBridge;
use super::error_surface::ErrorSurface;
use super::mount_disk::{ChoicePrompter, ChoiceResponse, DiskMountBroker, DiskStorage, MountReport};
use super::translate_input::TranslateInputUseCase;

/// Puts the core's frames on screen.
pub trait FrameRenderer: Send + Sync {
    /// Draws one frame.
    fn render(&self, frame: Frame<'_>);

    /// The window was resized; the drawing surface should become `fit`.
    fn resize_surface(&self, fit: DisplayFit);
}

/// The infrastructure a session is wired to.
#[derive(Clone)]
pub struct SessionServices {
    pub storage: Arc<dyn DiskStorage>,
    pub prompter: Arc<dyn ChoicePrompter>,
    pub errors: Arc<dyn ErrorSurface>,
    pub renderer: Arc<dyn FrameRenderer>,
}

/// Per-run settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Path of the running program; its folder holds the default disk.
    pub program: PathBuf,
    /// Disk file extension, without the dot.
    pub disk_extension: String,
    /// Initial window size.
    pub window: WindowSize,
    /// Seconds the host has been running when the program starts.
    pub seconds_since_power_on: u64,
}

/// Whether the scheduler should keep the session running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionControl {
    Continue,
    Close,
}

/// What a finished session did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Core frames run.
    pub frames: u64,
    /// Whether the program stopped with an execution fault.
    pub faulted: bool,
    /// Disk requests resolved.
    pub mounts: usize,
}

/// A running session.
pub struct Session<C: Console> {
    console: C,
    bridge: DelegateBridge,
    input: TranslateInputUseCase,
    renderer: Arc<dyn FrameRenderer>,
    transform: ScreenTransform,
    fit: DisplayFit,
    frames: u64,
    mounts: usize,
}

impl<C: Console> Session<C> {
    /// Prepares `console` to run and registers the session's delegate.
    pub fn start(mut console: C, services: SessionServices, config: SessionConfig) -> Self {
        console.will_run_program(config.seconds_since_power_on);
        // The keyboard provides both physical gamepads.
        console.set_num_physical_gamepads(PadIndex::COUNT);

        let broker = DiskMountBroker::new(
            services.storage,
            Arc::clone(&services.errors),
            &config.program,
            &config.disk_extension,
        );
        let bridge = DelegateBridge::new(broker, services.prompter, services.errors);

        let transform = ScreenTransform::default();
        let fit = transform.fit(config.window);
        services.renderer.resize_surface(fit);

        info!(
            program = %config.program.display(),
            registration = %bridge.registration(),
            scale = fit.scale,
            "session started"
        );

        Self {
            console,
            bridge,
            input: TranslateInputUseCase::new(transform, surface_view(fit)),
            renderer: services.renderer,
            transform,
            fit,
            frames: 0,
            mounts: 0,
        }
    }

    /// Advances the core by exactly one frame and renders it.
    ///
    /// Core faults are delivered to the delegate during the frame; this never
    /// fails.
    pub fn tick(&mut self) {
        self.console.update(&mut self.bridge);
        self.frames += 1;
        self.renderer.render(self.console.frame());
    }

    /// Applies one platform event.
    pub fn handle_platform_event(&mut self, event: PlatformEvent) -> SessionControl {
        match event {
            PlatformEvent::KeyDown { code, characters } => {
                self.input.on_key_down(&mut self.console, code, &characters);
            }
            PlatformEvent::KeyUp { code } => {
                self.input.on_key_up(&mut self.console, code);
            }
            PlatformEvent::PointerDown(pos) => {
                self.input.on_pointer_down(&mut self.console, pos);
            }
            PlatformEvent::PointerMove(pos) => {
                self.input.on_pointer_move(&mut self.console, pos);
            }
            PlatformEvent::PointerUp => {
                self.input.on_pointer_up(&mut self.console);
            }
            PlatformEvent::Resize(window) => {
                self.resize(window);
            }
            PlatformEvent::Close => return SessionControl::Close,
        }
        SessionControl::Continue
    }

    /// Applies the user's disk choice and resumes the core.
    ///
    /// Returns `None` when the response does not answer the pending request;
    /// such responses are dropped without touching the core.
    pub fn handle_choice(&mut self, response: ChoiceResponse) -> Option<MountReport> {
        match self.bridge.broker_mut().resolve(response, &mut self.console) {
            Ok(outcome) => {
                let report = outcome.resume(&mut self.console);
                self.mounts += 1;
                Some(report)
            }
            Err(e) => {
                warn!("{e}");
                None
            }
        }
    }

    /// Recomputes the display scale for a new window size.
    pub fn resize(&mut self, window: WindowSize) -> DisplayFit {
        let fit = self.transform.fit(window);
        if fit != self.fit {
            debug!(scale = fit.scale, width = fit.width, height = fit.height, "surface resized");
        }
        self.fit = fit;
        self.input.set_view(surface_view(fit));
        self.renderer.resize_surface(fit);
        fit
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn display_fit(&self) -> DisplayFit {
        self.fit
    }

    pub fn mount_state(&self) -> MountState {
        self.bridge.broker().state()
    }

    pub fn is_faulted(&self) -> bool {
        self.bridge.is_faulted()
    }

    /// Ends the session and releases the core.
    ///
    /// The caller must have stopped ticking first; taking `self` by value
    /// guarantees nothing can reach the core afterwards.
    pub fn shutdown(self) -> SessionSummary {
        let summary = SessionSummary {
            frames: self.frames,
            faulted: self.bridge.is_faulted(),
            mounts: self.mounts,
        };
        if self.bridge.broker().state() != MountState::Idle {
            debug!("session closed with a disk request still open");
        }
        drop(self.console);
        info!(?summary, "session ended; core released");
        summary
    }
}

/// Pointer events are delivered in the coordinates of the scaled surface.
fn surface_view(fit: DisplayFit) -> ViewSize {
    ViewSize::new(f64::from(fit.width), f64::from(fit.height))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
