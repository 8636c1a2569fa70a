//! A scriptable console core for tests.
//!
//! `RecordingConsole` writes everything the shell does to it into a shared
//! [`ConsoleLog`].  The log is behind an `Arc`, so tests keep reading it after
//! the session (and with it the console) has been consumed by the scheduler.
//! Dropping the console sets `released`, which lets tests check that the core
//! outlives the scheduler loop and no longer.
//!
//! Delegate callbacks are scripted per frame with [`RecordingConsole::on_frame`]:
//!
//! ```ignore
//! let console = RecordingConsole::new()
//!     .on_frame(1, ScriptedSignal::WillAccess)
//!     .on_frame(5, ScriptedSignal::DidSave);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use nx_core::{
    Console, ControlsInfo, CoreDelegate, CoreError, DeviceEvent, DeviceInput, DiskDrive,
    DiskSnapshot, Frame, GamepadButton, PadIndex, VirtualDiskImage, SCREEN_HEIGHT, SCREEN_WIDTH,
};

/// A delegate callback fired during a chosen frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedSignal {
    Fail(CoreError),
    WillAccess,
    DidSave,
    ControlsChanged(ControlsInfo),
}

/// Everything the shell did to a [`RecordingConsole`].
#[derive(Debug, Default)]
pub struct ConsoleLog {
    pub events: Mutex<Vec<DeviceEvent>>,
    pub imports: Mutex<Vec<Vec<u8>>>,
    pub disk_loaded: Mutex<usize>,
    /// What the delegate answered to each `disk_drive_will_access`.
    pub will_access_answers: Mutex<Vec<bool>>,
    pub frames: Mutex<u64>,
    pub gamepads: Mutex<Option<u8>>,
    pub uptime: Mutex<Option<u64>>,
    pub released: Mutex<bool>,
}

/// A console that records calls and fires scripted callbacks.
pub struct RecordingConsole {
    log: Arc<ConsoleLog>,
    script: HashMap<u64, Vec<ScriptedSignal>>,
    frame: u64,
    /// The in-memory disk; replaced by each accepted import.
    pub disk: Vec<u8>,
    /// When `true`, every import fails.
    pub reject_imports: bool,
    pixels: Vec<u32>,
}

impl Default for RecordingConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingConsole {
    pub fn new() -> Self {
        Self {
            log: Arc::new(ConsoleLog::default()),
            script: HashMap::new(),
            frame: 0,
            disk: Vec::new(),
            reject_imports: false,
            pixels: vec![0; (SCREEN_WIDTH * SCREEN_HEIGHT) as usize],
        }
    }

    /// Fires `signal` during frame `frame` (the first frame is 1).
    pub fn on_frame(mut self, frame: u64, signal: ScriptedSignal) -> Self {
        self.script.entry(frame).or_default().push(signal);
        self
    }

    pub fn rejecting_imports(mut self) -> Self {
        self.reject_imports = true;
        self
    }

    pub fn with_disk(mut self, disk: Vec<u8>) -> Self {
        self.disk = disk;
        self
    }

    /// A handle to the log that stays valid after the console is dropped.
    pub fn log(&self) -> Arc<ConsoleLog> {
        Arc::clone(&self.log)
    }

    fn record(&self, event: DeviceEvent) {
        self.log.events.lock().unwrap().push(event);
    }
}

impl Drop for RecordingConsole {
    fn drop(&mut self) {
        *self.log.released.lock().unwrap() = true;
    }
}

impl DeviceInput for RecordingConsole {
    fn touch_pressed(&mut self, x: i32, y: i32) {
        self.record(DeviceEvent::TouchPressed { x, y });
    }

    fn touch_dragged(&mut self, x: i32, y: i32) {
        self.record(DeviceEvent::TouchDragged { x, y });
    }

    fn touch_released(&mut self) {
        self.record(DeviceEvent::TouchReleased);
    }

    fn gamepad_pressed(&mut self, pad: PadIndex, button: GamepadButton) {
        self.record(DeviceEvent::GamepadPressed { pad, button });
    }

    fn gamepad_released(&mut self, pad: PadIndex, button: GamepadButton) {
        self.record(DeviceEvent::GamepadReleased { pad, button });
    }

    fn key_pressed(&mut self, key: u8) {
        self.record(DeviceEvent::KeyPressed(key));
    }

    fn confirm_pressed(&mut self) {
        self.record(DeviceEvent::ConfirmPressed);
    }

    fn delete_pressed(&mut self) {
        self.record(DeviceEvent::DeletePressed);
    }
}

impl DiskSnapshot for RecordingConsole {
    fn export_disk(&self) -> VirtualDiskImage {
        VirtualDiskImage::new(self.disk.clone())
    }
}

impl DiskDrive for RecordingConsole {
    fn import_disk(&mut self, image: &[u8], _complete: bool) -> Result<(), CoreError> {
        if self.reject_imports {
            return Err(CoreError::new("Invalid disk image"));
        }
        self.log.imports.lock().unwrap().push(image.to_vec());
        self.disk = image.to_vec();
        Ok(())
    }

    fn disk_loaded(&mut self) {
        *self.log.disk_loaded.lock().unwrap() += 1;
    }
}

impl Console for RecordingConsole {
    fn will_run_program(&mut self, seconds_since_power_on: u64) {
        *self.log.uptime.lock().unwrap() = Some(seconds_since_power_on);
    }

    fn set_num_physical_gamepads(&mut self, count: u8) {
        *self.log.gamepads.lock().unwrap() = Some(count);
    }

    fn update(&mut self, delegate: &mut dyn CoreDelegate) {
        self.frame += 1;
        *self.log.frames.lock().unwrap() = self.frame;

        for signal in self.script.remove(&self.frame).unwrap_or_default() {
            match signal {
                ScriptedSignal::Fail(error) => delegate.interpreter_did_fail(error),
                ScriptedSignal::WillAccess => {
                    let ready = delegate.disk_drive_will_access();
                    self.log.will_access_answers.lock().unwrap().push(ready);
                }
                ScriptedSignal::DidSave => delegate.disk_drive_did_save(&*self),
                ScriptedSignal::ControlsChanged(info) => delegate.controls_did_change(info),
            }
        }
    }

    fn frame(&self) -> Frame<'_> {
        Frame {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            pixels: &self.pixels,
        }
    }
}
