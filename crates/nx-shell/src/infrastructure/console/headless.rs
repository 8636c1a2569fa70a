//! A minimal stand-in core for running the shell without the real VM.
//!
//! The real LowRes NX interpreter is linked in by a platform build.  The
//! headless console lets the binary exercise everything around it: it keeps
//! a frame counter and a 160×128 framebuffer, paints pressed buttons and the
//! touch point, collects typed text, and drives the disk protocol at the
//! frames given in [`HeadlessOptions`].
//!
//! Disk behaviour follows the real core: the first disk access asks the
//! delegate, a "not yet" answer holds disk operations until `disk_loaded`,
//! and a save requested while the disk is held is performed after it loads.

use std::collections::HashSet;

use nx_core::{
    Console, CoreDelegate, CoreError, DiskDrive, DiskSnapshot, DeviceInput, Frame, GamepadButton,
    PadIndex, VirtualDiskImage, SCREEN_HEIGHT, SCREEN_WIDTH,
};
use tracing::{debug, info};

const BACKGROUND: u32 = 0x0010_1020;
const FAULT_BACKGROUND: u32 = 0x0060_1010;
const BUTTON_ON: u32 = 0x00F0_C040;
const TOUCH: u32 = 0x00FF_FFFF;

/// When the stand-in program touches its disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadlessOptions {
    /// Frame on which the program first accesses the disk.
    pub disk_request_frame: Option<u64>,
    /// Frame on which the program saves to the disk.
    pub disk_save_frame: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DiskAccess {
    Unrequested,
    Waiting,
    Ready,
}

/// Headless [`Console`] implementation.
pub struct HeadlessConsole {
    program: String,
    options: HeadlessOptions,
    frame: u64,
    uptime: u64,
    gamepads: u8,
    pixels: Vec<u32>,
    pressed: HashSet<(PadIndex, GamepadButton)>,
    touch: Option<(i32, i32)>,
    line: String,
    disk: Vec<u8>,
    disk_access: DiskAccess,
    save_pending: bool,
    failed: bool,
}

impl HeadlessConsole {
    pub fn new(program: String, options: HeadlessOptions) -> Self {
        Self {
            program,
            options,
            frame: 0,
            uptime: 0,
            gamepads: 0,
            pixels: vec![BACKGROUND; (SCREEN_WIDTH * SCREEN_HEIGHT) as usize],
            pressed: HashSet::new(),
            touch: None,
            line: String::new(),
            disk: Vec::new(),
            disk_access: DiskAccess::Unrequested,
            save_pending: false,
            failed: false,
        }
    }

    pub fn frames_run(&self) -> u64 {
        self.frame
    }

    pub fn uptime(&self) -> u64 {
        self.uptime
    }

    pub fn gamepads(&self) -> u8 {
        self.gamepads
    }

    /// Text typed since the last confirm.
    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn disk(&self) -> &[u8] {
        &self.disk
    }

    fn is_disk_held(&self) -> bool {
        self.disk_access == DiskAccess::Waiting
    }

    fn run_program(&mut self, delegate: &mut dyn CoreDelegate) {
        if self.frame == 1 && self.program.trim().is_empty() {
            self.failed = true;
            delegate.interpreter_did_fail(CoreError::at_line("Program is empty", 1));
        }
        if self.failed {
            return;
        }

        if self.options.disk_request_frame == Some(self.frame)
            && self.disk_access == DiskAccess::Unrequested
        {
            self.disk_access = if delegate.disk_drive_will_access() {
                DiskAccess::Ready
            } else {
                DiskAccess::Waiting
            };
        }
        if self.options.disk_save_frame == Some(self.frame) {
            self.save_pending = true;
        }
        if self.save_pending && !self.is_disk_held() {
            self.save_pending = false;
            self.disk
                .extend_from_slice(format!("SAVED AT FRAME {}\n", self.frame).as_bytes());
            delegate.disk_drive_did_save(&*self);
        }
    }

    fn paint(&mut self) {
        let background = if self.failed { FAULT_BACKGROUND } else { BACKGROUND };
        self.pixels.fill(background);

        let width = SCREEN_WIDTH as i32;
        let height = SCREEN_HEIGHT as i32;
        for (pad, button) in &self.pressed {
            let x = button_slot(*button) * 4;
            let y = i32::from(pad.get()) * 4;
            self.pixels[(y * width + x) as usize] = BUTTON_ON;
        }
        if let Some((x, y)) = self.touch {
            if (0..width).contains(&x) && (0..height).contains(&y) {
                self.pixels[(y * width + x) as usize] = TOUCH;
            }
        }
    }
}

fn button_slot(button: GamepadButton) -> i32 {
    match button {
        GamepadButton::Left => 0,
        GamepadButton::Right => 1,
        GamepadButton::Up => 2,
        GamepadButton::Down => 3,
        GamepadButton::A => 4,
        GamepadButton::B => 5,
    }
}

impl DeviceInput for HeadlessConsole {
    fn touch_pressed(&mut self, x: i32, y: i32) {
        self.touch = Some((x, y));
    }

    fn touch_dragged(&mut self, x: i32, y: i32) {
        self.touch = Some((x, y));
    }

    fn touch_released(&mut self) {
        self.touch = None;
    }

    fn gamepad_pressed(&mut self, pad: PadIndex, button: GamepadButton) {
        self.pressed.insert((pad, button));
    }

    fn gamepad_released(&mut self, pad: PadIndex, button: GamepadButton) {
        self.pressed.remove(&(pad, button));
    }

    fn key_pressed(&mut self, key: u8) {
        self.line.push(char::from(key));
    }

    fn confirm_pressed(&mut self) {
        info!(line = %self.line, "line entered");
        self.line.clear();
    }

    fn delete_pressed(&mut self) {
        self.line.pop();
    }
}

impl DiskSnapshot for HeadlessConsole {
    fn export_disk(&self) -> VirtualDiskImage {
        VirtualDiskImage::new(self.disk.clone())
    }
}

impl DiskDrive for HeadlessConsole {
    fn import_disk(&mut self, image: &[u8], _complete: bool) -> Result<(), CoreError> {
        // Disk entries are text; anything else is not a disk image.
        std::str::from_utf8(image).map_err(|_| CoreError::new("Invalid disk"))?;
        self.disk = image.to_vec();
        debug!(len = image.len(), "disk imported");
        Ok(())
    }

    fn disk_loaded(&mut self) {
        if self.disk_access == DiskAccess::Waiting {
            self.disk_access = DiskAccess::Ready;
        }
        debug!("disk ready");
    }
}

impl Console for HeadlessConsole {
    fn will_run_program(&mut self, seconds_since_power_on: u64) {
        self.uptime = seconds_since_power_on;
    }

    fn set_num_physical_gamepads(&mut self, count: u8) {
        self.gamepads = count;
    }

    fn update(&mut self, delegate: &mut dyn CoreDelegate) {
        self.frame += 1;
        self.run_program(delegate);
        self.paint();
    }

    fn frame(&self) -> Frame<'_> {
        Frame {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            pixels: &self.pixels,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
