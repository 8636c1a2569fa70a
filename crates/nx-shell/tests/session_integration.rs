//! Integration tests for a whole running session.
//!
//! These tests run the scheduler loop end-to-end on a paused Tokio clock:
//! platform events and chooser answers go in through channels, and the
//! headless or recording core, storage and error surface are inspected
//! afterwards.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use nx_core::{DeviceEvent, DisplayFit, GamepadButton, PadIndex, PlatformEvent, ViewPoint, WindowSize};
use nx_shell::application::mount_disk::ChoiceResponse;
use nx_shell::application::scheduler::Scheduler;
use nx_shell::application::session::{Session, SessionConfig, SessionServices};
use nx_shell::infrastructure::chooser::{PresetDiskChooser, SpawningPrompter};
use nx_shell::infrastructure::console::mock::RecordingConsole;
use nx_shell::infrastructure::console::{HeadlessConsole, HeadlessOptions};
use nx_shell::infrastructure::platform_input::pump_events;
use nx_shell::infrastructure::storage::mock::MemoryDiskStorage;
use nx_shell::infrastructure::surface::mock::{RecordingErrorSurface, RecordingRenderer};
use tokio::sync::mpsc;

const PROGRAM: &str = "/games/demo.nx";

struct Wiring {
    services: SessionServices,
    storage: Arc<MemoryDiskStorage>,
    errors: Arc<RecordingErrorSurface>,
    renderer: Arc<RecordingRenderer>,
    choices_rx: mpsc::UnboundedReceiver<ChoiceResponse>,
}

fn wiring(preset: Option<PathBuf>) -> Wiring {
    let (choices_tx, choices_rx) = mpsc::unbounded_channel();
    let storage = Arc::new(MemoryDiskStorage::new());
    let errors = Arc::new(RecordingErrorSurface::new());
    let renderer = Arc::new(RecordingRenderer::new());
    let services = SessionServices {
        storage: Arc::clone(&storage) as _,
        prompter: Arc::new(SpawningPrompter::new(Arc::new(PresetDiskChooser::new(preset)), choices_tx)),
        errors: Arc::clone(&errors) as _,
        renderer: Arc::clone(&renderer) as _,
    };
    Wiring { services, storage, errors, renderer, choices_rx }
}

fn config(window: WindowSize) -> SessionConfig {
    SessionConfig {
        program: PathBuf::from(PROGRAM),
        disk_extension: "nx".to_string(),
        window,
        seconds_since_power_on: 7,
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_left_arrow_press_and_release_reach_the_core_as_one_edge_each() {
    // Arrange
    let w = wiring(None);
    let console = RecordingConsole::new();
    let log = console.log();
    let session = Session::start(console, w.services, config(WindowSize::new(640.0, 512.0)));
    let (events_tx, events_rx) = mpsc::channel(8);
    events_tx
        .send(PlatformEvent::KeyDown { code: 123, characters: "\u{F702}".to_string() })
        .await
        .unwrap();
    events_tx.send(PlatformEvent::KeyUp { code: 123 }).await.unwrap();
    events_tx.send(PlatformEvent::Close).await.unwrap();

    // Act
    Scheduler::default()
        .run(session, events_rx, w.choices_rx, std::future::pending())
        .await;

    // Assert
    assert_eq!(
        *log.events.lock().unwrap(),
        vec![
            DeviceEvent::GamepadPressed { pad: PadIndex::FIRST, button: GamepadButton::Left },
            DeviceEvent::GamepadReleased { pad: PadIndex::FIRST, button: GamepadButton::Left },
        ]
    );
    assert_eq!(*log.gamepads.lock().unwrap(), Some(2));
    assert_eq!(*log.uptime.lock().unwrap(), Some(7));
}

#[tokio::test(start_paused = true)]
async fn test_text_and_pointer_events_are_translated_in_order() {
    // Arrange – 320×256 window → scale 2
    let w = wiring(None);
    let console = RecordingConsole::new();
    let log = console.log();
    let session = Session::start(console, w.services, config(WindowSize::new(320.0, 256.0)));
    let (events_tx, events_rx) = mpsc::channel(16);
    for event in [
        PlatformEvent::KeyDown { code: 14, characters: "e".to_string() },
        PlatformEvent::KeyDown { code: 36, characters: "\r".to_string() },
        PlatformEvent::KeyDown { code: 51, characters: "\u{7F}".to_string() },
        PlatformEvent::PointerDown(ViewPoint::new(10.0, 300.0)),
        PlatformEvent::PointerDown(ViewPoint::new(10.0, 10.0)),
        PlatformEvent::PointerMove(ViewPoint::new(20.0, 20.0)),
        PlatformEvent::PointerUp,
        PlatformEvent::Close,
    ] {
        events_tx.send(event).await.unwrap();
    }

    // Act
    Scheduler::default()
        .run(session, events_rx, w.choices_rx, std::future::pending())
        .await;

    // Assert – the press above the screen is suppressed
    assert_eq!(
        *log.events.lock().unwrap(),
        vec![
            DeviceEvent::KeyPressed(b'E'),
            DeviceEvent::ConfirmPressed,
            DeviceEvent::DeletePressed,
            DeviceEvent::TouchPressed { x: 5, y: 123 },
            DeviceEvent::TouchDragged { x: 10, y: 118 },
            DeviceEvent::TouchReleased,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_resize_events_recompute_the_surface() {
    let w = wiring(None);
    let renderer = Arc::clone(&w.renderer);
    let session = Session::start(RecordingConsole::new(), w.services, config(WindowSize::new(640.0, 512.0)));
    let (events_tx, events_rx) = mpsc::channel(8);
    events_tx.send(PlatformEvent::Resize(WindowSize::new(100.0, 100.0))).await.unwrap();
    events_tx.send(PlatformEvent::Resize(WindowSize::new(1000.0, 400.0))).await.unwrap();
    events_tx.send(PlatformEvent::Close).await.unwrap();

    Scheduler::default()
        .run(session, events_rx, w.choices_rx, std::future::pending())
        .await;

    assert_eq!(
        *renderer.fits.lock().unwrap(),
        vec![
            DisplayFit { scale: 4, width: 640, height: 512 },
            DisplayFit { scale: 1, width: 160, height: 128 },
            DisplayFit { scale: 3, width: 480, height: 384 },
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_huge_resize_caps_the_scale_and_keeps_running() {
    let w = wiring(None);
    let renderer = Arc::clone(&w.renderer);
    let session = Session::start(RecordingConsole::new(), w.services, config(WindowSize::new(640.0, 512.0)));
    let (events_tx, events_rx) = mpsc::channel(8);
    events_tx.send(PlatformEvent::Resize(WindowSize::new(1e12, 1e12))).await.unwrap();
    events_tx.send(PlatformEvent::Close).await.unwrap();

    Scheduler::default()
        .run(session, events_rx, w.choices_rx, std::future::pending())
        .await;

    let fits = renderer.fits.lock().unwrap();
    assert_eq!(fits.len(), 2);
    assert_eq!(fits[1].scale, u32::MAX / 160);
}

// ── Headless program end-to-end ───────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_headless_program_mounts_preset_disk_and_saves_back_to_it() {
    // Arrange
    let w = wiring(Some(PathBuf::from("/saves/game.nx")));
    w.storage.insert("/saves/game.nx", b"HIGHSCORE 10\n".to_vec());
    let console = HeadlessConsole::new(
        "PRINT \"HI\"".to_string(),
        HeadlessOptions { disk_request_frame: Some(1), disk_save_frame: Some(2) },
    );
    let session = Session::start(console, w.services, config(WindowSize::new(320.0, 256.0)));
    let (_events_tx, events_rx) = mpsc::channel(4);

    // Act – 10 ms ticks for 55 ms
    let summary = Scheduler::new(Duration::from_millis(10))
        .run(session, events_rx, w.choices_rx, tokio::time::sleep(Duration::from_millis(55)))
        .await;

    // Assert
    assert_eq!(summary.mounts, 1);
    assert!(!summary.faulted);
    let writes = w.storage.writes.lock().unwrap();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].0, PathBuf::from("/saves/game.nx"));
    let saved = String::from_utf8(writes[0].1.clone()).unwrap();
    assert!(saved.starts_with("HIGHSCORE 10\nSAVED AT FRAME "));
    assert!(w.errors.kinds().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_headless_empty_program_faults_but_keeps_rendering() {
    let w = wiring(None);
    let renderer = Arc::clone(&w.renderer);
    let console = HeadlessConsole::new(String::new(), HeadlessOptions::default());
    let session = Session::start(console, w.services, config(WindowSize::new(320.0, 256.0)));
    let (_events_tx, events_rx) = mpsc::channel(4);

    let summary = Scheduler::new(Duration::from_millis(10))
        .run(session, events_rx, w.choices_rx, tokio::time::sleep(Duration::from_millis(25)))
        .await;

    assert!(summary.faulted);
    assert_eq!(summary.frames, 3);
    assert_eq!(*renderer.frames.lock().unwrap(), 3);
    assert_eq!(
        w.errors.messages(),
        vec!["program stopped: Program is empty in line 1".to_string()]
    );
}

#[tokio::test(start_paused = true)]
async fn test_piped_script_with_wait_lets_the_program_run_and_mount() {
    // Arrange – the script ends without `close`; the end of input closes it
    let w = wiring(Some(PathBuf::from("/saves/game.nx")));
    w.storage.insert("/saves/game.nx", b"LEVEL 2\n".to_vec());
    let console = HeadlessConsole::new(
        "PRINT \"HI\"".to_string(),
        HeadlessOptions { disk_request_frame: Some(3), disk_save_frame: None },
    );
    let session = Session::start(console, w.services, config(WindowSize::new(320.0, 256.0)));
    let scheduler = Scheduler::new(Duration::from_millis(10));
    let (events_tx, events_rx) = mpsc::channel(16);
    let script: &[u8] = b"key down 123\nkey up 123\npointer down 10 10\npointer up\nwait 10\n";
    let reader = tokio::spawn(pump_events(script, events_tx, scheduler.interval()));

    // Act
    let summary = scheduler
        .run(session, events_rx, w.choices_rx, std::future::pending())
        .await;

    // Assert
    assert!(summary.frames >= 10, "ran {} frames", summary.frames);
    assert_eq!(summary.mounts, 1);
    assert!(w.errors.kinds().is_empty());
    reader.await.unwrap();
}
