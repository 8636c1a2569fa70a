//! LowRes NX shell entry point.
//!
//! Wires the headless console, the disk services and the stdin event reader
//! into a session, then runs the scheduler until the window closes (end of
//! stdin or a `close` line) or Ctrl-C is pressed.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()            -- shell.toml, CLI overrides
//!  └─ Session::start()         -- core + delegate bridge + input translator
//!  └─ spawn_stdin_reader()     -- platform events  ──┐
//!  └─ SpawningPrompter         -- disk choices     ──┤
//!  └─ Scheduler::run()         -- ticks at 30 Hz  ◀──┘
//! ```
//!
//! # Usage
//!
//! ```text
//! nx-shell games/demo.nx --disk saves/demo.nx --disk-request-frame 30
//! ```
//!
//! then type `key down 123`, `pointer down 40 40`, `wait 30`, `close` and so on.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use nx_core::WindowSize;
use nx_shell::application::scheduler::Scheduler;
use nx_shell::application::session::{Session, SessionConfig, SessionServices};
use nx_shell::infrastructure::chooser::{PresetDiskChooser, SpawningPrompter};
use nx_shell::infrastructure::config::{load_config, ShellConfig};
use nx_shell::infrastructure::console::{HeadlessConsole, HeadlessOptions};
use nx_shell::infrastructure::platform_input::spawn_stdin_reader;
use nx_shell::infrastructure::storage::FsDiskStorage;
use nx_shell::infrastructure::surface::{TracingErrorSurface, TracingRenderer};

/// Platform events buffered between the stdin reader and the scheduler.
const EVENT_QUEUE_DEPTH: usize = 64;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Command-line arguments.  Every option can also come from the environment.
#[derive(Debug, Parser)]
#[command(
    name = "nx-shell",
    about = "Runs a LowRes NX program with keyboard, pointer and disk support",
    version
)]
struct Cli {
    /// The program to run.
    program: PathBuf,

    /// Config file to use instead of the platform default.
    #[arg(long, env = "NX_SHELL_CONFIG")]
    config: Option<PathBuf>,

    /// Disk image offered when the program asks for its disk.  Without it the
    /// user declines and `disk.<ext>` next to the program is used.
    #[arg(long, env = "NX_SHELL_DISK")]
    disk: Option<PathBuf>,

    /// Frames per second, overriding the config file.
    #[arg(long, env = "NX_SHELL_TICK_RATE")]
    tick_rate: Option<u32>,

    /// Initial window width in pixels, overriding the config file.
    #[arg(long, env = "NX_SHELL_WIDTH")]
    width: Option<u32>,

    /// Initial window height in pixels, overriding the config file.
    #[arg(long, env = "NX_SHELL_HEIGHT")]
    height: Option<u32>,

    /// Frame on which the headless program first accesses its disk.
    #[arg(long, env = "NX_SHELL_DISK_REQUEST_FRAME")]
    disk_request_frame: Option<u64>,

    /// Frame on which the headless program saves its disk.
    #[arg(long, env = "NX_SHELL_DISK_SAVE_FRAME")]
    disk_save_frame: Option<u64>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let launched = Instant::now();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).context("could not load configuration")?;

    // `RUST_LOG` wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    let runtime = tokio::runtime::Runtime::new().context("could not start the async runtime")?;
    let result = runtime.block_on(run(cli, config, launched));
    // A pending stdin read cannot be cancelled; do not wait for it.
    runtime.shutdown_background();
    result
}

async fn run(cli: Cli, config: ShellConfig, launched: Instant) -> anyhow::Result<()> {
    info!(program = %cli.program.display(), "LowRes NX shell starting");

    let source = std::fs::read_to_string(&cli.program)
        .with_context(|| format!("could not read program {}", cli.program.display()))?;

    let console = HeadlessConsole::new(
        source,
        HeadlessOptions {
            disk_request_frame: cli.disk_request_frame,
            disk_save_frame: cli.disk_save_frame,
        },
    );

    // ── Channels ──────────────────────────────────────────────────────────────
    let (event_tx, event_rx) = mpsc::channel(EVENT_QUEUE_DEPTH);
    let (choice_tx, choice_rx) = mpsc::unbounded_channel();

    // ── Services ──────────────────────────────────────────────────────────────
    let services = SessionServices {
        storage: Arc::new(FsDiskStorage::new()),
        prompter: Arc::new(SpawningPrompter::new(
            Arc::new(PresetDiskChooser::new(cli.disk.clone())),
            choice_tx,
        )),
        errors: Arc::new(TracingErrorSurface::new()),
        renderer: Arc::new(TracingRenderer::new()),
    };

    let session_config = SessionConfig {
        program: cli.program.clone(),
        disk_extension: config.disk.extension.clone(),
        window: WindowSize::new(
            f64::from(cli.width.unwrap_or(config.display.window_width)),
            f64::from(cli.height.unwrap_or(config.display.window_height)),
        ),
        seconds_since_power_on: launched.elapsed().as_secs(),
    };

    let scheduler = Scheduler::from_rate(cli.tick_rate.unwrap_or(config.scheduler.tick_rate_hz));
    let session = Session::start(console, services, session_config);
    let _reader = spawn_stdin_reader(event_tx, scheduler.interval());

    // ── Ctrl-C ────────────────────────────────────────────────────────────────
    let shutdown = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("shutdown signal received"),
            Err(e) => {
                error!("failed to listen for Ctrl-C: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    info!("LowRes NX shell ready. Reading platform events from stdin.");

    let summary = scheduler.run(session, event_rx, choice_rx, shutdown).await;

    info!(
        frames = summary.frames,
        faulted = summary.faulted,
        mounts = summary.mounts,
        "LowRes NX shell stopped"
    );
    Ok(())
}
