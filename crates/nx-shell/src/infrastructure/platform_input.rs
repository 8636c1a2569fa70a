//! Platform events read from a line-oriented text stream.
//!
//! The headless binary has no window, so its keyboard, pointer and window
//! events arrive on stdin, one per line:
//!
//! ```text
//! key down 123 z        # physical key code, then the typed characters
//! key down 36 <ret>     # <ret> = "\r", <del> = "\u{7F}", <space> = " "
//! key up 123
//! pointer down 10 20    # view coordinates, y grows upward
//! pointer move 12.5 20
//! pointer up
//! resize 800 600
//! wait 30               # let 30 frames run before reading on
//! close
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.  A line that does not
//! parse is logged and skipped.  The end of the stream counts as `close`, so a
//! piped script that wants the program to run for a while ends with `wait`.

use std::time::Duration;

use nx_core::{PlatformEvent, ViewPoint, WindowSize};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Why an input line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputParseError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),

    #[error("unexpected trailing input '{0}'")]
    TrailingInput(String),
}

/// One parsed line of the input script.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptLine {
    /// A platform event for the session.
    Event(PlatformEvent),
    /// Pause reading for this many frames.
    Wait(u32),
}

/// Parses one line.  Returns `Ok(None)` for blank and comment lines.
///
/// # Errors
///
/// Returns an [`InputParseError`] describing the first problem in the line.
pub fn parse_line(line: &str) -> Result<Option<ScriptLine>, InputParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default();
    let parsed = match (command, words.next()) {
        ("wait", frames) => {
            let frames = frames.ok_or(InputParseError::MissingArgument {
                command: "wait",
                argument: "a frame count",
            })?;
            ScriptLine::Wait(
                frames
                    .parse()
                    .map_err(|_| InputParseError::InvalidNumber(frames.to_string()))?,
            )
        }
        (command, argument) => ScriptLine::Event(parse_event(command, argument, &mut words)?),
    };

    match words.next() {
        Some(extra) => Err(InputParseError::TrailingInput(extra.to_string())),
        None => Ok(Some(parsed)),
    }
}

fn parse_event<'a>(
    command: &str,
    argument: Option<&'a str>,
    words: &mut impl Iterator<Item = &'a str>,
) -> Result<PlatformEvent, InputParseError> {
    let event = match (command, argument) {
        ("key", Some("down")) => {
            let code = code(words.next(), "key down")?;
            let characters = words.next().map(decode_characters).unwrap_or_default();
            PlatformEvent::KeyDown { code, characters }
        }
        ("key", Some("up")) => PlatformEvent::KeyUp {
            code: code(words.next(), "key up")?,
        },
        ("pointer", Some("down")) => PlatformEvent::PointerDown(point(words, "pointer down")?),
        ("pointer", Some("move")) => PlatformEvent::PointerMove(point(words, "pointer move")?),
        ("pointer", Some("up")) => PlatformEvent::PointerUp,
        ("resize", width) => {
            let width = number(width, "resize", "a width")?;
            let height = number(words.next(), "resize", "a height")?;
            PlatformEvent::Resize(WindowSize::new(width, height))
        }
        ("close", None) => PlatformEvent::Close,
        ("key" | "pointer", Some(other)) => {
            return Err(InputParseError::UnknownCommand(format!("{command} {other}")))
        }
        ("key", None) => {
            return Err(InputParseError::MissingArgument {
                command: "key",
                argument: "'down' or 'up'",
            })
        }
        ("pointer", None) => {
            return Err(InputParseError::MissingArgument {
                command: "pointer",
                argument: "'down', 'move' or 'up'",
            })
        }
        ("close", Some(extra)) => return Err(InputParseError::TrailingInput(extra.to_string())),
        _ => return Err(InputParseError::UnknownCommand(command.to_string())),
    };
    Ok(event)
}

fn code(word: Option<&str>, command: &'static str) -> Result<u16, InputParseError> {
    let word = word.ok_or(InputParseError::MissingArgument {
        command,
        argument: "a key code",
    })?;
    word.parse()
        .map_err(|_| InputParseError::InvalidNumber(word.to_string()))
}

fn number(
    word: Option<&str>,
    command: &'static str,
    argument: &'static str,
) -> Result<f64, InputParseError> {
    let word = word.ok_or(InputParseError::MissingArgument { command, argument })?;
    match word.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(InputParseError::InvalidNumber(word.to_string())),
    }
}

fn point<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
) -> Result<ViewPoint, InputParseError> {
    let x = number(words.next(), command, "an x coordinate")?;
    let y = number(words.next(), command, "a y coordinate")?;
    Ok(ViewPoint::new(x, y))
}

fn decode_characters(word: &str) -> String {
    match word {
        "<ret>" => "\r".to_string(),
        "<del>" => "\u{7F}".to_string(),
        "<space>" => " ".to_string(),
        other => other.to_string(),
    }
}

/// Forwards every event parsed from `reader` to `events`.
///
/// A `wait n` line sleeps for `n` frames of length `frame`.  Sends `Close` at
/// the end of the stream.  Stops early when the receiver is gone.
pub async fn pump_events<R>(reader: R, events: mpsc::Sender<PlatformEvent>, frame: Duration)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!("platform input failed: {e}");
                break;
            }
        };
        match parse_line(&line) {
            Ok(Some(ScriptLine::Event(event))) => {
                if events.send(event).await.is_err() {
                    debug!("session ended; platform input stopped");
                    return;
                }
            }
            Ok(Some(ScriptLine::Wait(frames))) => {
                tokio::time::sleep(frame.saturating_mul(frames)).await;
            }
            Ok(None) => {}
            Err(e) => warn!(line = %line, "ignoring input: {e}"),
        }
    }
    let _ = events.send(PlatformEvent::Close).await;
}

/// Spawns a task that reads platform events from stdin.  `frame` is the
/// scheduler's tick interval, used by `wait` lines.
pub fn spawn_stdin_reader(events: mpsc::Sender<PlatformEvent>, frame: Duration) -> JoinHandle<()> {
    tokio::spawn(pump_events(BufReader::new(tokio::io::stdin()), events, frame))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
