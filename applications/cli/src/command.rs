//! Line-based command input
//!
//! Each line typed at the prompt becomes a [`Command`]: an intent for the
//! session, or something the host handles itself (advancing simulated time,
//! help, quitting).

use crate::error::{CliError, Result};
use flow_core::{FileDescriptor, TrackId};
use flow_session::{Intent, View};
use std::path::{Path, PathBuf};

/// One parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Forward to the session
    Intent(Intent),
    /// Register files from disk
    Import(Vec<PathBuf>),
    /// Advance simulated playback by this many seconds
    Tick(f64),
    /// Print the player surfaces
    Status,
    Help,
    Quit,
}

/// Longest stretch of simulated time one `tick` may cover
pub const MAX_TICK_SECONDS: f64 = 86_400.0;

pub const HELP: &str = "\
Navigation:  home | playlists | favorites | local | library [songs|albums|artists|playlists]
Search:      search <query> | clear
Playback:    play [track-id] | pause | next | prev | shuffle | repeat
             seek <percent> | vol <percent> | mute | queue <position>
             local <url>
Library:     like [track-id] | new <name> [| description] | import <path>...
Simulation:  tick [seconds] | status
Raw:         intent <json>
Other:       help | quit";

/// Parse one input line; blank lines yield `None`
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let intent = match word.to_lowercase().as_str() {
        "home" | "playlists" | "favorites" | "local" if rest.is_empty() => {
            Intent::Navigate(parse_view(word)?)
        }
        "library" | "lib" => {
            let view = if rest.is_empty() {
                "library".to_string()
            } else {
                format!("library/{}", rest)
            };
            Intent::Navigate(parse_view(&view)?)
        }
        "go" => Intent::Navigate(parse_view(rest)?),
        "search" | "/" => Intent::Search(rest.to_string()),
        "clear" => Intent::ClearSearch,
        "play" | "p" => {
            if rest.is_empty() {
                Intent::TogglePlay
            } else {
                Intent::PlayTrack(TrackId::new(rest))
            }
        }
        "local" => Intent::PlayLocalFile(rest.to_string()),
        "pause" => Intent::Pause,
        "next" | "n" => Intent::Next,
        "prev" | "previous" => Intent::Previous,
        "shuffle" => Intent::ToggleShuffle,
        "repeat" => Intent::CycleRepeat,
        "seek" => Intent::Seek(parse_percent(rest)?),
        "vol" | "volume" => Intent::SetVolume(parse_percent(rest)? as f32),
        "mute" => Intent::ToggleMute,
        "like" => {
            if rest.is_empty() {
                Intent::ToggleFavoriteCurrent
            } else {
                Intent::ToggleFavorite(TrackId::new(rest))
            }
        }
        "new" => {
            let (name, description) = rest.split_once('|').unwrap_or((rest, ""));
            Intent::CreatePlaylist {
                name: name.trim().to_string(),
                description: description.trim().to_string(),
            }
        }
        "queue" => {
            let position: usize = rest
                .parse()
                .map_err(|_| CliError::BadArgument(format!("queue position {:?}", rest)))?;
            let index = position
                .checked_sub(1)
                .ok_or_else(|| CliError::BadArgument("queue positions start at 1".to_string()))?;
            Intent::JumpToQueueIndex(index)
        }
        "intent" => serde_json::from_str(rest)?,
        "import" => {
            if rest.is_empty() {
                return Err(CliError::BadArgument("import needs at least one path".to_string()));
            }
            return Ok(Some(Command::Import(
                rest.split_whitespace().map(PathBuf::from).collect(),
            )));
        }
        "tick" | "t" => {
            let seconds = if rest.is_empty() {
                1.0
            } else {
                parse_seconds(rest)?
            };
            return Ok(Some(Command::Tick(seconds)));
        }
        "status" | "s" => return Ok(Some(Command::Status)),
        "help" | "?" => return Ok(Some(Command::Help)),
        "quit" | "exit" | "q" => return Ok(Some(Command::Quit)),
        _ => return Err(CliError::UnknownCommand(word.to_string())),
    };

    Ok(Some(Command::Intent(intent)))
}

fn parse_seconds(text: &str) -> Result<f64> {
    let seconds: f64 = text
        .parse()
        .map_err(|_| CliError::BadArgument(format!("seconds {:?}", text)))?;

    if !seconds.is_finite() || !(0.0..=MAX_TICK_SECONDS).contains(&seconds) {
        return Err(CliError::BadArgument(format!(
            "seconds must be a finite number up to {}",
            MAX_TICK_SECONDS
        )));
    }
    Ok(seconds)
}

fn parse_view(text: &str) -> Result<View> {
    text.to_lowercase()
        .parse()
        .map_err(|e: flow_core::FlowError| CliError::BadArgument(e.to_string()))
}

/// `0`-`100` to a `0.0`-`1.0` fraction
fn parse_percent(text: &str) -> Result<f64> {
    let percent: f64 = text
        .trim_end_matches('%')
        .parse()
        .map_err(|_| CliError::BadArgument(format!("percentage {:?}", text)))?;

    if !(0.0..=100.0).contains(&percent) {
        return Err(CliError::BadArgument(format!("{} is not within 0-100", percent)));
    }
    Ok(percent / 100.0)
}

/// Describe a file on disk the way a browser file picker would
///
/// The MIME type is guessed from the extension.
pub fn describe_file(path: &Path) -> Result<FileDescriptor> {
    let metadata = std::fs::metadata(path)?;
    let absolute = path.canonicalize()?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| absolute.display().to_string());
    let mime_type = mime_guess::from_path(path)
        .first()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_default();

    Ok(FileDescriptor {
        name,
        size: metadata.len(),
        mime_type,
        url: format!("file://{}", absolute.display()),
    })
}
