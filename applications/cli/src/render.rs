//! Plain-text rendering of session signals

use flow_core::RepeatMode;
use flow_session::{
    LibraryContent, PlayerSurfaces, Severity, Signal, TrackRow, ViewPayload,
};
use std::io::{self, Write};

/// Write one signal to `out`
pub fn write_signal(out: &mut impl Write, signal: &Signal) -> io::Result<()> {
    match signal {
        Signal::Render { payload } => write_view(out, payload),
        Signal::Transport { surfaces } => write_player(out, surfaces),
        Signal::Toast { message, severity } => {
            let marker = match severity {
                Severity::Success => "✓",
                Severity::Error => "✗",
                Severity::Info => "i",
            };
            writeln!(out, "[{}] {}", marker, message)
        }
    }
}

fn write_view(out: &mut impl Write, payload: &ViewPayload) -> io::Result<()> {
    match payload {
        ViewPayload::Home {
            recently_played,
            top_artists,
            made_for_you,
            trending,
        } => {
            writeln!(out, "== Home ==")?;
            write_rows(out, "Recently played", recently_played)?;
            writeln!(out, "Top artists:")?;
            for artist in top_artists {
                writeln!(out, "  {}", artist.name)?;
            }
            writeln!(out, "Made for you:")?;
            for playlist in made_for_you {
                writeln!(out, "  {} - {}", playlist.name, playlist.description)?;
            }
            write_rows(out, "Trending", trending)
        }
        ViewPayload::Playlists { playlists, .. } => {
            writeln!(out, "== Playlists ==")?;
            for playlist in playlists {
                writeln!(out, "  {} ({})", playlist.name, playlist.id)?;
            }
            Ok(())
        }
        ViewPayload::Favorites {
            tracks,
            suggestions,
        } => {
            writeln!(out, "== Favorites ==")?;
            if *suggestions {
                writeln!(out, "No favorites yet. Some songs you might like:")?;
            }
            write_rows(out, "Songs", tracks)
        }
        ViewPayload::Library { content } => {
            writeln!(out, "== Library / {} ==", content.tab().as_str())?;
            match content {
                LibraryContent::Songs(rows) => write_rows(out, "Songs", rows),
                LibraryContent::Albums(albums) => {
                    for album in albums {
                        writeln!(out, "  {} - {}", album.title, album.artist)?;
                    }
                    Ok(())
                }
                LibraryContent::Artists(artists) => {
                    for artist in artists {
                        writeln!(out, "  {}", artist.name)?;
                    }
                    Ok(())
                }
                LibraryContent::Playlists(playlists) => {
                    if playlists.is_empty() {
                        writeln!(out, "  No playlists yet")?;
                    }
                    for playlist in playlists {
                        writeln!(out, "  {}", playlist.name)?;
                    }
                    Ok(())
                }
            }
        }
        ViewPayload::Local { files } => {
            writeln!(out, "== Local files ==")?;
            if files.is_empty() {
                writeln!(out, "  No local files. Use `import <path>` to add some.")?;
            }
            for row in files {
                writeln!(out, "  {} ({}) {}", row.file.name, row.size_label, row.file.url)?;
            }
            Ok(())
        }
        ViewPayload::Search { query, results } => {
            writeln!(out, "== Search: {} ==", query)?;
            if results.is_empty() {
                return writeln!(out, "No results found");
            }
            for song in &results.songs {
                writeln!(out, "  [{}] {} - {}", song.id, song.title, song.artist)?;
            }
            for artist in &results.artists {
                writeln!(out, "  artist: {}", artist.name)?;
            }
            for album in &results.albums {
                writeln!(out, "  album: {} - {}", album.title, album.artist)?;
            }
            for playlist in &results.playlists {
                writeln!(out, "  playlist: {}", playlist.name)?;
            }
            Ok(())
        }
    }
}

fn write_rows(out: &mut impl Write, heading: &str, rows: &[TrackRow]) -> io::Result<()> {
    writeln!(out, "{}:", heading)?;
    for row in rows {
        let heart = if row.is_favorite { "♥" } else { " " };
        writeln!(
            out,
            "  {} [{}] {} - {} ({})",
            heart, row.track.id, row.track.title, row.track.artist, row.track.duration
        )?;
    }
    Ok(())
}

/// Mini-player line plus the queue panel
pub fn write_player(out: &mut impl Write, surfaces: &PlayerSurfaces) -> io::Result<()> {
    let transport = &surfaces.transport;

    let state = if transport.is_playing { "▶" } else { "⏸" };
    let title = surfaces
        .display_track
        .as_ref()
        .map_or_else(|| "Nothing playing".to_string(), |t| format!("{} - {}", t.title, t.artist));
    let heart = if surfaces.is_favorite { " ♥" } else { "" };

    let mut flags = Vec::new();
    if transport.shuffle {
        flags.push("shuffle".to_string());
    }
    match transport.repeat {
        RepeatMode::None => {}
        mode => flags.push(format!("repeat {}", mode.as_str())),
    }
    if transport.muted {
        flags.push("muted".to_string());
    } else {
        flags.push(format!("vol {:.0}%", transport.volume * 100.0));
    }

    writeln!(
        out,
        "{} {}{} {}/{} [{}]",
        state,
        title,
        heart,
        surfaces.position_label,
        surfaces.duration_label,
        flags.join(", ")
    )?;

    if !surfaces.queue.upcoming.is_empty() {
        let next: Vec<_> = surfaces.queue.upcoming.iter().map(|t| t.title.as_str()).collect();
        writeln!(out, "  up next: {}", next.join(", "))?;
    }
    Ok(())
}
