//! Player session
//!
//! Owns the transport controller, the user's library and the catalog, and
//! turns intents from the view layer into state changes and signals.

use crate::catalog::{Catalog, PlaylistCard};
use crate::intent::{Intent, LibraryTab, View};
use crate::library::{self, Favorites};
use crate::signal::{
    LibraryContent, LocalFileRow, PlayerSurfaces, QueuePanel, Signal, TrackRow, ViewPayload,
};
use chrono::Utc;
use flow_core::{
    FileDescriptor, FlowError, KeyValueStore, LocalFile, MediaResource, Playlist, Result, Track,
    TrackId,
};
use flow_playback::{Direction, PlaybackConfig, TransportController, TransportEvent};
use flow_storage::PersistenceGateway;
use tracing::{debug, info, warn};

/// Minimum query length (in characters) that triggers a search
const MIN_SEARCH_CHARS: usize = 3;

/// User playlists listed in the sidebar
const SIDEBAR_PLAYLISTS: usize = 5;

/// One player instance
///
/// Constructed explicitly by the host; there is no global player.
pub struct PlayerSession<M: MediaResource, S: KeyValueStore> {
    controller: TransportController<M>,
    gateway: PersistenceGateway<S>,
    catalog: Catalog,

    favorites: Favorites,
    playlists: Vec<Playlist>,
    local_files: Vec<LocalFile>,

    // Shown in the player until something is loaded; first `play` candidate
    last_track: Option<Track>,

    current_view: View,
    search_query: Option<String>,

    // Keeps synthesized local-file ids unique within a millisecond
    last_local_stamp: i64,
}

impl<M: MediaResource, S: KeyValueStore> PlayerSession<M, S> {
    /// Create a session over the sample catalog
    ///
    /// Loads persisted state from `store`. A stored volume overrides
    /// `config.volume`.
    pub fn new(media: M, store: S, config: PlaybackConfig) -> Self {
        Self::with_catalog(media, store, config, Catalog::sample())
    }

    pub fn with_catalog(media: M, store: S, config: PlaybackConfig, catalog: Catalog) -> Self {
        let gateway = PersistenceGateway::new(store);
        let snapshot = gateway.load();

        let config = PlaybackConfig {
            volume: snapshot.volume.unwrap_or(config.volume),
            ..config
        };

        info!(
            favorites = snapshot.favorites.len(),
            playlists = snapshot.playlists.len(),
            local_files = snapshot.local_files.len(),
            volume = config.volume,
            "Player session started"
        );

        Self {
            controller: TransportController::new(media, config),
            gateway,
            catalog,
            favorites: Favorites::from_tracks(snapshot.favorites),
            playlists: snapshot.playlists,
            local_files: snapshot.local_files,
            last_track: snapshot.last_track,
            current_view: View::Home,
            search_query: None,
            last_local_stamp: 0,
        }
    }

    /// Signals for the first paint: home view and player surfaces
    pub fn start(&mut self) -> Vec<Signal> {
        self.controller.drain_events();
        vec![
            Signal::render(self.view_payload(self.current_view)),
            self.transport_signal(),
        ]
    }

    /// Handle one intent
    ///
    /// Transitions happen synchronously. If the transport changed, the
    /// returned signals end with exactly one transport signal.
    pub fn dispatch(&mut self, intent: Intent) -> Vec<Signal> {
        debug!(?intent, "Dispatching intent");

        let mut signals = match intent {
            Intent::Navigate(view) => vec![self.navigate(view)],
            Intent::Search(query) => self.search(&query).into_iter().collect(),
            Intent::ClearSearch => vec![self.clear_search()],
            Intent::PlayTrack(id) => match self.play_track(&id) {
                Ok(()) => Vec::new(),
                Err(e) => {
                    debug!(track_id = %id, error = %e, "Cannot play track");
                    vec![Signal::error("Track not available")]
                }
            },
            Intent::PlayLocalFile(url) => {
                self.play_local_file(&url);
                Vec::new()
            }
            Intent::TogglePlay => {
                let context = self.browsing_context();
                ignore_empty(self.controller.toggle_play(&context));
                Vec::new()
            }
            Intent::Pause => {
                self.controller.pause();
                Vec::new()
            }
            Intent::Next => {
                ignore_empty(self.controller.advance(Direction::Next));
                Vec::new()
            }
            Intent::Previous => {
                ignore_empty(self.controller.advance(Direction::Previous));
                Vec::new()
            }
            Intent::ToggleShuffle => {
                self.controller.toggle_shuffle();
                Vec::new()
            }
            Intent::CycleRepeat => {
                self.controller.cycle_repeat();
                Vec::new()
            }
            Intent::Seek(fraction) => {
                self.controller.seek(fraction);
                Vec::new()
            }
            Intent::SetVolume(volume) => {
                self.controller.set_volume(volume);
                Vec::new()
            }
            Intent::ToggleMute => {
                self.controller.toggle_mute();
                Vec::new()
            }
            Intent::ToggleFavorite(id) => self.favorite_signals(&id),
            Intent::ToggleFavoriteCurrent => {
                let current = self.display_track().map(|t| t.id.clone());
                match current {
                    Some(id) => self.favorite_signals(&id),
                    None => Vec::new(),
                }
            }
            Intent::CreatePlaylist { name, description } => {
                match self.create_playlist(&name, &description) {
                    Ok(playlist) => vec![
                        Signal::render(self.view_payload(View::Playlists)),
                        Signal::success(format!("Playlist \"{}\" created", playlist.name)),
                    ],
                    Err(e) => vec![Signal::error(invalid_input_message(e))],
                }
            }
            Intent::ImportFiles(files) => {
                let offered = files.len();
                self.import_files(files);
                vec![
                    Signal::render(self.view_payload(View::Local)),
                    Signal::success(format!("{} file(s) added", offered)),
                ]
            }
            Intent::JumpToQueueIndex(index) => {
                if let Err(e) = self.controller.jump(index) {
                    warn!(index, error = %e, "Queue selection out of range");
                }
                Vec::new()
            }
            Intent::Media(status) => {
                self.controller.on_media_event(status);
                Vec::new()
            }
        };

        if self.controller.has_pending_events() {
            self.flush_transport_events();
            signals.push(self.transport_signal());
        }

        signals
    }

    // ===== Navigation & Search =====

    /// Show a view; leaves any active search
    pub fn navigate(&mut self, view: View) -> Signal {
        self.current_view = view;
        self.search_query = None;
        Signal::render(self.view_payload(view))
    }

    /// Search the catalog
    ///
    /// Empty input re-renders the current view. One or two characters do
    /// nothing.
    pub fn search(&mut self, query: &str) -> Option<Signal> {
        let length = query.chars().count();

        if length == 0 {
            return Some(self.clear_search());
        }
        if length < MIN_SEARCH_CHARS {
            return None;
        }

        self.search_query = Some(query.to_string());
        Some(self.search_payload(query))
    }

    pub fn clear_search(&mut self) -> Signal {
        self.search_query = None;
        Signal::render(self.view_payload(self.current_view))
    }

    // ===== Playback =====

    /// Load a track by id
    ///
    /// Looked up in the catalog, then favorites, then the queue.
    pub fn play_track(&mut self, id: &TrackId) -> Result<()> {
        let track = self
            .find_track(id)
            .cloned()
            .ok_or_else(|| FlowError::not_found("Track", id.as_str()))?;

        self.controller.load_track(track);
        Ok(())
    }

    /// Load an imported file by its URL
    pub fn play_local_file(&mut self, url: &str) {
        let stamp = Utc::now().timestamp_millis().max(self.last_local_stamp + 1);
        self.last_local_stamp = stamp;

        self.controller.load_track(Track::local(url, stamp));
    }

    fn find_track(&self, id: &TrackId) -> Option<&Track> {
        self.catalog
            .find_track(id)
            .or_else(|| self.favorites.get(id))
            .or_else(|| self.controller.queue().find(id))
    }

    /// Tracks `play` falls back to when nothing is loaded
    ///
    /// The last played track comes first, then what the current view lists.
    fn browsing_context(&self) -> Vec<Track> {
        let mut context: Vec<Track> = self.last_track.iter().cloned().collect();

        match self.current_view {
            View::Favorites if !self.favorites.is_empty() => {
                context.extend_from_slice(self.favorites.tracks());
            }
            _ => context.extend_from_slice(self.catalog.songs()),
        }

        context
    }

    // ===== Favorites =====

    /// Flip favorite membership
    ///
    /// Returns whether the track is now a favorite.
    ///
    /// # Errors
    ///
    /// [`FlowError::NotFound`] when adding an id that is not in the catalog,
    /// the queue or the player. Nothing changes in that case.
    pub fn toggle_favorite(&mut self, id: &TrackId) -> Result<bool> {
        let now_favorite = if self.favorites.remove(id).is_some() {
            false
        } else {
            let track = self
                .catalog
                .find_track(id)
                .or_else(|| self.controller.queue().find(id))
                .or_else(|| self.controller.current_track().filter(|t| &t.id == id))
                .or_else(|| self.last_track.as_ref().filter(|t| &t.id == id))
                .cloned()
                .ok_or_else(|| FlowError::not_found("Track", id.as_str()))?;
            self.favorites.insert(track);
            true
        };

        debug!(track_id = %id, now_favorite, "Toggled favorite");
        if let Err(e) = self.gateway.save_favorites(self.favorites.tracks()) {
            warn!(error = %e, "Failed to persist favorites");
        }

        Ok(now_favorite)
    }

    fn favorite_signals(&mut self, id: &TrackId) -> Vec<Signal> {
        match self.toggle_favorite(id) {
            Ok(now_favorite) => {
                let message = if now_favorite {
                    "Added to favorites"
                } else {
                    "Removed from favorites"
                };
                vec![
                    self.render_current(),
                    Signal::success(message),
                    self.transport_signal(),
                ]
            }
            Err(e) => {
                debug!(track_id = %id, error = %e, "Cannot favorite track");
                vec![Signal::error("Track not available")]
            }
        }
    }

    pub fn is_favorite(&self, id: &TrackId) -> bool {
        self.favorites.contains(id)
    }

    // ===== Library =====

    /// Create a playlist from dialog input
    ///
    /// # Errors
    ///
    /// [`FlowError::InvalidInput`] for a blank name; nothing is stored.
    pub fn create_playlist(&mut self, name: &str, description: &str) -> Result<Playlist> {
        let playlist = library::new_playlist(name, description)?;
        info!(playlist_id = %playlist.id, name = %playlist.name, "Created playlist");

        self.playlists.push(playlist.clone());
        if let Err(e) = self.gateway.save_playlists(&self.playlists) {
            warn!(error = %e, "Failed to persist playlists");
        }

        Ok(playlist)
    }

    /// Register dropped or picked files; non-audio files are skipped
    ///
    /// Returns how many were registered.
    pub fn import_files(&mut self, files: Vec<FileDescriptor>) -> usize {
        let offered = files.len();
        let imported = library::import_audio_files(files, Utc::now());
        let count = imported.len();

        info!(offered, imported = count, "Imported local files");
        self.local_files.extend(imported);
        if let Err(e) = self.gateway.save_local_files(&self.local_files) {
            warn!(error = %e, "Failed to persist local files");
        }

        count
    }

    // ===== Transport Events =====

    fn flush_transport_events(&mut self) {
        for event in self.controller.drain_events() {
            if !event.needs_persist() {
                continue;
            }

            let result = match event {
                TransportEvent::TrackLoaded { track, .. } => {
                    let result = self.gateway.save_last_track(&track);
                    self.last_track = Some(track);
                    result
                }
                TransportEvent::VolumeChanged { volume } => self.gateway.save_volume(volume),
                _ => Ok(()),
            };

            if let Err(e) = result {
                warn!(error = %e, "Failed to persist transport state");
            }
        }
    }

    fn transport_signal(&self) -> Signal {
        Signal::Transport {
            surfaces: Box::new(self.surfaces()),
        }
    }

    /// Current state of every player surface
    pub fn surfaces(&self) -> PlayerSurfaces {
        let queue = self.controller.queue();
        let panel = QueuePanel {
            upcoming: queue.upcoming().to_vec(),
            recently_played: queue.recently_played().into_iter().cloned().collect(),
        };

        let display_track = self.display_track().cloned();
        let is_favorite = display_track
            .as_ref()
            .is_some_and(|t| self.favorites.contains(&t.id));

        PlayerSurfaces::new(self.controller.snapshot(), display_track, is_favorite, panel)
    }

    fn display_track(&self) -> Option<&Track> {
        self.controller
            .current_track()
            .or(self.last_track.as_ref())
    }

    // ===== View Payloads =====

    fn render_current(&self) -> Signal {
        match &self.search_query {
            Some(query) => self.search_payload(query),
            None => Signal::render(self.view_payload(self.current_view)),
        }
    }

    fn search_payload(&self, query: &str) -> Signal {
        Signal::render(ViewPayload::Search {
            query: query.to_string(),
            results: self.catalog.search(query),
        })
    }

    /// Build the payload for `view`
    pub fn view_payload(&self, view: View) -> ViewPayload {
        let songs = self.catalog.songs();

        match view {
            View::Home => ViewPayload::Home {
                recently_played: self.rows(songs.iter().take(8)),
                top_artists: self.catalog.artists().to_vec(),
                made_for_you: self.catalog.playlists().iter().take(5).cloned().collect(),
                trending: self.rows(songs.iter().take(6)),
            },
            View::Playlists => {
                let user: Vec<PlaylistCard> = self.playlists.iter().map(PlaylistCard::from).collect();
                let sidebar = user.iter().take(SIDEBAR_PLAYLISTS).cloned().collect();

                let mut playlists = user;
                playlists.push(PlaylistCard::liked_songs());
                playlists.extend_from_slice(self.catalog.playlists());

                ViewPayload::Playlists { playlists, sidebar }
            }
            View::Favorites => {
                if self.favorites.is_empty() {
                    ViewPayload::Favorites {
                        tracks: self.rows(songs.iter().take(10)),
                        suggestions: true,
                    }
                } else {
                    ViewPayload::Favorites {
                        tracks: self.rows(self.favorites.tracks().iter()),
                        suggestions: false,
                    }
                }
            }
            View::Library(tab) => ViewPayload::Library {
                content: match tab {
                    LibraryTab::Songs => LibraryContent::Songs(self.rows(songs.iter())),
                    LibraryTab::Albums => LibraryContent::Albums(self.catalog.albums().to_vec()),
                    LibraryTab::Artists => LibraryContent::Artists(self.catalog.artists().to_vec()),
                    LibraryTab::Playlists => LibraryContent::Playlists(
                        self.playlists.iter().map(PlaylistCard::from).collect(),
                    ),
                },
            },
            View::Local => ViewPayload::Local {
                files: self.local_files.iter().map(LocalFileRow::from).collect(),
            },
        }
    }

    fn rows<'a>(&self, tracks: impl Iterator<Item = &'a Track>) -> Vec<TrackRow> {
        tracks
            .map(|track| TrackRow {
                is_favorite: self.favorites.contains(&track.id),
                track: track.clone(),
            })
            .collect()
    }

    // ===== State Queries =====

    pub fn controller(&self) -> &TransportController<M> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut TransportController<M> {
        &mut self.controller
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn local_files(&self) -> &[LocalFile] {
        &self.local_files
    }

    /// Last loaded track (persisted across sessions)
    pub fn last_track(&self) -> Option<&Track> {
        self.last_track.as_ref()
    }

    pub fn current_view(&self) -> View {
        self.current_view
    }

    /// Active search query, if the search view is showing
    pub fn search_query(&self) -> Option<&str> {
        self.search_query.as_deref()
    }

    pub fn store(&self) -> &S {
        self.gateway.store()
    }
}

/// Nothing to play is not an error worth surfacing
fn ignore_empty(result: flow_playback::Result<()>) {
    if let Err(e) = result {
        debug!(error = %e, "Transport request ignored");
    }
}

fn invalid_input_message(err: FlowError) -> String {
    match err {
        FlowError::InvalidInput(message) => message,
        other => other.to_string(),
    }
}
