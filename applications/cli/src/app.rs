//! Terminal host
//!
//! Plays the view layer's part: forwards commands to the session as intents,
//! pumps simulated media reports back in, and hands signals to the printer.

use crate::command::{describe_file, Command, MAX_TICK_SECONDS};
use crate::media::SimulatedMedia;
use flow_core::KeyValueStore;
use flow_playback::PlaybackConfig;
use flow_session::{Intent, PlayerSession, Signal};
use tracing::{debug, warn};

/// What the prompt should do after a command
#[derive(Debug)]
pub enum Step {
    Signals(Vec<Signal>),
    Help,
    Quit,
}

pub struct App<S: KeyValueStore> {
    session: PlayerSession<SimulatedMedia, S>,
    media: SimulatedMedia,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(store: S, config: PlaybackConfig) -> Self {
        Self::with_media(SimulatedMedia::new(), store, config)
    }

    pub fn with_media(media: SimulatedMedia, store: S, config: PlaybackConfig) -> Self {
        Self {
            session: PlayerSession::new(media.clone(), store, config),
            media,
        }
    }

    pub fn start(&mut self) -> Vec<Signal> {
        self.session.start()
    }

    pub fn execute(&mut self, command: Command) -> Step {
        match command {
            Command::Intent(intent) => Step::Signals(self.dispatch(intent)),
            Command::Import(paths) => {
                let mut signals = Vec::new();
                let mut files = Vec::with_capacity(paths.len());
                for path in paths {
                    match describe_file(&path) {
                        Ok(file) => files.push(file),
                        Err(e) => {
                            warn!(path = %path.display(), error = %e, "Cannot import file");
                            signals.push(Signal::error(format!("Cannot read {}", path.display())));
                        }
                    }
                }
                if !files.is_empty() {
                    signals.extend(self.dispatch(Intent::ImportFiles(files)));
                }
                Step::Signals(signals)
            }
            Command::Tick(seconds) => Step::Signals(self.tick(seconds)),
            Command::Status => Step::Signals(vec![Signal::Transport {
                surfaces: Box::new(self.session.surfaces()),
            }]),
            Command::Help => Step::Help,
            Command::Quit => Step::Quit,
        }
    }

    /// Advance simulated playback one second at a time
    ///
    /// Time left over when a track ends carries into the next one. Non-finite
    /// input does nothing; anything longer than a day is cut to a day.
    pub fn tick(&mut self, seconds: f64) -> Vec<Signal> {
        if !seconds.is_finite() {
            return Vec::new();
        }

        let mut signals = Vec::new();
        let mut remaining = seconds.clamp(0.0, MAX_TICK_SECONDS);

        while remaining > 0.0 {
            let step = remaining.min(1.0);
            self.media.tick(step);
            signals.extend(self.pump());
            signals = collapse_transport(signals);
            remaining -= step;
        }

        signals
    }

    fn dispatch(&mut self, intent: Intent) -> Vec<Signal> {
        let mut signals = self.session.dispatch(intent);
        signals.extend(self.pump());
        collapse_transport(signals)
    }

    /// Feed media reports to the session until it stops producing them
    fn pump(&mut self) -> Vec<Signal> {
        let mut signals = Vec::new();
        loop {
            let reports = self.media.take_reports();
            if reports.is_empty() {
                return signals;
            }
            for status in reports {
                debug!(load = status.load.get(), event = ?status.event, "Media report");
                signals.extend(self.session.dispatch(Intent::Media(status)));
            }
        }
    }

    pub fn session(&self) -> &PlayerSession<SimulatedMedia, S> {
        &self.session
    }

    pub fn media(&self) -> &SimulatedMedia {
        &self.media
    }
}

/// Keep only the newest transport signal, moved to the end
fn collapse_transport(signals: Vec<Signal>) -> Vec<Signal> {
    let mut latest = None;
    let mut collapsed: Vec<Signal> = signals
        .into_iter()
        .filter_map(|signal| match signal {
            Signal::Transport { .. } => {
                latest = Some(signal);
                None
            }
            other => Some(other),
        })
        .collect();

    collapsed.extend(latest);
    collapsed
}
