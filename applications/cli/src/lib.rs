//! Flow Player terminal host
//!
//! Runs a [`PlayerSession`](flow_session::PlayerSession) against a simulated
//! media resource, reading commands from stdin and printing signals.

pub mod app;
pub mod command;
pub mod config;
pub mod error;
pub mod media;
pub mod render;

pub use app::{App, Step};
pub use command::{parse_line, Command};
pub use config::CliConfig;
pub use error::{CliError, Result};
pub use media::SimulatedMedia;
