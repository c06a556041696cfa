/// Local file registry types
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// File offered by the host for import (drag-and-drop or file picker)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// File name
    pub name: String,

    /// Size in bytes
    pub size: u64,

    /// MIME type reported by the host
    #[serde(alias = "type")]
    pub mime_type: String,

    /// Object URL the media resource can load
    pub url: String,
}

impl FileDescriptor {
    /// Whether the host reported an audio MIME type
    pub fn is_audio(&self) -> bool {
        self.mime_type.starts_with("audio/")
    }
}

/// Entry in the local-file registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalFile {
    /// File name
    pub name: String,

    /// Size in bytes
    pub size: u64,

    /// MIME type
    #[serde(alias = "type")]
    pub mime_type: String,

    /// Object URL
    pub url: String,

    /// When the file was imported
    #[serde(alias = "addedAt")]
    pub added_at: DateTime<Utc>,
}

impl LocalFile {
    /// Register an imported file
    pub fn from_descriptor(file: FileDescriptor, added_at: DateTime<Utc>) -> Self {
        Self {
            name: file.name,
            size: file.size,
            mime_type: file.mime_type,
            url: file.url,
            added_at,
        }
    }
}
