//! Flow Player Storage
//!
//! Best-effort persistence for favorites, playlists, the local-file registry,
//! the volume setting and the last loaded track.
//!
//! # Example
//!
//! ```rust
//! use flow_storage::{keys, MemoryStore, PersistenceGateway};
//!
//! // A corrupt entry only costs that one key
//! let store = MemoryStore::new()
//!     .with_entry(keys::FAVORITES, "not json")
//!     .with_entry(keys::VOLUME, "0.35");
//!
//! let snapshot = PersistenceGateway::new(store).load();
//! assert!(snapshot.favorites.is_empty());
//! assert_eq!(snapshot.volume, Some(0.35));
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod file;
pub mod gateway;
pub mod keys;
pub mod memory;

pub use error::{Result, StorageError};
pub use file::FileStore;
pub use gateway::{PersistenceGateway, Snapshot};
pub use memory::MemoryStore;
