//! Session and history persistence for reelwriter.
//!
//! Both stores sit on a [`PersistenceBackend`](reelwriter_interface::PersistenceBackend)
//! and apply their own retention policy:
//!
//! - [`SessionStore`] merges patches into sessions whose expiry is fixed at
//!   creation, and purges sessions past that expiry.
//! - [`HistoryStore`] appends immutable entries and purges by age relative
//!   to the moment of purge.
//!
//! Two backends are provided: [`InMemoryBackend`] and [`FileSystemBackend`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod history;
mod memory;
mod records;
mod sessions;

pub use filesystem::FileSystemBackend;
pub use history::{DEFAULT_HISTORY_RETENTION_DAYS, HistoryStore};
pub use memory::InMemoryBackend;
pub use sessions::SessionStore;
