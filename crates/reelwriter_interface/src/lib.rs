//! Collaborator traits for the reelwriter generation core.
//!
//! The pipeline talks to the outside world only through these seams:
//! a [`GenerationDriver`] that turns messages into text, a
//! [`PersistenceBackend`] holding JSON records by key, and any number of
//! [`ContentFeed`]s supplying idea candidates.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{ContentFeed, GenerationDriver, PersistenceBackend};
