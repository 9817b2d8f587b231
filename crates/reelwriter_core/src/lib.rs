//! Core data types for the reelwriter generation core.
//!
//! Everything that crosses a crate boundary lives here: conversation
//! messages sent to a provider, the artifacts each pipeline stage produces,
//! and the records persisted by the session and history stores.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod captions;
mod catalog;
mod credentials;
mod history;
mod idea;
mod message;
mod request;
mod role;
mod script;
mod session;
mod stage;

pub use captions::Captions;
pub use catalog::{ModelCatalog, ModelOption};
pub use credentials::Credentials;
pub use history::{HistoryEntry, HistoryKind, NewHistoryEntry};
pub use idea::ContentIdea;
pub use message::{Message, MessageBuilder};
pub use request::{CompletionRequest, CompletionRequestBuilder, ResponseFormat};
pub use role::Role;
pub use script::Script;
pub use session::{SESSION_TTL_DAYS, Session, SessionPatch};
pub use stage::Stage;
