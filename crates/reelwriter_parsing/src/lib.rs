//! Recover structure from loosely formatted model output.
//!
//! Parsers never panic on malformed input. Hooks and captions always come
//! back as a best-effort result with explicit placeholders; only an idea
//! list with no recoverable array is an error.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod captions;
mod cleaner;
mod extraction;
mod hooks;
mod ideas;

pub use captions::{
    CaptionParser, CaptionSection, INSTAGRAM_PLACEHOLDER, LINKEDIN_PLACEHOLDER,
};
pub use cleaner::TextCleaner;
pub use extraction::{extract_array, extract_object};
pub use hooks::parse_hooks;
pub use ideas::parse_ideas;
