//! Domain models for content variants.
//!
//! A [`Document`] is an ordered list of [`Element`]s: passthrough text and
//! [`Region`]s. Each region carries a [`Uid`]; seeding the document with a uid
//! decides which region is rendered visibly.

mod config;
pub use config::Config;

/// Scanned documents and their source buffers.
pub mod document;
pub use document::{Document, Source};

mod element;
pub use element::Element;

/// Content element regions and the hiding envelope.
pub mod region;
pub use region::Region;

/// Region identifiers.
pub mod uid;
pub use uid::{Error as UidError, Uid};
