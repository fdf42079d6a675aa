//! Typed loaders for the wide source tables.
//!
//! Every loader is a pure function of its byte source; locating files is the
//! job of [`crate::source::SourceProvider`].

pub mod census;
pub mod melt;
pub mod reference;

pub use census::*;
pub use melt::*;
pub use reference::*;
