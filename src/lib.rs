//! Demographic data preparation for Brazilian municipalities.
//!
//! Loads IBGE census, projection and age-structure tables, joins census
//! sector geometry, and derives the indicators a municipal dashboard shows.

pub mod config;
pub mod error;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod parser;
pub mod schema;
pub mod selection;
pub mod session;
pub mod source;
pub mod spatial;

pub use config::Config;
pub use error::{DataError, DataResult};
pub use session::{Panel, SelectionView, Session};
pub use source::{FsProvider, MemoryProvider, SourceProvider, SourceRef};
