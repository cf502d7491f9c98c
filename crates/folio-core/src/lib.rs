// Core of folio: the fetch -> classify -> paginate -> render pipeline and the
// UI state machines around it. No terminal, no DOM, no globals.
pub mod about;
pub mod aggregate;
pub mod carousel;
pub mod classify;
pub mod config;
pub mod contact;
pub mod error;
pub mod models;
pub mod overlay;
pub mod paginate;
pub mod project;
pub mod providers;
pub mod scroll;
pub mod showcase;

pub use aggregate::{Aggregator, RepositorySource};
pub use classify::{classify, Classification, ExclusionPolicy};
pub use config::Config;
pub use error::Error;
pub use models::{CardSlot, FeaturedEntry, PageWindow, ProjectDisplayRecord, RepositoryRecord};
pub use project::{ProjectCard, Renderer};
pub use showcase::{LoadTicket, Showcase, LOAD_FAILED};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
