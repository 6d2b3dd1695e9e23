//! Read-only query layer over the Kulturperler archive image: theatre, opera
//! and concert recordings cross-referenced with persons, works and
//! performances.
//!
//! ```no_run
//! use kultur_archive::{Archive, Page, SearchFilters};
//!
//! # fn main() -> kultur_archive::Result<()> {
//! let archive = Archive::load("kulturperler.db")?;
//! let filters = SearchFilters {
//!     query: Some("Peer Gynt".into()),
//!     year_to: Some(1980),
//!     ..Default::default()
//! };
//! for hit in archive.search_performances(&filters, Page::default())? {
//!     println!("{} ({:?})", hit.display_title(), hit.performance.year);
//! }
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod error;
pub mod model;
pub mod query;
pub mod utils;

pub use database::{Archive, Session};
pub use error::{ArchiveError, Result};
pub use query::{Page, SearchFilters};
