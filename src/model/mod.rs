pub mod catalog;
pub mod display;
pub mod episode;
pub mod performance;
pub mod person;
pub mod role;
pub mod work;

pub use catalog::{ArchiveStats, Tag, YearRange};
pub use episode::{Episode, EpisodeWithDetails};
pub use performance::{Performance, PerformanceWithDetails};
pub use person::{AboutProgram, AuthorMatch, Contributor, Person, PersonCredit, PlaywrightWithCount};
pub use role::{MediaType, PersonRole};
pub use work::{ExternalLink, Work, WorkSummary, WorkWithPlaywright};
