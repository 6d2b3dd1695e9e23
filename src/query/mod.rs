pub mod catalog;
pub mod episodes;
pub mod filters;
pub mod performances;
pub mod persons;
pub mod works;

pub use filters::{Page, SearchFilters, DEFAULT_PAGE_SIZE};
pub use persons::DEFAULT_PERSON_LIMIT;
