use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

/// Row counts of the main tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArchiveStats {
    pub persons: u64,
    pub works: u64,
    pub performances: u64,
    pub episodes: u64,
    pub tags: u64,
    pub episode_credits: u64,
    pub performance_credits: u64,
}
