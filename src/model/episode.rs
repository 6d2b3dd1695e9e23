use serde::Serialize;

use super::role::MediaType;

/// A broadcastable media unit, keyed by its NRK programme id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Episode {
    pub prf_id: String,
    pub title: String,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub duration_seconds: Option<i64>,
    pub image_url: Option<String>,
    pub nrk_url: Option<String>,
    pub play_id: Option<i64>,
    pub performance_id: Option<i64>,
    pub source: Option<String>,
    pub medium: Option<String>,
    pub part_number: Option<u32>,
    pub total_parts: Option<u32>,
    pub is_introduction: bool,
    pub parent_episode_id: Option<String>,
    pub media_type: Option<MediaType>,
    pub about_person_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeWithDetails {
    #[serde(flatten)]
    pub episode: Episode,
    pub play_title: Option<String>,
    pub playwright_name: Option<String>,
    pub director_name: Option<String>,
}
