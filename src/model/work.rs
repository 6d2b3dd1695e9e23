use serde::Serialize;

/// A dramatic or musical composition. Stored in the `plays` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Work {
    pub id: i64,
    pub title: String,
    pub original_title: Option<String>,
    pub playwright_id: Option<i64>,
    pub year_written: Option<i32>,
    pub work_type: Option<String>,
    pub synopsis: Option<String>,
    pub wikidata_id: Option<String>,
    pub sceneweb_id: Option<i64>,
    pub sceneweb_url: Option<String>,
    pub wikipedia_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkWithPlaywright {
    #[serde(flatten)]
    pub work: Work,
    pub playwright_name: Option<String>,
}

/// Work row on a playwright's page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkSummary {
    pub id: i64,
    pub title: String,
    pub year_written: Option<i32>,
    pub work_type: Option<String>,
    pub performance_count: u32,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalLink {
    pub id: i64,
    pub play_id: i64,
    pub url: String,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub link_type: Option<String>,
    pub description: Option<String>,
    pub access_note: Option<String>,
}
