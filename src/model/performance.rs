use serde::Serialize;

/// A staged or recorded realization of a work.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Performance {
    pub id: i64,
    pub work_id: Option<i64>,
    pub source: Option<String>,
    pub year: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub total_duration: Option<i64>,
    pub image_url: Option<String>,
    pub medium: Option<String>,
    /// Person the performance portrays, for documentaries and tributes.
    pub about_person_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceWithDetails {
    #[serde(flatten)]
    pub performance: Performance,
    pub work_title: Option<String>,
    pub playwright_id: Option<i64>,
    pub playwright_name: Option<String>,
    pub director_name: Option<String>,
    pub media_count: u32,
}

impl PerformanceWithDetails {
    /// Performance title, falling back to the work it stages.
    pub fn display_title(&self) -> &str {
        self.performance
            .title
            .as_deref()
            .or(self.work_title.as_deref())
            .unwrap_or("")
    }
}
