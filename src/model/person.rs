use serde::Serialize;

use super::role::PersonRole;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub normalized_name: Option<String>,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    pub nationality: Option<String>,
    pub wikidata_id: Option<String>,
    pub sceneweb_id: Option<i64>,
    pub sceneweb_url: Option<String>,
    pub wikipedia_url: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
}

impl Person {
    /// `"(1828-1906)"`, with `?` for an unknown end. Empty when neither is known.
    pub fn lifespan(&self) -> String {
        match (self.birth_year, self.death_year) {
            (None, None) => String::new(),
            (birth, death) => format!(
                "({}-{})",
                birth.map(|y| y.to_string()).unwrap_or_else(|| "?".into()),
                death.map(|y| y.to_string()).unwrap_or_else(|| "?".into()),
            ),
        }
    }
}

/// A person credited on an episode or a performance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contributor {
    pub person_id: i64,
    pub person_name: String,
    pub role: Option<PersonRole>,
    pub character_name: Option<String>,
}

/// Playwright match from the author search box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorMatch {
    #[serde(flatten)]
    pub person: Person,
    pub play_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaywrightWithCount {
    pub id: i64,
    pub name: String,
    pub episode_count: u32,
    pub play_count: u32,
}

/// One performance a person took part in, as listed on their page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonCredit {
    pub performance_id: i64,
    pub work_id: Option<i64>,
    pub work_title: Option<String>,
    pub year: Option<i32>,
    pub playwright_name: Option<String>,
    pub character_name: Option<String>,
    pub image_url: Option<String>,
}

/// Broadcast about a person (documentary, interview, portrait).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AboutProgram {
    pub id: String,
    pub person_id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration_seconds: Option<i64>,
    pub image_url: Option<String>,
    pub nrk_url: Option<String>,
    pub program_type: Option<String>,
    pub year: Option<i32>,
    pub interest_score: i64,
    pub episode_count: Option<u32>,
}
