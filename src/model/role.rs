use std::fmt;

use rusqlite::types::{ToSql, ToSqlOutput};
use serde::{Deserialize, Serialize};

/// Credit a person holds on an episode or performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonRole {
    Director,
    Actor,
    Playwright,
    Composer,
    Conductor,
    Soloist,
    SetDesigner,
    CostumeDesigner,
    Producer,
    Other,
}

impl PersonRole {
    pub const ALL: [PersonRole; 10] = [
        PersonRole::Director,
        PersonRole::Actor,
        PersonRole::Playwright,
        PersonRole::Composer,
        PersonRole::Conductor,
        PersonRole::Soloist,
        PersonRole::SetDesigner,
        PersonRole::CostumeDesigner,
        PersonRole::Producer,
        PersonRole::Other,
    ];

    /// Stored labels for writing or scoring the work itself. Some fall
    /// outside the fixed set and are never counted as `Other`.
    pub const CREATOR_LABELS: [&'static str; 4] = ["playwright", "composer", "librettist", "forfatter"];

    pub fn as_str(self) -> &'static str {
        match self {
            PersonRole::Director => "director",
            PersonRole::Actor => "actor",
            PersonRole::Playwright => "playwright",
            PersonRole::Composer => "composer",
            PersonRole::Conductor => "conductor",
            PersonRole::Soloist => "soloist",
            PersonRole::SetDesigner => "set_designer",
            PersonRole::CostumeDesigner => "costume_designer",
            PersonRole::Producer => "producer",
            PersonRole::Other => "other",
        }
    }

    /// Labels outside the fixed set are folded into `Other`.
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == label)
            .unwrap_or(PersonRole::Other)
    }

    /// Creator credits belong to the work, not to a particular staging.
    pub fn is_creator(self) -> bool {
        matches!(self, PersonRole::Playwright | PersonRole::Composer)
    }

    /// Section heading for a person's credits in this role.
    pub fn label(self) -> &'static str {
        match self {
            PersonRole::Director => "Regissert",
            PersonRole::Actor => "Roller",
            PersonRole::Playwright => "Stykker",
            PersonRole::Composer => "Komponert",
            PersonRole::Conductor => "Dirigert",
            PersonRole::Soloist => "Solist",
            PersonRole::Producer => "Produsert",
            PersonRole::SetDesigner => "Scenografi",
            PersonRole::CostumeDesigner => "Kostymer",
            PersonRole::Other => "Annet",
        }
    }

    /// Noun for a single credit, e.g. next to a name.
    pub fn noun(self) -> &'static str {
        match self {
            PersonRole::Director => "Regissør",
            PersonRole::Actor => "Skuespiller",
            PersonRole::Conductor => "Dirigent",
            PersonRole::Soloist => "Solist",
            PersonRole::Producer => "Produsent",
            PersonRole::SetDesigner => "Scenograf",
            PersonRole::CostumeDesigner => "Kostymedesigner",
            PersonRole::Other => "Medvirkende",
            PersonRole::Playwright | PersonRole::Composer => self.as_str(),
        }
    }
}

impl fmt::Display for PersonRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for PersonRole {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

/// How an episode relates to its performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Episode,
    Part,
    Intro,
}

impl MediaType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "episode" => Some(MediaType::Episode),
            "part" => Some(MediaType::Part),
            "intro" => Some(MediaType::Intro),
            _ => None,
        }
    }
}
