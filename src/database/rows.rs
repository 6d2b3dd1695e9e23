//! Row to view-object mapping.
//!
//! Columns are read by name so queries can select `table.*` plus aliased
//! join columns. Descriptive columns added to the image over time are read
//! with [`opt`], which treats a column the image does not have as NULL.

use rusqlite::types::FromSql;
use rusqlite::Row;

use crate::model::{
    AboutProgram, AuthorMatch, Contributor, Episode, EpisodeWithDetails, ExternalLink, MediaType,
    Performance, PerformanceWithDetails, Person, PersonCredit, PersonRole, PlaywrightWithCount,
    Tag, Work, WorkSummary, WorkWithPlaywright,
};

/// Nullable column that older images may lack entirely.
fn opt<T: FromSql>(row: &Row, column: &str) -> rusqlite::Result<Option<T>> {
    match row.get::<_, Option<T>>(column) {
        Err(rusqlite::Error::InvalidColumnName(_)) => Ok(None),
        other => other,
    }
}

fn role(row: &Row, column: &str) -> rusqlite::Result<Option<PersonRole>> {
    let label: Option<String> = row.get(column)?;
    Ok(label.as_deref().map(PersonRole::from_label))
}

pub fn row_to_person(row: &Row) -> rusqlite::Result<Person> {
    Ok(Person {
        id: row.get("id")?,
        name: row.get("name")?,
        normalized_name: opt(row, "normalized_name")?,
        birth_year: opt(row, "birth_year")?,
        death_year: opt(row, "death_year")?,
        nationality: opt(row, "nationality")?,
        wikidata_id: opt(row, "wikidata_id")?,
        sceneweb_id: opt(row, "sceneweb_id")?,
        sceneweb_url: opt(row, "sceneweb_url")?,
        wikipedia_url: opt(row, "wikipedia_url")?,
        bio: opt(row, "bio")?,
        image_url: opt(row, "image_url")?,
    })
}

pub fn row_to_work(row: &Row) -> rusqlite::Result<Work> {
    Ok(Work {
        id: row.get("id")?,
        title: row.get("title")?,
        original_title: opt(row, "original_title")?,
        playwright_id: row.get("playwright_id")?,
        year_written: opt(row, "year_written")?,
        work_type: opt(row, "work_type")?,
        synopsis: opt(row, "synopsis")?,
        wikidata_id: opt(row, "wikidata_id")?,
        sceneweb_id: opt(row, "sceneweb_id")?,
        sceneweb_url: opt(row, "sceneweb_url")?,
        wikipedia_url: opt(row, "wikipedia_url")?,
    })
}

/// Expects `plays.*` plus `playwright_name`.
pub fn row_to_work_with_playwright(row: &Row) -> rusqlite::Result<WorkWithPlaywright> {
    Ok(WorkWithPlaywright {
        work: row_to_work(row)?,
        playwright_name: row.get("playwright_name")?,
    })
}

pub fn row_to_work_summary(row: &Row) -> rusqlite::Result<WorkSummary> {
    Ok(WorkSummary {
        id: row.get("id")?,
        title: row.get("title")?,
        year_written: opt(row, "year_written")?,
        work_type: opt(row, "work_type")?,
        performance_count: row.get("performance_count")?,
        image_url: row.get("image_url")?,
    })
}

pub fn row_to_performance(row: &Row) -> rusqlite::Result<Performance> {
    Ok(Performance {
        id: row.get("id")?,
        work_id: row.get("work_id")?,
        source: opt(row, "source")?,
        year: row.get("year")?,
        title: row.get("title")?,
        description: opt(row, "description")?,
        venue: opt(row, "venue")?,
        total_duration: opt(row, "total_duration")?,
        image_url: opt(row, "image_url")?,
        medium: opt(row, "medium")?,
        about_person_id: opt(row, "about_person_id")?,
    })
}

/// Expects `performances.*` plus `director_name` and `media_count`; work
/// columns are optional since per-work listings leave them out.
pub fn row_to_performance_with_details(row: &Row) -> rusqlite::Result<PerformanceWithDetails> {
    Ok(PerformanceWithDetails {
        performance: row_to_performance(row)?,
        work_title: opt(row, "work_title")?,
        playwright_id: opt(row, "playwright_id")?,
        playwright_name: opt(row, "playwright_name")?,
        director_name: row.get("director_name")?,
        media_count: row.get("media_count")?,
    })
}

pub fn row_to_episode(row: &Row) -> rusqlite::Result<Episode> {
    let is_introduction: Option<i64> = opt(row, "is_introduction")?;
    let media_type: Option<String> = opt(row, "media_type")?;

    Ok(Episode {
        prf_id: row.get("prf_id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        year: row.get("year")?,
        duration_seconds: opt(row, "duration_seconds")?,
        image_url: opt(row, "image_url")?,
        nrk_url: opt(row, "nrk_url")?,
        play_id: row.get("play_id")?,
        performance_id: opt(row, "performance_id")?,
        source: opt(row, "source")?,
        medium: opt(row, "medium")?,
        part_number: opt(row, "part_number")?,
        total_parts: opt(row, "total_parts")?,
        is_introduction: is_introduction.is_some_and(|v| v != 0),
        parent_episode_id: opt(row, "parent_episode_id")?,
        media_type: media_type.as_deref().and_then(MediaType::parse),
        about_person_id: opt(row, "about_person_id")?,
    })
}

/// Expects `episodes.*` plus `play_title`, `playwright_name` and `director_name`.
pub fn row_to_episode_with_details(row: &Row) -> rusqlite::Result<EpisodeWithDetails> {
    Ok(EpisodeWithDetails {
        episode: row_to_episode(row)?,
        play_title: row.get("play_title")?,
        playwright_name: row.get("playwright_name")?,
        director_name: opt(row, "director_name")?,
    })
}

pub fn row_to_contributor(row: &Row) -> rusqlite::Result<Contributor> {
    Ok(Contributor {
        person_id: row.get("person_id")?,
        person_name: row.get("person_name")?,
        role: role(row, "role")?,
        character_name: row.get("character_name")?,
    })
}

pub fn row_to_person_credit(row: &Row) -> rusqlite::Result<PersonCredit> {
    Ok(PersonCredit {
        performance_id: row.get("performance_id")?,
        work_id: row.get("work_id")?,
        work_title: row.get("work_title")?,
        year: row.get("year")?,
        playwright_name: row.get("playwright_name")?,
        character_name: row.get("character_name")?,
        image_url: row.get("image_url")?,
    })
}

pub fn row_to_author_match(row: &Row) -> rusqlite::Result<AuthorMatch> {
    Ok(AuthorMatch {
        person: row_to_person(row)?,
        play_count: row.get("play_count")?,
    })
}

pub fn row_to_playwright_with_count(row: &Row) -> rusqlite::Result<PlaywrightWithCount> {
    Ok(PlaywrightWithCount {
        id: row.get("id")?,
        name: row.get("name")?,
        episode_count: row.get("episode_count")?,
        play_count: row.get("play_count")?,
    })
}

pub fn row_to_tag(row: &Row) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: row.get("id")?,
        name: row.get("name")?,
        display_name: row.get("display_name")?,
        color: row.get("color")?,
    })
}

pub fn row_to_external_link(row: &Row) -> rusqlite::Result<ExternalLink> {
    Ok(ExternalLink {
        id: row.get("id")?,
        play_id: row.get("play_id")?,
        url: row.get("url")?,
        title: row.get("title")?,
        link_type: row.get("type")?,
        description: opt(row, "description")?,
        access_note: row.get("access_note")?,
    })
}

pub fn row_to_about_program(row: &Row) -> rusqlite::Result<AboutProgram> {
    let interest_score: Option<i64> = row.get("interest_score")?;

    Ok(AboutProgram {
        id: row.get("id")?,
        person_id: row.get("person_id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        duration_seconds: row.get("duration_seconds")?,
        image_url: row.get("image_url")?,
        nrk_url: row.get("nrk_url")?,
        program_type: row.get("program_type")?,
        year: row.get("year")?,
        interest_score: interest_score.unwrap_or(0),
        episode_count: row.get("episode_count")?,
    })
}
