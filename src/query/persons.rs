use rusqlite::params_from_iter;
use rusqlite::types::Value;

use crate::database::rows::{
    row_to_about_program, row_to_author_match, row_to_episode_with_details, row_to_person,
    row_to_person_credit, row_to_performance_with_details, row_to_work_summary,
};
use crate::database::Archive;
use crate::error::Result;
use crate::model::{
    AboutProgram, AuthorMatch, EpisodeWithDetails, Person, PersonCredit, PerformanceWithDetails,
    PersonRole, WorkSummary,
};
use crate::query::episodes::EPISODE_DETAILS;
use crate::query::filters::{creator_condition, like_pattern, role_condition, Predicates};
use crate::query::performances::PERFORMANCE_DETAILS;

pub const DEFAULT_PERSON_LIMIT: u32 = 20;
const AUTHOR_MATCH_LIMIT: u32 = 5;
const ABOUT_PROGRAM_LIMIT: u32 = 10;

/// Credits on stagings of the person's own works are listed with the work.
const NOT_OWN_WORK: &str = "NOT EXISTS (SELECT 1 FROM plays own
     WHERE own.id = perf.work_id AND own.playwright_id = pp.person_id)";

/// Credited in `role` on at least one episode or performance.
fn has_role(role: PersonRole) -> (String, Vec<Value>) {
    let (episode_role, mut values) = role_condition("ep.role", role);
    let (performance_role, performance_values) = role_condition("pp.role", role);
    values.extend(performance_values);

    let condition = format!(
        "(EXISTS (SELECT 1 FROM episode_persons ep WHERE ep.person_id = p.id AND {episode_role})
         OR EXISTS (SELECT 1 FROM performance_persons pp WHERE pp.person_id = p.id AND {performance_role}))"
    );
    (condition, values)
}

impl Archive {
    pub fn get_person(&self, id: i64) -> Result<Option<Person>> {
        self.query_opt("SELECT * FROM persons WHERE id = ?", [id], row_to_person)
    }

    /// Persons whose name contains `query`, optionally only those credited in `role`.
    pub fn search_persons(&self, query: &str, role: Option<PersonRole>, limit: u32) -> Result<Vec<Person>> {
        let term = like_pattern(query.trim());
        let mut predicates = Predicates::new();
        predicates.push(
            "(p.name LIKE ? OR p.normalized_name LIKE ?)",
            [Value::Text(term.clone()), Value::Text(term)],
        );
        if let Some(role) = role {
            let (condition, values) = has_role(role);
            predicates.push(condition, values);
        }
        predicates.push_limit(limit);

        let sql = format!(
            "SELECT p.* FROM persons p{} ORDER BY p.name LIMIT ?",
            predicates.where_clause()
        );
        self.query_all(&sql, params_from_iter(predicates.params()), row_to_person)
    }

    pub fn get_persons_by_role(&self, role: PersonRole) -> Result<Vec<Person>> {
        let (condition, values) = has_role(role);
        let sql = format!("SELECT p.* FROM persons p WHERE {condition} ORDER BY p.name");
        self.query_all(&sql, params_from_iter(values), row_to_person)
    }

    /// Playwrights matching `query`, most prolific first.
    pub fn search_authors(&self, query: &str) -> Result<Vec<AuthorMatch>> {
        let term = like_pattern(query.trim());
        self.query_all(
            "SELECT p.*, COUNT(DISTINCT pl.id) AS play_count
             FROM persons p
             JOIN plays pl ON p.id = pl.playwright_id
             WHERE p.name LIKE ?1 OR p.normalized_name LIKE ?1
             GROUP BY p.id
             HAVING play_count > 0
             ORDER BY play_count DESC, p.name
             LIMIT ?2",
            rusqlite::params![term, AUTHOR_MATCH_LIMIT],
            row_to_author_match,
        )
    }

    /// Roles a person has held on stage or screen, in display order. Creator
    /// credits and credits on the person's own works are left out, so every
    /// returned role has at least one entry in `get_person_performances`.
    pub fn get_person_roles(&self, person_id: i64) -> Result<Vec<PersonRole>> {
        let (not_creator, creator_labels) = creator_condition("pp.role");
        let sql = format!(
            "SELECT DISTINCT pp.role FROM performance_persons pp
             JOIN performances perf ON perf.id = pp.performance_id
             WHERE pp.person_id = ? AND pp.role IS NOT NULL
             AND {not_creator}
             AND {NOT_OWN_WORK}"
        );
        let mut values = vec![Value::Integer(person_id)];
        values.extend(creator_labels);

        let labels: Vec<String> = self.query_all(&sql, params_from_iter(values), |row| row.get(0))?;

        let mut roles: Vec<PersonRole> = labels
            .iter()
            .map(|label| PersonRole::from_label(label))
            .filter(|role| !role.is_creator())
            .collect();
        roles.sort_by_key(|role| PersonRole::ALL.iter().position(|r| r == role));
        roles.dedup();
        Ok(roles)
    }

    /// Performances a person is credited on in `role`, newest first.
    /// `PersonRole::Other` gathers every label outside the fixed set.
    pub fn get_person_performances(&self, person_id: i64, role: PersonRole) -> Result<Vec<PersonCredit>> {
        let (role_match, role_values) = role_condition("pp.role", role);
        let sql = format!(
            "SELECT DISTINCT
                 perf.id AS performance_id,
                 perf.work_id,
                 COALESCE(w.title, perf.title) AS work_title,
                 perf.year,
                 pw.name AS playwright_name,
                 pp.character_name,
                 (SELECT e.image_url FROM episodes e
                  WHERE e.performance_id = perf.id AND e.image_url IS NOT NULL
                  LIMIT 1) AS image_url
             FROM performances perf
             JOIN performance_persons pp ON perf.id = pp.performance_id
             LEFT JOIN plays w ON perf.work_id = w.id
             LEFT JOIN persons pw ON w.playwright_id = pw.id
             WHERE pp.person_id = ? AND {role_match}
             AND {NOT_OWN_WORK}
             ORDER BY perf.year DESC"
        );
        let mut values = vec![Value::Integer(person_id)];
        values.extend(role_values);

        self.query_all(&sql, params_from_iter(values), row_to_person_credit)
    }

    /// Works written by a playwright, most performed first.
    pub fn get_playwright_works(&self, person_id: i64) -> Result<Vec<WorkSummary>> {
        self.query_all(
            "SELECT w.*,
                 (SELECT COUNT(*) FROM performances pf WHERE pf.work_id = w.id) AS performance_count,
                 (SELECT e.image_url FROM episodes e
                  JOIN performances pf ON e.performance_id = pf.id
                  WHERE pf.work_id = w.id AND e.image_url IS NOT NULL
                  LIMIT 1) AS image_url
             FROM plays w
             WHERE w.playwright_id = ?
             ORDER BY performance_count DESC, w.title",
            [person_id],
            row_to_work_summary,
        )
    }

    /// Broadcasts about a person, most interesting first.
    pub fn get_about_programs(&self, person_id: i64) -> Result<Vec<AboutProgram>> {
        self.query_all(
            "SELECT * FROM nrk_about_programs
             WHERE person_id = ?
             ORDER BY interest_score DESC
             LIMIT ?",
            rusqlite::params![person_id, ABOUT_PROGRAM_LIMIT],
            row_to_about_program,
        )
    }

    /// Performances portraying a person, newest first. Images built before
    /// `about_person_id` existed have none.
    pub fn get_performances_about(&self, person_id: i64) -> Result<Vec<PerformanceWithDetails>> {
        if !self.has_column("performances", "about_person_id")? {
            return Ok(Vec::new());
        }
        let sql = format!("{PERFORMANCE_DETAILS} WHERE perf.about_person_id = ? ORDER BY perf.year DESC");
        self.query_all(&sql, [person_id], row_to_performance_with_details)
    }

    /// Episodes portraying a person, by title.
    pub fn get_episodes_about(&self, person_id: i64) -> Result<Vec<EpisodeWithDetails>> {
        if !self.has_column("episodes", "about_person_id")? {
            return Ok(Vec::new());
        }
        let sql = format!("{EPISODE_DETAILS} WHERE e.about_person_id = ? ORDER BY e.title");
        self.query_all(&sql, [person_id], row_to_episode_with_details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::fixture;
    use crate::database::schema::SCHEMA;
    use rusqlite::Connection;

    fn names(persons: &[Person]) -> Vec<&str> {
        persons.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_get_person() -> anyhow::Result<()> {
        let archive = fixture::archive();

        let ibsen = archive.get_person(1)?.expect("person 1");
        assert_eq!(ibsen.name, "Henrik Ibsen");
        assert_eq!(ibsen.birth_year, Some(1828));
        assert_eq!(ibsen.death_year, Some(1906));

        assert!(archive.get_person(404)?.is_none());
        Ok(())
    }

    #[test]
    fn test_search_persons_by_name() -> anyhow::Result<()> {
        let archive = fixture::archive();
        let found = archive.search_persons("ibsen", None, DEFAULT_PERSON_LIMIT)?;
        assert_eq!(names(&found), vec!["Henrik Ibsen"]);
        Ok(())
    }

    #[test]
    fn test_search_persons_matches_normalized_name() -> anyhow::Result<()> {
        let archive = fixture::archive();
        let found = archive.search_persons("sando", None, DEFAULT_PERSON_LIMIT)?;
        assert_eq!(names(&found), vec!["Toralf Sandø"]);
        Ok(())
    }

    #[test]
    fn test_search_persons_role_narrows() -> anyhow::Result<()> {
        let archive = fixture::archive();

        let everyone = archive.search_persons("", None, DEFAULT_PERSON_LIMIT)?;
        assert_eq!(everyone.len(), 6);

        let directors = archive.search_persons("", Some(PersonRole::Director), DEFAULT_PERSON_LIMIT)?;
        assert_eq!(
            names(&directors),
            vec!["Arild Brinchmann", "Henrik Ibsen", "Liv Ullmann"]
        );

        let limited = archive.search_persons("", None, 2)?;
        assert_eq!(names(&limited), vec!["Arild Brinchmann", "Edvard Grieg"]);
        Ok(())
    }

    #[test]
    fn test_persons_by_role_spans_episodes_and_performances() -> anyhow::Result<()> {
        let archive = fixture::archive();

        let composers = archive.get_persons_by_role(PersonRole::Composer)?;
        assert_eq!(names(&composers), vec!["Edvard Grieg"]);

        let actors = archive.get_persons_by_role(PersonRole::Actor)?;
        assert_eq!(names(&actors), vec!["Henrik Ibsen", "Liv Ullmann", "Toralf Sandø"]);
        Ok(())
    }

    #[test]
    fn test_search_authors_ranks_by_play_count() -> anyhow::Result<()> {
        let archive = fixture::archive();

        let found = archive.search_authors("i")?;
        let ranked: Vec<(&str, u32)> = found
            .iter()
            .map(|a| (a.person.name.as_str(), a.play_count))
            .collect();
        assert_eq!(ranked, vec![("Henrik Ibsen", 3), ("Ludvig Holberg", 1)]);

        assert!(archive.search_authors("Ullmann")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_person_roles_skip_creator_credits() -> anyhow::Result<()> {
        let archive = fixture::archive();

        assert_eq!(
            archive.get_person_roles(3)?,
            vec![PersonRole::Director, PersonRole::Actor]
        );
        // 'forfatter' is a creator label, not an `Other` credit.
        assert_eq!(archive.get_person_roles(2)?, vec![PersonRole::Director]);
        assert!(archive.get_person_performances(2, PersonRole::Other)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_unknown_labels_are_listed_under_other() -> anyhow::Result<()> {
        let archive = fixture::archive();

        assert_eq!(archive.get_person_roles(6)?, vec![PersonRole::Other]);

        let credits = archive.get_person_performances(6, PersonRole::Other)?;
        let ids: Vec<i64> = credits.iter().map(|c| c.performance_id).collect();
        assert_eq!(ids, vec![5]);

        let others = archive.get_persons_by_role(PersonRole::Other)?;
        assert_eq!(names(&others), vec!["Edvard Grieg"]);

        let found = archive.search_persons("grieg", Some(PersonRole::Other), DEFAULT_PERSON_LIMIT)?;
        assert_eq!(names(&found), vec!["Edvard Grieg"]);
        Ok(())
    }

    #[test]
    fn test_credits_on_own_works_are_left_out() -> anyhow::Result<()> {
        let archive = fixture::archive();

        // Ibsen directs Peer Gynt (2) and Jeppe (4) and acts in Et dukkehjem (3); only Jeppe is not an Ibsen play.
        let directed: Vec<i64> = archive
            .get_person_performances(1, PersonRole::Director)?
            .iter()
            .map(|c| c.performance_id)
            .collect();
        assert_eq!(directed, vec![4]);
        assert!(archive.get_person_performances(1, PersonRole::Actor)?.is_empty());
        assert_eq!(archive.get_person_roles(1)?, vec![PersonRole::Director]);
        Ok(())
    }

    #[test]
    fn test_every_listed_role_has_credits() -> anyhow::Result<()> {
        let archive = fixture::archive();
        for person_id in 1..=6 {
            for role in archive.get_person_roles(person_id)? {
                assert!(
                    !archive.get_person_performances(person_id, role)?.is_empty(),
                    "person {person_id} lists {role} without credits"
                );
            }
        }
        Ok(())
    }

    #[test]
    fn test_person_performances_in_role() -> anyhow::Result<()> {
        let archive = fixture::archive();
        let credits = archive.get_person_performances(3, PersonRole::Actor)?;

        let summary: Vec<(i64, Option<&str>, Option<&str>)> = credits
            .iter()
            .map(|c| (c.performance_id, c.work_title.as_deref(), c.character_name.as_deref()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (1, Some("Peer Gynt"), Some("Solveig")),
                (3, Some("Et dukkehjem"), Some("Nora")),
            ]
        );
        assert_eq!(credits[0].playwright_name.as_deref(), Some("Henrik Ibsen"));
        assert_eq!(credits[0].image_url.as_deref(), Some("https://gfx.nrk.no/peer1/960"));
        Ok(())
    }

    #[test]
    fn test_playwright_works() -> anyhow::Result<()> {
        let archive = fixture::archive();
        let works = archive.get_playwright_works(1)?;

        let summary: Vec<(&str, u32)> = works
            .iter()
            .map(|w| (w.title.as_str(), w.performance_count))
            .collect();
        assert_eq!(
            summary,
            vec![("Peer Gynt", 2), ("Et dukkehjem", 1), ("Hedda Gabler", 0)]
        );
        assert_eq!(works[0].image_url.as_deref(), Some("https://gfx.nrk.no/peer1/960"));
        assert_eq!(works[2].image_url, None);
        Ok(())
    }

    #[test]
    fn test_about_programs_by_interest() -> anyhow::Result<()> {
        let archive = fixture::archive();
        let programs = archive.get_about_programs(1)?;

        let ids: Vec<&str> = programs.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["OBJE00002", "OBJE00001"]);
        assert_eq!(programs[0].interest_score, 9);
        assert!(archive.get_about_programs(2)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_media_about_person() -> anyhow::Result<()> {
        let archive = fixture::archive();

        let performances = archive.get_performances_about(6)?;
        let ids: Vec<i64> = performances.iter().map(|p| p.performance.id).collect();
        assert_eq!(ids, vec![5]);
        assert_eq!(performances[0].performance.about_person_id, Some(6));

        let episodes = archive.get_episodes_about(1)?;
        let titles: Vec<&str> = episodes.iter().map(|e| e.episode.title.as_str()).collect();
        assert_eq!(titles, vec!["Et dukkehjem", "Introduksjon til Peer Gynt"]);

        assert!(archive.get_performances_about(1)?.is_empty());
        assert!(archive.get_episodes_about(2)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_media_about_person_on_image_without_column() -> anyhow::Result<()> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        conn.execute_batch(
            "ALTER TABLE performances DROP COLUMN about_person_id;
             ALTER TABLE episodes DROP COLUMN about_person_id;",
        )?;
        let archive = Archive::from_connection(conn)?;

        assert!(archive.get_performances_about(1)?.is_empty());
        assert!(archive.get_episodes_about(1)?.is_empty());
        Ok(())
    }
}
