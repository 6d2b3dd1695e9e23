use rusqlite::params_from_iter;
use tracing::debug;

use crate::database::rows::{row_to_contributor, row_to_episode_with_details, row_to_tag};
use crate::database::Archive;
use crate::error::Result;
use crate::model::{Contributor, EpisodeWithDetails, Tag};
use crate::query::filters::{episode_predicates, Page, SearchFilters};

pub(crate) const EPISODE_DETAILS: &str = "
    SELECT
        e.*,
        p.title AS play_title,
        playwright.name AS playwright_name,
        (SELECT d.name FROM episode_persons ep_dir
         JOIN persons d ON ep_dir.person_id = d.id
         WHERE ep_dir.episode_id = e.prf_id AND ep_dir.role = 'director'
         ORDER BY ep_dir.id LIMIT 1) AS director_name
    FROM episodes e
    LEFT JOIN plays p ON e.play_id = p.id
    LEFT JOIN persons playwright ON p.playwright_id = playwright.id";

/// Shared with performances: creators first, then cast, then everyone else.
pub(crate) const CONTRIBUTOR_ORDER: &str = "
    CASE role
        WHEN 'director' THEN 1
        WHEN 'playwright' THEN 2
        WHEN 'actor' THEN 3
        ELSE 4
    END,
    person_name";

impl Archive {
    /// Episodes matching `filters`, newest first.
    pub fn search_episodes(&self, filters: &SearchFilters, page: Page) -> Result<Vec<EpisodeWithDetails>> {
        let mut predicates = episode_predicates(filters);
        let sql = format!(
            "{EPISODE_DETAILS}{} ORDER BY e.year DESC, e.title ASC LIMIT ? OFFSET ?",
            predicates.where_clause()
        );
        predicates.bind_page(page);
        debug!("search_episodes: {:?} {:?}", filters, page);

        self.query_all(&sql, params_from_iter(predicates.params()), row_to_episode_with_details)
    }

    /// Number of distinct episodes `search_episodes` would return without paging.
    pub fn count_episodes(&self, filters: &SearchFilters) -> Result<u64> {
        let predicates = episode_predicates(filters);
        let sql = format!(
            "SELECT COUNT(DISTINCT e.prf_id) FROM episodes e \
             LEFT JOIN plays p ON e.play_id = p.id{}",
            predicates.where_clause()
        );
        self.query_one(&sql, params_from_iter(predicates.params()), |row| row.get(0))
    }

    pub fn get_episode(&self, prf_id: &str) -> Result<Option<EpisodeWithDetails>> {
        let sql = format!("{EPISODE_DETAILS} WHERE e.prf_id = ?");
        self.query_opt(&sql, [prf_id], row_to_episode_with_details)
    }

    pub fn get_episode_contributors(&self, prf_id: &str) -> Result<Vec<Contributor>> {
        let sql = format!(
            "SELECT ep.person_id, p.name AS person_name, ep.role, ep.character_name
             FROM episode_persons ep
             JOIN persons p ON ep.person_id = p.id
             WHERE ep.episode_id = ?
             ORDER BY {CONTRIBUTOR_ORDER}"
        );
        self.query_all(&sql, [prf_id], row_to_contributor)
    }

    pub fn get_episode_tags(&self, prf_id: &str) -> Result<Vec<Tag>> {
        self.query_all(
            "SELECT t.* FROM tags t
             JOIN episode_tags et ON et.tag_id = t.id
             WHERE et.episode_id = ?
             ORDER BY t.display_name",
            [prf_id],
            row_to_tag,
        )
    }
}
