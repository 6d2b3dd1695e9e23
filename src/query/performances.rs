use rusqlite::params_from_iter;
use tracing::debug;

use crate::database::rows::{row_to_contributor, row_to_episode, row_to_performance_with_details};
use crate::database::Archive;
use crate::error::Result;
use crate::model::{Contributor, Episode, PerformanceWithDetails};
use crate::query::episodes::CONTRIBUTOR_ORDER;
use crate::query::filters::{performance_predicates, Page, SearchFilters};

pub(crate) const PERFORMANCE_DETAILS: &str = "
    SELECT
        perf.*,
        w.title AS work_title,
        w.playwright_id AS playwright_id,
        playwright.name AS playwright_name,
        (SELECT COUNT(*) FROM episodes e WHERE e.performance_id = perf.id) AS media_count,
        (SELECT d.name FROM performance_persons pp
         JOIN persons d ON pp.person_id = d.id
         WHERE pp.performance_id = perf.id AND pp.role = 'director'
         ORDER BY pp.id LIMIT 1) AS director_name
    FROM performances perf
    LEFT JOIN plays w ON perf.work_id = w.id
    LEFT JOIN persons playwright ON w.playwright_id = playwright.id";

impl Archive {
    /// Performances matching `filters`, newest first.
    pub fn search_performances(
        &self,
        filters: &SearchFilters,
        page: Page,
    ) -> Result<Vec<PerformanceWithDetails>> {
        let mut predicates = performance_predicates(filters);
        let sql = format!(
            "{PERFORMANCE_DETAILS}{} ORDER BY perf.year DESC, perf.title ASC LIMIT ? OFFSET ?",
            predicates.where_clause()
        );
        predicates.bind_page(page);
        debug!("search_performances: {:?} {:?}", filters, page);

        self.query_all(&sql, params_from_iter(predicates.params()), row_to_performance_with_details)
    }

    pub fn count_performances(&self, filters: &SearchFilters) -> Result<u64> {
        let predicates = performance_predicates(filters);
        let sql = format!(
            "SELECT COUNT(*) FROM performances perf LEFT JOIN plays w ON perf.work_id = w.id{}",
            predicates.where_clause()
        );
        self.query_one(&sql, params_from_iter(predicates.params()), |row| row.get(0))
    }

    pub fn get_performance(&self, id: i64) -> Result<Option<PerformanceWithDetails>> {
        let sql = format!("{PERFORMANCE_DETAILS} WHERE perf.id = ?");
        self.query_opt(&sql, [id], row_to_performance_with_details)
    }

    pub fn get_performance_contributors(&self, performance_id: i64) -> Result<Vec<Contributor>> {
        let sql = format!(
            "SELECT pp.person_id, p.name AS person_name, pp.role, pp.character_name
             FROM performance_persons pp
             JOIN persons p ON pp.person_id = p.id
             WHERE pp.performance_id = ?
             ORDER BY {CONTRIBUTOR_ORDER}"
        );
        self.query_all(&sql, [performance_id], row_to_contributor)
    }

    /// Episodes of a performance in playing order; unnumbered ones last.
    pub fn get_performance_media(&self, performance_id: i64) -> Result<Vec<Episode>> {
        self.query_all(
            "SELECT * FROM episodes
             WHERE performance_id = ?
             ORDER BY part_number ASC NULLS LAST, title ASC",
            [performance_id],
            row_to_episode,
        )
    }

    /// Other stagings of the same work.
    pub fn get_other_performances(
        &self,
        work_id: i64,
        exclude_performance_id: i64,
    ) -> Result<Vec<PerformanceWithDetails>> {
        let sql = format!(
            "{PERFORMANCE_DETAILS} WHERE perf.work_id = ? AND perf.id != ? ORDER BY perf.year DESC"
        );
        self.query_all(&sql, [work_id, exclude_performance_id], row_to_performance_with_details)
    }

    pub fn get_work_performances(&self, work_id: i64) -> Result<Vec<PerformanceWithDetails>> {
        let sql = format!("{PERFORMANCE_DETAILS} WHERE perf.work_id = ? ORDER BY perf.year DESC");
        self.query_all(&sql, [work_id], row_to_performance_with_details)
    }
}
