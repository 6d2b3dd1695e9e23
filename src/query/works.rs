use crate::database::rows::{
    row_to_external_link, row_to_playwright_with_count, row_to_work_with_playwright,
};
use crate::database::Archive;
use crate::error::Result;
use crate::model::{ExternalLink, PlaywrightWithCount, WorkWithPlaywright};

impl Archive {
    pub fn get_work(&self, id: i64) -> Result<Option<WorkWithPlaywright>> {
        self.query_opt(
            "SELECT w.*, playwright.name AS playwright_name
             FROM plays w
             LEFT JOIN persons playwright ON w.playwright_id = playwright.id
             WHERE w.id = ?",
            [id],
            row_to_work_with_playwright,
        )
    }

    pub fn get_work_external_links(&self, work_id: i64) -> Result<Vec<ExternalLink>> {
        self.query_all(
            "SELECT * FROM play_external_links WHERE play_id = ? ORDER BY title",
            [work_id],
            row_to_external_link,
        )
    }

    /// Playwrights with at least one broadcast episode, most broadcast first.
    pub fn get_playwrights_with_counts(&self) -> Result<Vec<PlaywrightWithCount>> {
        self.query_all(
            "SELECT
                 p.id,
                 p.name,
                 COUNT(DISTINCT e.prf_id) AS episode_count,
                 COUNT(DISTINCT pl.id) AS play_count
             FROM persons p
             JOIN plays pl ON p.id = pl.playwright_id
             JOIN episodes e ON pl.id = e.play_id
             GROUP BY p.id
             HAVING episode_count > 0
             ORDER BY episode_count DESC, p.name",
            [],
            row_to_playwright_with_count,
        )
    }
}
