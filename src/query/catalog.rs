use crate::database::rows::row_to_tag;
use crate::database::Archive;
use crate::error::Result;
use crate::model::{ArchiveStats, Tag, YearRange};

impl Archive {
    pub fn get_tags(&self) -> Result<Vec<Tag>> {
        self.query_all("SELECT * FROM tags ORDER BY display_name", [], row_to_tag)
    }

    /// Earliest and latest episode year, if any episode is dated.
    pub fn get_year_range(&self) -> Result<Option<YearRange>> {
        let (min, max): (Option<i32>, Option<i32>) = self.query_one(
            "SELECT MIN(year), MAX(year) FROM episodes WHERE year IS NOT NULL",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(min.zip(max).map(|(min, max)| YearRange { min, max }))
    }

    pub fn stats(&self) -> Result<ArchiveStats> {
        let count = |table: &str| -> Result<u64> {
            self.query_one(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        };

        Ok(ArchiveStats {
            persons: count("persons")?,
            works: count("plays")?,
            performances: count("performances")?,
            episodes: count("episodes")?,
            tags: count("tags")?,
            episode_credits: count("episode_persons")?,
            performance_credits: count("performance_persons")?,
        })
    }

    /// Build information stored alongside the data, e.g. `build_date`.
    pub fn metadata(&self, key: &str) -> Result<Option<String>> {
        let value: Option<Option<String>> =
            self.query_opt("SELECT value FROM metadata WHERE key = ?", [key], |row| row.get(0))?;
        Ok(value.flatten())
    }
}
