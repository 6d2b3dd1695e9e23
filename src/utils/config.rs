use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::info;
use walkdir::WalkDir;

pub const DB_FILE_NAME: &str = "kulturperler.db";
pub const DB_PATH_KEY: &str = "KULTUR_DB_PATH";
const SEARCH_DEPTH: usize = 5;

/// Where to load the archive image from.
/// An explicit path wins, then the environment, then `.env`, then a search
/// of the working directory and its parent. A searched-out path is written
/// to `.env` for next time.
pub fn resolve_db_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Ok(value) = std::env::var(DB_PATH_KEY) {
        info!("Using database path from {}", DB_PATH_KEY);
        return Ok(PathBuf::from(value));
    }

    let env_path = Path::new(".env");
    if env_path.exists() {
        if let Some(path) = load_from_env(env_path)? {
            if path.exists() {
                info!("Loaded database path from .env");
                return Ok(path);
            }
        }
    }

    info!("Database path not configured. Searching filesystem...");
    let root = std::env::current_dir()?;
    let found = find_file(&root, DB_FILE_NAME, SEARCH_DEPTH)?;
    info!("Found database: {:?}", found);

    save_to_env(env_path, &found)?;
    info!("Saved path to .env");

    Ok(found)
}

fn find_file(root: &Path, filename: &str, max_depth: usize) -> Result<PathBuf> {
    let search = |dir: &Path| {
        WalkDir::new(dir)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .find(|e| e.file_type().is_file() && e.file_name() == filename)
            .map(|e| e.path().to_path_buf())
    };

    // Running from a subdirectory is common, so look one level up as well.
    search(root)
        .or_else(|| root.parent().and_then(search))
        .ok_or_else(|| anyhow!("Could not find '{}' in nearby directories.", filename))
}

fn load_from_env(path: &Path) -> Result<Option<PathBuf>> {
    let content = fs::read_to_string(path).context("Failed to read .env file")?;

    Ok(content.lines().find_map(|line| {
        let (key, value) = line.split_once('=')?;
        (key.trim() == DB_PATH_KEY).then(|| PathBuf::from(value.trim()))
    }))
}

/// Sets the database path in `.env`, keeping any other entries.
fn save_to_env(path: &Path, db_path: &Path) -> Result<()> {
    let existing = if path.exists() {
        fs::read_to_string(path).context("Failed to read .env file")?
    } else {
        String::new()
    };

    let mut lines: Vec<String> = existing
        .lines()
        .filter(|line| {
            line.split_once('=')
                .map_or(true, |(key, _)| key.trim() != DB_PATH_KEY)
        })
        .map(str::to_string)
        .collect();
    lines.push(format!("{}={}", DB_PATH_KEY, db_path.display()));

    fs::write(path, lines.join("\n") + "\n").context("Failed to write .env file")?;
    Ok(())
}
