use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Database not initialized")]
    NotInitialized,

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Database image is missing tables: {}", .0.join(", "))]
    MissingTables(Vec<String>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl ArchiveError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ArchiveError>;
