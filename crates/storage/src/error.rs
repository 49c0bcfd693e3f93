use thiserror::Error;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Closed set of failures surfaced by the persistence layer.
///
/// SQLSTATE codes are classified once, in `From<sqlx::Error>`, so callers
/// never inspect driver-specific error representations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("Not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl From<sqlx::Error> for StorageError {
    fn from(error: sqlx::Error) -> Self {
        if matches!(error, sqlx::Error::RowNotFound) {
            return StorageError::NotFound;
        }

        let classified = match &error {
            sqlx::Error::Database(db_err) => {
                let constraint = db_err.constraint().unwrap_or_default().to_string();
                match db_err.code().as_deref() {
                    Some(UNIQUE_VIOLATION) => Some(StorageError::UniqueViolation(constraint)),
                    Some(FOREIGN_KEY_VIOLATION) => {
                        Some(StorageError::ForeignKeyViolation(constraint))
                    }
                    _ => None,
                }
            }
            _ => None,
        };

        classified.unwrap_or(StorageError::Database(error))
    }
}
