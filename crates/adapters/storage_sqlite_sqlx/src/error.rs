//! Failures of the `SQLite` decision log.

use offhours_domain::error::OffhoursError;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("sqlite query failed")]
    Database(#[from] sqlx::Error),

    /// A stored rule or dispatch column holds JSON that no longer decodes.
    #[error("stored column is not valid json")]
    Json(#[from] serde_json::Error),

    #[error("schema migration failed")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for OffhoursError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_to_storage_error_when_converted() {
        let err: OffhoursError = StorageError::Database(sqlx::Error::RowNotFound).into();

        assert!(matches!(err, OffhoursError::Storage(_)));
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("sqlite query failed"));
    }
}
