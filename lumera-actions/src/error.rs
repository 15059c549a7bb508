//! Error types for lumera-actions
//!
//! Domain outcomes (`Configuration`, `NotFound`, `Unauthorized`) are part of
//! each operation's contract and travel to the caller untouched. Everything
//! else - database and media API failures - is funneled through
//! [`ActionError::surface`], the single point that logs the underlying
//! cause and hands the caller a generic failure.

use lumera_core::config::ConfigError;
use thiserror::Error;

use crate::db::repos::DbError;
use crate::media::MediaError;

pub type Result<T> = std::result::Result<T, ActionError>;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("media index error: {0}")]
    Media(#[from] MediaError),

    #[error("{operation} failed")]
    Internal { operation: &'static str },
}

impl ActionError {
    /// Normalize an error on its way out of an operation.
    ///
    /// Unexpected failures are logged with their cause and collapsed into a
    /// generic internal error; domain errors pass through unchanged.
    pub(crate) fn surface(self, operation: &'static str) -> Self {
        match self {
            Self::Database(err) => {
                tracing::error!(operation, error = %err, "database failure");
                Self::Internal { operation }
            }
            Self::Media(err) => {
                tracing::error!(operation, error = %err, "media index failure");
                Self::Internal { operation }
            }
            other => other,
        }
    }
}

impl From<DbError> for ActionError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Sqlx(source) => Self::Database(source),
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Route the `tracing::error!` calls in `surface` to the test writer.
    fn init_tracing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    #[test]
    fn surface_collapses_database_errors() {
        init_tracing();
        let err = ActionError::Database(sqlx::Error::RowNotFound).surface("add_image");
        assert!(matches!(
            err,
            ActionError::Internal {
                operation: "add_image"
            }
        ));
        assert_eq!(err.to_string(), "add_image failed");
    }

    #[test]
    fn surface_passes_domain_errors_through() {
        let err = ActionError::NotFound {
            resource: "user",
            id: "abc".into(),
        }
        .surface("add_image");
        assert!(matches!(err, ActionError::NotFound { resource: "user", .. }));

        let err = ActionError::Unauthorized("owner mismatch".into()).surface("update_image");
        assert!(matches!(err, ActionError::Unauthorized(_)));
    }

    #[test]
    fn db_not_found_maps_to_not_found() {
        let err: ActionError = DbError::NotFound {
            resource: "image",
            id: "xyz".into(),
        }
        .into();
        assert!(matches!(err, ActionError::NotFound { resource: "image", .. }));
    }
}
