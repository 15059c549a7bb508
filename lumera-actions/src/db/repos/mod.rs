//! Repositories over the gallery store

pub mod images;
pub mod users;

use thiserror::Error;

pub use images::ImageRepo;
pub use users::UserRepo;

/// Database error type
#[derive(Debug, Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}
