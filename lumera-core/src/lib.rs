//! lumera-core: domain types and configuration for the Lumera gallery
//!
//! Pure types only - no database or network I/O lives here. The actions
//! crate (`lumera-actions`) consumes these models when talking to the
//! store and the media index.

pub mod config;
pub mod models;

pub use config::{ConfigError, DatabaseConfig, MediaConfig};
pub use models::{
    AssetId, Author, Image, ImageTitle, ImageWithAuthor, NewImage, NewUser, Paginated,
    Pagination, UpdateImage, User, ValidationError,
};
