//! lumera-actions: server-side data access for the Lumera gallery
//!
//! The web layer calls into [`ImageActions`] for everything it needs:
//! creating, updating and deleting images, fetching a single record with its
//! owner expanded, and the two paginated listings (whole gallery, one
//! owner). Underneath sit a process-wide cached database connection, plain
//! sqlx repositories, and a thin client for the third-party media search
//! API.

pub mod actions;
pub mod db;
pub mod error;
pub mod media;
pub mod signals;

pub use actions::{GalleryPage, ImageActions};
pub use error::{ActionError, Result};
pub use signals::{Navigator, ViewCache};
