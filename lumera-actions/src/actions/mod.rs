//! Request-facing actions
//!
//! One independent asynchronous unit of work per call; the only shared
//! state is the process-wide connection cache.

pub mod images;

pub use images::{GalleryPage, ImageActions};
