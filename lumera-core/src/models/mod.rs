//! Domain models with validation at construction
//!
//! User-supplied fields are validated when the draft types are built.
//! Invalid input returns ValidationError, not panic.

pub mod image;
pub mod pagination;
pub mod user;
pub mod validation;

pub use image::{AssetId, Author, Image, ImageTitle, ImageWithAuthor, NewImage, UpdateImage};
pub use pagination::{Paginated, Pagination};
pub use user::{NewUser, User};
pub use validation::ValidationError;
