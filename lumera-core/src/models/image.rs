//! Image records and their validated input types
//!
//! An image row always carries exactly one owner (`author_id`), set when the
//! record is created. `UpdateImage` deliberately has no author field, so an
//! update can never reassign ownership.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ValidationError;

/// Maximum length for image titles
const MAX_TITLE_LEN: usize = 150;

/// Maximum length for media asset identifiers
const MAX_ASSET_ID_LEN: usize = 255;

/// Asset id pattern: path-like identifiers handed out by the media API.
/// Matches the DB expectation: segments of word characters, dots and dashes,
/// separated by slashes.
static ASSET_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_./-]*$").expect("invalid asset id regex"));

/// Validated image title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTitle(String);

impl ImageTitle {
    /// Create a title, trimming surrounding whitespace.
    ///
    /// # Rules
    /// - Not empty after trimming
    /// - Max 150 characters
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }
        if trimmed.len() > MAX_TITLE_LEN {
            return Err(ValidationError::TooLong {
                field: "title",
                max: MAX_TITLE_LEN,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for ImageTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validated media asset identifier (the media API's public id)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetId(String);

impl AssetId {
    /// Create an asset id.
    ///
    /// # Rules
    /// - Not empty, max 255 characters
    /// - Alphanumeric segments with `_ . / -`, starting alphanumeric
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "asset id" });
        }
        if s.len() > MAX_ASSET_ID_LEN {
            return Err(ValidationError::TooLong {
                field: "asset id",
                max: MAX_ASSET_ID_LEN,
            });
        }
        if !ASSET_ID_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "asset id",
                reason: "must be alphanumeric with underscores, dots, dashes or slashes, \
                         starting with an alphanumeric character",
            });
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for AssetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Stored image record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub id: Uuid,
    pub title: String,
    pub public_id: String,
    pub secure_url: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub transformation_type: Option<String>,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Owner fields expanded onto an image read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub id: Uuid,
    pub external_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Image with its owner expanded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageWithAuthor {
    #[serde(flatten)]
    pub image: Image,
    pub author: Author,
}

/// Draft for creating an image; the owner is supplied separately by the
/// action and never by the caller-provided draft.
#[derive(Debug, Clone)]
pub struct NewImage {
    pub title: ImageTitle,
    pub public_id: AssetId,
    pub secure_url: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub transformation_type: Option<String>,
}

/// Draft for updating an image. Carries no owner field: ownership is set at
/// creation and immutable afterwards.
#[derive(Debug, Clone)]
pub struct UpdateImage {
    pub id: Uuid,
    pub title: ImageTitle,
    pub public_id: AssetId,
    pub secure_url: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub transformation_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_trims_whitespace() {
        let title = ImageTitle::new("  Golden Hour  ").unwrap();
        assert_eq!(title.as_str(), "Golden Hour");
    }

    #[test]
    fn title_rejects_empty() {
        let err = ImageTitle::new("   ").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));
    }

    #[test]
    fn title_rejects_overlong() {
        let long = "a".repeat(151);
        let err = ImageTitle::new(&long).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 150, .. }));
    }

    #[test]
    fn asset_id_accepts_folder_paths() {
        assert!(AssetId::new("lumera/sunset-01").is_ok());
        assert!(AssetId::new("lumera/2024/beach_day.v2").is_ok());
        assert!(AssetId::new("a").is_ok());
    }

    #[test]
    fn asset_id_rejects_quotes_and_spaces() {
        assert!(AssetId::new("lumera/\"sunset\"").is_err());
        assert!(AssetId::new("lumera/sun set").is_err());
        assert!(AssetId::new("/leading-slash").is_err());
    }

    #[test]
    fn asset_id_rejects_empty_and_overlong() {
        assert!(matches!(
            AssetId::new("").unwrap_err(),
            ValidationError::Empty { .. }
        ));
        let long = "a".repeat(256);
        assert!(matches!(
            AssetId::new(&long).unwrap_err(),
            ValidationError::TooLong { max: 255, .. }
        ));
    }
}
