//! User records
//!
//! Users are referenced by the image actions but never mutated by them.
//! `NewUser` exists for account provisioning (the web app registers users
//! out-of-band) and for test seeding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored user record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub external_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Draft for creating a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub external_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
