use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A member of the movie night rotation
///
/// `position` defines the cyclic pick order (ascending, ties broken by id).
/// Positions are not required to be unique or contiguous; reordering assigns
/// them wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub position: i64,
    pub created_at: NaiveDateTime,
}
