use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted user. `id` is assigned by the store on insert.
#[derive(Clone, Debug, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
}

/// Body of `POST /users`.
///
/// `name` is optional so that a missing or null name reaches the store and is
/// rejected by its `NOT NULL` constraint rather than by the extractor.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NewUser {
    pub name: Option<String>,
}

impl NewUser {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}
