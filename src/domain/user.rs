use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Full account record, including the credential hash. Never serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique identifier of the user.
    pub id: i32,
    /// Unique e-mail address.
    pub email: String,
    /// Unique login name.
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// argon2 hash of the password.
    pub password_hash: String,
    /// Staff accounts may load reference data.
    pub is_staff: bool,
}

/// Public projection of a user, relative to the requesting identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub email: String,
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Whether the requesting identity follows this user. Always `false`
    /// for anonymous callers.
    pub is_subscribed: bool,
}

/// Payload required to register a new account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

impl NewUser {
    /// Construct a registration payload with trimmed identifiers.
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into().trim().to_string(),
            username: username.into().trim().to_string(),
            first_name: first_name.into().trim().to_string(),
            last_name: last_name.into().trim().to_string(),
            password_hash: password_hash.into(),
        }
    }
}

/// Query definition used to list user profiles.
#[derive(Debug, Clone)]
pub struct UserListQuery {
    /// Identity the `is_subscribed` flags are computed against.
    pub viewer: Option<i32>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl UserListQuery {
    /// Construct a query over all users, viewed anonymously.
    pub fn new() -> Self {
        Self {
            viewer: None,
            pagination: None,
        }
    }

    /// Compute subscription flags relative to `viewer`.
    pub fn viewer(mut self, viewer: i32) -> Self {
        self.viewer = Some(viewer);
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

impl Default for UserListQuery {
    fn default() -> Self {
        Self::new()
    }
}
