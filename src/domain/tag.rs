use serde::{Deserialize, Serialize};

/// Reusable label attached to recipes; matched by slug when filtering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    /// Unique identifier of the tag.
    pub id: i32,
    /// Unique human-readable name.
    pub name: String,
    /// Unique `#rrggbb` color code.
    pub color: String,
    /// Unique URL-safe identifier.
    pub slug: String,
}

/// Payload required to insert a new tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub name: String,
    pub color: String,
    pub slug: String,
}

impl NewTag {
    /// Construct a new tag payload with trimmed fields.
    pub fn new(name: impl Into<String>, color: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            color: color.into().trim().to_string(),
            slug: slug.into().trim().to_string(),
        }
    }
}
