use serde::{Deserialize, Serialize};

use crate::domain::recipe::RecipeSummary;
use crate::domain::user::UserProfile;
use crate::pagination::Pagination;

/// Followed author together with their recipe feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubscribedAuthor {
    /// Profile of the author; `is_subscribed` is always `true` here.
    #[serde(flatten)]
    pub author: UserProfile,
    /// The author's recipes, newest first, optionally capped.
    pub recipes: Vec<RecipeSummary>,
    /// Total number of recipes the author published.
    pub recipes_count: usize,
}

/// Query definition used to list the authors a user follows.
#[derive(Debug, Clone)]
pub struct SubscriptionListQuery {
    /// The follower whose subscriptions are listed.
    pub user_id: i32,
    /// Cap on the embedded recipe list. `None` means unlimited.
    pub recipes_limit: Option<usize>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl SubscriptionListQuery {
    /// Construct a query over everything `user_id` is subscribed to.
    pub fn new(user_id: i32) -> Self {
        Self {
            user_id,
            recipes_limit: None,
            pagination: None,
        }
    }

    /// Cap each author's embedded recipe list at `limit` entries.
    pub fn recipes_limit(mut self, limit: usize) -> Self {
        self.recipes_limit = Some(limit);
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
