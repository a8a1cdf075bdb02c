use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::domain::subscription::{SubscribedAuthor, SubscriptionListQuery};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::errors::RepositoryError;
use crate::repository::{SubscriptionReader, SubscriptionWriter, UserReader};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the subscription endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct SubscriptionsQuery {
    /// Page number requested by the client (1-based).
    pub page: Option<usize>,
    /// Items per page.
    pub limit: Option<usize>,
    /// Cap on each author's embedded recipe list. Anything non-numeric
    /// means unlimited.
    pub recipes_limit: Option<String>,
}

impl SubscriptionsQuery {
    fn parsed_recipes_limit(&self) -> Option<usize> {
        self.recipes_limit
            .as_deref()
            .and_then(|value| value.parse().ok())
    }
}

/// Follow `author_id` on behalf of `user` and return the author's feed
/// projection. Following yourself or an already followed author is a
/// validation error; an unknown author is a missing resource.
pub fn subscribe<R>(
    repo: &R,
    user: &AuthenticatedUser,
    author_id: i32,
    query: SubscriptionsQuery,
) -> ServiceResult<SubscribedAuthor>
where
    R: UserReader + SubscriptionReader + SubscriptionWriter + ?Sized,
{
    if user.id == author_id {
        return Err(ServiceError::Form("Нельзя подписаться на себя.".to_string()));
    }

    repo.get_user_by_id(author_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    match repo.subscribe(user.id, author_id) {
        Ok(()) => {}
        Err(RepositoryError::UniqueViolation) => {
            return Err(ServiceError::Form(
                "Вы уже подписаны на этого автора.".to_string(),
            ));
        }
        Err(RepositoryError::CheckViolation) => {
            return Err(ServiceError::Form("Нельзя подписаться на себя.".to_string()));
        }
        Err(err) => return Err(ServiceError::from(err)),
    }

    repo.get_subscribed_author(user.id, author_id, query.parsed_recipes_limit())
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Stop following `author_id`. Unsubscribing from an author the caller
/// never followed is a validation error.
pub fn unsubscribe<R>(repo: &R, user: &AuthenticatedUser, author_id: i32) -> ServiceResult<()>
where
    R: SubscriptionWriter + ?Sized,
{
    match repo.unsubscribe(user.id, author_id) {
        Ok(()) => Ok(()),
        Err(RepositoryError::NotFound) => Err(ServiceError::Form(
            "Нельзя отписаться от автора, на которого вы не подписаны.".to_string(),
        )),
        Err(err) => Err(ServiceError::from(err)),
    }
}

/// Fetch one page of the authors the caller follows, each with their
/// recipe feed and total recipe count.
pub fn list_subscriptions<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: SubscriptionsQuery,
) -> ServiceResult<Paginated<SubscribedAuthor>>
where
    R: SubscriptionReader + ?Sized,
{
    let page = query.page.unwrap_or(1);
    let per_page = query.limit.unwrap_or(DEFAULT_ITEMS_PER_PAGE).max(1);

    let mut list_query = SubscriptionListQuery::new(user.id);

    if let Some(limit) = query.parsed_recipes_limit() {
        list_query = list_query.recipes_limit(limit);
    }

    list_query = list_query.paginate(page, per_page);

    let (total, authors) = repo
        .list_subscriptions(list_query)
        .map_err(ServiceError::from)?;
    let total_pages = total.div_ceil(per_page);

    Ok(Paginated::new(authors, page, total_pages))
}
