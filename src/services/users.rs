use serde::Deserialize;

use crate::domain::user::{UserListQuery, UserProfile};
use crate::forms::auth::SignupForm;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::errors::RepositoryError;
use crate::repository::{UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the user list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct UsersQuery {
    /// Page number requested by the client (1-based).
    pub page: Option<usize>,
    /// Items per page.
    pub limit: Option<usize>,
}

/// Register a new account. Colliding email or username is a validation
/// error with a conflict message.
pub fn register<R>(repo: &R, form: SignupForm) -> ServiceResult<UserProfile>
where
    R: UserWriter + ?Sized,
{
    let new_user = form
        .into_new_user()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let created = match repo.create_user(&new_user) {
        Ok(user) => user,
        Err(RepositoryError::UniqueViolation) => {
            return Err(ServiceError::Form(
                "Пользователь с таким email или username уже существует.".to_string(),
            ));
        }
        Err(err) => return Err(ServiceError::from(err)),
    };

    Ok(UserProfile {
        email: created.email,
        id: created.id,
        username: created.username,
        first_name: created.first_name,
        last_name: created.last_name,
        is_subscribed: false,
    })
}

/// Fetch a single profile with `is_subscribed` computed against `viewer`.
pub fn get_profile<R>(repo: &R, viewer: Option<i32>, user_id: i32) -> ServiceResult<UserProfile>
where
    R: UserReader + ?Sized,
{
    repo.get_user_profile(user_id, viewer)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Fetch one page of user profiles.
pub fn list_users<R>(
    repo: &R,
    viewer: Option<i32>,
    query: UsersQuery,
) -> ServiceResult<Paginated<UserProfile>>
where
    R: UserReader + ?Sized,
{
    let page = query.page.unwrap_or(1);
    let per_page = query.limit.unwrap_or(DEFAULT_ITEMS_PER_PAGE).max(1);

    let mut list_query = UserListQuery::new();

    if let Some(viewer_id) = viewer {
        list_query = list_query.viewer(viewer_id);
    }

    list_query = list_query.paginate(page, per_page);

    let (total, profiles) = repo.list_users(list_query).map_err(ServiceError::from)?;
    let total_pages = total.div_ceil(per_page);

    Ok(Paginated::new(profiles, page, total_pages))
}
