use crate::auth::AuthenticatedUser;
use crate::domain::recipe::RecipeSummary;
use crate::repository::errors::RepositoryError;
use crate::repository::{FavoriteWriter, RecipeReader};
use crate::services::{ServiceError, ServiceResult};

/// Mark a recipe as a favorite of `user`. The recipe must exist; marking it
/// twice is a validation error.
pub fn add_favorite<R>(
    repo: &R,
    user: &AuthenticatedUser,
    recipe_id: i32,
) -> ServiceResult<RecipeSummary>
where
    R: RecipeReader + FavoriteWriter + ?Sized,
{
    let recipe = repo
        .get_recipe_by_id(recipe_id, Some(user.id))
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    match repo.add_favorite(user.id, recipe_id) {
        Ok(()) => Ok(RecipeSummary::from(&recipe)),
        Err(RepositoryError::UniqueViolation) => Err(ServiceError::Form(
            "Рецепт уже в избранном.".to_string(),
        )),
        Err(err) => Err(ServiceError::from(err)),
    }
}

/// Drop the favorite mark. Removing a mark that was never set is a
/// validation error, not a missing resource.
pub fn remove_favorite<R>(repo: &R, user: &AuthenticatedUser, recipe_id: i32) -> ServiceResult<()>
where
    R: FavoriteWriter + ?Sized,
{
    match repo.remove_favorite(user.id, recipe_id) {
        Ok(()) => Ok(()),
        Err(RepositoryError::NotFound) => Err(ServiceError::Form(
            "Рецепта нет в избранном.".to_string(),
        )),
        Err(err) => Err(ServiceError::from(err)),
    }
}
