use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::domain::ingredient::{Ingredient, IngredientListQuery};
use crate::forms::ingredients::UploadIngredientsForm;
use crate::repository::{IngredientReader, IngredientWriter, UserReader};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the ingredient search endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct IngredientsQuery {
    /// Case-insensitive name prefix.
    pub name: Option<String>,
}

/// Search the ingredient catalog by name prefix. The whole matching set is
/// returned without pagination, ordered by id.
pub fn list_ingredients<R>(repo: &R, query: IngredientsQuery) -> ServiceResult<Vec<Ingredient>>
where
    R: IngredientReader + ?Sized,
{
    let mut list_query = IngredientListQuery::new();

    if let Some(prefix) = query.name.filter(|prefix| !prefix.is_empty()) {
        list_query = list_query.name(prefix);
    }

    repo.list_ingredients(list_query).map_err(ServiceError::from)
}

/// Return a single catalog ingredient by id.
pub fn get_ingredient<R>(repo: &R, ingredient_id: i32) -> ServiceResult<Ingredient>
where
    R: IngredientReader + ?Sized,
{
    repo.get_ingredient_by_id(ingredient_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Bulk-load reference ingredients from an uploaded CSV. Staff only.
pub fn import_ingredients<R>(
    repo: &R,
    user: &AuthenticatedUser,
    mut form: UploadIngredientsForm,
) -> ServiceResult<usize>
where
    R: UserReader + IngredientWriter + ?Sized,
{
    let account = repo
        .get_user_by_id(user.id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::Unauthorized)?;

    if !account.is_staff {
        return Err(ServiceError::Unauthorized);
    }

    let new_ingredients = form
        .into_new_ingredients()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if new_ingredients.is_empty() {
        return Err(ServiceError::Form("Файл не содержит ингредиентов.".to_string()));
    }

    repo.create_ingredients(&new_ingredients)
        .map_err(ServiceError::from)
}
