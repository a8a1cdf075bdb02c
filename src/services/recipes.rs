use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::domain::recipe::{IngredientAmount, Recipe, RecipeListQuery};
use crate::forms::recipes::RecipeForm;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{IngredientReader, RecipeReader, RecipeWriter, TagReader};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the recipe feed endpoint. `tags` may be
/// repeated, so the raw query string is parsed with `serde_html_form`.
#[derive(Debug, Default, Deserialize)]
pub struct RecipesQuery {
    /// Page number requested by the client (1-based).
    pub page: Option<usize>,
    /// Items per page.
    pub limit: Option<usize>,
    /// Keep only recipes by this author.
    pub author: Option<i32>,
    /// Keep recipes carrying any of these tag slugs.
    #[serde(default)]
    pub tags: Vec<String>,
    /// `1`/`true` restricts to the viewer's favorites.
    pub is_favorited: Option<String>,
    /// `1`/`true` restricts to the viewer's shopping cart.
    pub is_in_shopping_cart: Option<String>,
}

/// The boolean filters accept `1`/`true`; anything else is a no-op.
fn flag_is_set(value: Option<&str>) -> bool {
    matches!(value, Some("1") | Some("true") | Some("True"))
}

/// Fetch one page of the recipe feed, filtered per the query and projected
/// for `viewer`.
pub fn list_recipes<R>(
    repo: &R,
    viewer: Option<i32>,
    query: RecipesQuery,
) -> ServiceResult<Paginated<Recipe>>
where
    R: RecipeReader + ?Sized,
{
    let page = query.page.unwrap_or(1);
    let per_page = query.limit.unwrap_or(DEFAULT_ITEMS_PER_PAGE).max(1);

    let mut list_query = RecipeListQuery::new();

    if let Some(viewer_id) = viewer {
        list_query = list_query.viewer(viewer_id);
    }

    if let Some(author) = query.author {
        list_query = list_query.author(author);
    }

    if !query.tags.is_empty() {
        list_query = list_query.tags(query.tags);
    }

    // For anonymous viewers the repository ignores both restrictions.
    if flag_is_set(query.is_favorited.as_deref()) {
        list_query = list_query.favorited();
    }

    if flag_is_set(query.is_in_shopping_cart.as_deref()) {
        list_query = list_query.in_cart();
    }

    list_query = list_query.paginate(page, per_page);

    let (total, recipes) = repo.list_recipes(list_query).map_err(ServiceError::from)?;
    let total_pages = total.div_ceil(per_page);

    Ok(Paginated::new(recipes, page, total_pages))
}

/// Fetch a single recipe projected for `viewer`.
pub fn get_recipe<R>(repo: &R, viewer: Option<i32>, recipe_id: i32) -> ServiceResult<Recipe>
where
    R: RecipeReader + ?Sized,
{
    repo.get_recipe_by_id(recipe_id, viewer)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Publish a new recipe owned by `user`.
pub fn create_recipe<R>(repo: &R, user: &AuthenticatedUser, form: RecipeForm) -> ServiceResult<Recipe>
where
    R: RecipeWriter + TagReader + IngredientReader + ?Sized,
{
    let new_recipe = form
        .into_new_recipe(user.id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    ensure_references(repo, &new_recipe.tags, &new_recipe.ingredients)?;

    repo.create_recipe(&new_recipe).map_err(ServiceError::from)
}

/// Replace a recipe the caller authored.
pub fn update_recipe<R>(
    repo: &R,
    user: &AuthenticatedUser,
    recipe_id: i32,
    form: RecipeForm,
) -> ServiceResult<Recipe>
where
    R: RecipeReader + RecipeWriter + TagReader + IngredientReader + ?Sized,
{
    let existing = repo
        .get_recipe_by_id(recipe_id, Some(user.id))
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    if existing.author.id != user.id {
        return Err(ServiceError::Unauthorized);
    }

    let updates = form
        .into_update_recipe()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    ensure_references(repo, &updates.tags, &updates.ingredients)?;

    repo.update_recipe(recipe_id, user.id, &updates)
        .map_err(ServiceError::from)
}

/// Delete a recipe the caller authored, join rows included.
pub fn delete_recipe<R>(repo: &R, user: &AuthenticatedUser, recipe_id: i32) -> ServiceResult<()>
where
    R: RecipeReader + RecipeWriter + ?Sized,
{
    let existing = repo
        .get_recipe_by_id(recipe_id, Some(user.id))
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    if existing.author.id != user.id {
        return Err(ServiceError::Unauthorized);
    }

    repo.delete_recipe(recipe_id, user.id)
        .map_err(ServiceError::from)
}

/// Every referenced tag and ingredient must exist. The submission is free
/// of duplicates by the time this runs, so a length comparison suffices.
fn ensure_references<R>(
    repo: &R,
    tags: &[i32],
    ingredients: &[IngredientAmount],
) -> ServiceResult<()>
where
    R: TagReader + IngredientReader + ?Sized,
{
    let found_tags = repo.get_tags_by_ids(tags).map_err(ServiceError::from)?;
    if found_tags.len() != tags.len() {
        return Err(ServiceError::Form("Указан несуществующий тег.".to_string()));
    }

    let ingredient_ids: Vec<i32> = ingredients.iter().map(|line| line.ingredient_id).collect();
    let found_ingredients = repo
        .get_ingredients_by_ids(&ingredient_ids)
        .map_err(ServiceError::from)?;
    if found_ingredients.len() != ingredient_ids.len() {
        return Err(ServiceError::Form(
            "Указан несуществующий ингредиент.".to_string(),
        ));
    }

    Ok(())
}
