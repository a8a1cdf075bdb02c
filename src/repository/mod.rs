use crate::db::{DbConnection, DbPool};
use crate::domain::ingredient::{Ingredient, IngredientListQuery, NewIngredient};
use crate::domain::recipe::{NewRecipe, Recipe, RecipeListQuery, UpdateRecipe};
use crate::domain::shopping_list::ShoppingListItem;
use crate::domain::subscription::{SubscribedAuthor, SubscriptionListQuery};
use crate::domain::tag::{NewTag, Tag};
use crate::domain::user::{NewUser, User, UserListQuery, UserProfile};
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod favorite;
pub mod ingredient;
pub mod recipe;
pub mod shopping_cart;
pub mod subscription;
pub mod tag;
pub mod user;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over user accounts.
pub trait UserReader {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    fn get_user_profile(&self, id: i32, viewer: Option<i32>)
    -> RepositoryResult<Option<UserProfile>>;
    fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<UserProfile>)>;
}

/// Write operations over user accounts.
pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
}

/// Read-only operations over the tag catalog.
pub trait TagReader {
    fn get_tag_by_id(&self, id: i32) -> RepositoryResult<Option<Tag>>;
    fn get_tags_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<Tag>>;
    fn list_tags(&self) -> RepositoryResult<Vec<Tag>>;
}

/// Write operations over the tag catalog.
pub trait TagWriter {
    fn create_tag(&self, new_tag: &NewTag) -> RepositoryResult<Tag>;
}

/// Read-only operations over the ingredient catalog.
pub trait IngredientReader {
    fn get_ingredient_by_id(&self, id: i32) -> RepositoryResult<Option<Ingredient>>;
    fn get_ingredients_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<Ingredient>>;
    fn list_ingredients(&self, query: IngredientListQuery) -> RepositoryResult<Vec<Ingredient>>;
}

/// Write operations over the ingredient catalog.
pub trait IngredientWriter {
    fn create_ingredients(&self, new_ingredients: &[NewIngredient]) -> RepositoryResult<usize>;
}

/// Read-only operations over recipe aggregates.
pub trait RecipeReader {
    fn get_recipe_by_id(&self, id: i32, viewer: Option<i32>) -> RepositoryResult<Option<Recipe>>;
    fn list_recipes(&self, query: RecipeListQuery) -> RepositoryResult<(usize, Vec<Recipe>)>;
}

/// Write operations over recipe aggregates. Updates and deletes are scoped
/// to the author owning the recipe.
pub trait RecipeWriter {
    fn create_recipe(&self, new_recipe: &NewRecipe) -> RepositoryResult<Recipe>;
    fn update_recipe(
        &self,
        recipe_id: i32,
        author_id: i32,
        updates: &UpdateRecipe,
    ) -> RepositoryResult<Recipe>;
    fn delete_recipe(&self, recipe_id: i32, author_id: i32) -> RepositoryResult<()>;
}

/// Write operations over per-user favorite marks.
pub trait FavoriteWriter {
    fn add_favorite(&self, user_id: i32, recipe_id: i32) -> RepositoryResult<()>;
    fn remove_favorite(&self, user_id: i32, recipe_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over shopping carts.
pub trait ShoppingCartReader {
    /// Aggregate the cart into (name, unit) groups with summed amounts,
    /// largest total first.
    fn shopping_list(&self, user_id: i32) -> RepositoryResult<Vec<ShoppingListItem>>;
}

/// Write operations over per-user shopping-cart marks.
pub trait ShoppingCartWriter {
    fn add_to_cart(&self, user_id: i32, recipe_id: i32) -> RepositoryResult<()>;
    fn remove_from_cart(&self, user_id: i32, recipe_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over the follow relation.
pub trait SubscriptionReader {
    fn get_subscribed_author(
        &self,
        viewer: i32,
        author_id: i32,
        recipes_limit: Option<usize>,
    ) -> RepositoryResult<Option<SubscribedAuthor>>;
    fn list_subscriptions(
        &self,
        query: SubscriptionListQuery,
    ) -> RepositoryResult<(usize, Vec<SubscribedAuthor>)>;
}

/// Write operations over the follow relation.
pub trait SubscriptionWriter {
    fn subscribe(&self, user_id: i32, author_id: i32) -> RepositoryResult<()>;
    fn unsubscribe(&self, user_id: i32, author_id: i32) -> RepositoryResult<()>;
}
