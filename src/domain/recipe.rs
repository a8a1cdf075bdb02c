use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::tag::Tag;
use crate::domain::user::UserProfile;
use crate::pagination::Pagination;

/// One ingredient line of a recipe as submitted by the author.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientAmount {
    /// Referenced catalog ingredient.
    pub ingredient_id: i32,
    /// Quantity in the ingredient's own measurement unit.
    pub amount: i32,
}

/// One ingredient line of a recipe as shown to readers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecipeIngredientItem {
    /// Id of the catalog ingredient.
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// Recipe aggregate projected for the requesting identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recipe {
    /// Unique identifier of the recipe.
    pub id: i32,
    pub tags: Vec<Tag>,
    pub author: UserProfile,
    pub ingredients: Vec<RecipeIngredientItem>,
    /// Whether the requesting identity favorited this recipe.
    pub is_favorited: bool,
    /// Whether the requesting identity has this recipe in the cart.
    pub is_in_shopping_cart: bool,
    pub name: String,
    /// Opaque encoded image, stored and echoed verbatim.
    pub image: String,
    pub text: String,
    /// Cooking time in minutes, at least one.
    pub cooking_time: i32,
    /// Publication time, used for feed ordering only.
    #[serde(skip_serializing, default)]
    pub created_at: NaiveDateTime,
}

/// Abbreviated recipe used in subscription feeds and mark responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecipeSummary {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

/// Payload required to publish a new recipe.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    /// Author the recipe belongs to.
    pub author_id: i32,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    /// Referenced tag ids, free of duplicates.
    pub tags: Vec<i32>,
    /// Referenced ingredients with amounts, one line per ingredient.
    pub ingredients: Vec<IngredientAmount>,
    /// Publication timestamp captured when the payload was created.
    pub created_at: NaiveDateTime,
}

impl NewRecipe {
    /// Build a recipe payload stamped with the current time.
    pub fn new(
        author_id: i32,
        name: impl Into<String>,
        image: impl Into<String>,
        text: impl Into<String>,
        cooking_time: i32,
        tags: Vec<i32>,
        ingredients: Vec<IngredientAmount>,
    ) -> Self {
        Self {
            author_id,
            name: name.into(),
            image: image.into(),
            text: text.into(),
            cooking_time,
            tags,
            ingredients,
            created_at: chrono::Local::now().naive_utc(),
        }
    }
}

/// Full replacement applied when the author edits a recipe.
#[derive(Debug, Clone)]
pub struct UpdateRecipe {
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    /// New full set of tag ids.
    pub tags: Vec<i32>,
    /// New full set of ingredient lines.
    pub ingredients: Vec<IngredientAmount>,
}

/// Query definition used to filter and paginate the recipe feed.
#[derive(Debug, Clone)]
pub struct RecipeListQuery {
    /// Identity the per-recipe flags are computed against.
    pub viewer: Option<i32>,
    /// Keep only recipes by this author.
    pub author: Option<i32>,
    /// Keep recipes carrying any of these tag slugs.
    pub tag_slugs: Vec<String>,
    /// Keep only recipes the viewer favorited. Ignored for anonymous viewers.
    pub favorited_only: bool,
    /// Keep only recipes in the viewer's cart. Ignored for anonymous viewers.
    pub in_cart_only: bool,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl RecipeListQuery {
    /// Construct a query over the whole feed, viewed anonymously.
    pub fn new() -> Self {
        Self {
            viewer: None,
            author: None,
            tag_slugs: Vec::new(),
            favorited_only: false,
            in_cart_only: false,
            pagination: None,
        }
    }

    /// Compute `is_favorited`/`is_in_shopping_cart` relative to `viewer`.
    pub fn viewer(mut self, viewer: i32) -> Self {
        self.viewer = Some(viewer);
        self
    }

    /// Filter the results to recipes published by `author`.
    pub fn author(mut self, author: i32) -> Self {
        self.author = Some(author);
        self
    }

    /// Filter the results to recipes carrying any of `slugs`.
    pub fn tags(mut self, slugs: Vec<String>) -> Self {
        self.tag_slugs = slugs;
        self
    }

    /// Restrict to recipes the viewer favorited.
    pub fn favorited(mut self) -> Self {
        self.favorited_only = true;
        self
    }

    /// Restrict to recipes in the viewer's shopping cart.
    pub fn in_cart(mut self) -> Self {
        self.in_cart_only = true;
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

impl Default for RecipeListQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name.clone(),
            image: recipe.image.clone(),
            cooking_time: recipe.cooking_time,
        }
    }
}
