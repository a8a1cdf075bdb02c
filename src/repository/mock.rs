use mockall::mock;

use super::{
    FavoriteWriter, IngredientReader, IngredientWriter, RecipeReader, RecipeWriter,
    ShoppingCartReader, ShoppingCartWriter, SubscriptionReader, SubscriptionWriter, TagReader,
    TagWriter, UserReader, UserWriter,
};
use crate::domain::{
    ingredient::{Ingredient, IngredientListQuery, NewIngredient},
    recipe::{NewRecipe, Recipe, RecipeListQuery, UpdateRecipe},
    shopping_list::ShoppingListItem,
    subscription::{SubscribedAuthor, SubscriptionListQuery},
    tag::{NewTag, Tag},
    user::{NewUser, User, UserListQuery, UserProfile},
};
use crate::repository::errors::RepositoryResult;

mock! {
    pub UserReader {}

    impl UserReader for UserReader {
        fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
        fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
        fn get_user_profile(&self, id: i32, viewer: Option<i32>) -> RepositoryResult<Option<UserProfile>>;
        fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<UserProfile>)>;
    }
}

mock! {
    pub UserWriter {}

    impl UserWriter for UserWriter {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    }
}

mock! {
    pub TagReader {}

    impl TagReader for TagReader {
        fn get_tag_by_id(&self, id: i32) -> RepositoryResult<Option<Tag>>;
        fn get_tags_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<Tag>>;
        fn list_tags(&self) -> RepositoryResult<Vec<Tag>>;
    }
}

mock! {
    pub TagWriter {}

    impl TagWriter for TagWriter {
        fn create_tag(&self, new_tag: &NewTag) -> RepositoryResult<Tag>;
    }
}

mock! {
    pub IngredientReader {}

    impl IngredientReader for IngredientReader {
        fn get_ingredient_by_id(&self, id: i32) -> RepositoryResult<Option<Ingredient>>;
        fn get_ingredients_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<Ingredient>>;
        fn list_ingredients(&self, query: IngredientListQuery) -> RepositoryResult<Vec<Ingredient>>;
    }
}

mock! {
    pub IngredientWriter {}

    impl IngredientWriter for IngredientWriter {
        fn create_ingredients(&self, new_ingredients: &[NewIngredient]) -> RepositoryResult<usize>;
    }
}

mock! {
    pub RecipeReader {}

    impl RecipeReader for RecipeReader {
        fn get_recipe_by_id(&self, id: i32, viewer: Option<i32>) -> RepositoryResult<Option<Recipe>>;
        fn list_recipes(&self, query: RecipeListQuery) -> RepositoryResult<(usize, Vec<Recipe>)>;
    }
}

mock! {
    pub RecipeWriter {}

    impl RecipeWriter for RecipeWriter {
        fn create_recipe(&self, new_recipe: &NewRecipe) -> RepositoryResult<Recipe>;
        fn update_recipe(&self, recipe_id: i32, author_id: i32, updates: &UpdateRecipe) -> RepositoryResult<Recipe>;
        fn delete_recipe(&self, recipe_id: i32, author_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub FavoriteWriter {}

    impl FavoriteWriter for FavoriteWriter {
        fn add_favorite(&self, user_id: i32, recipe_id: i32) -> RepositoryResult<()>;
        fn remove_favorite(&self, user_id: i32, recipe_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub ShoppingCartReader {}

    impl ShoppingCartReader for ShoppingCartReader {
        fn shopping_list(&self, user_id: i32) -> RepositoryResult<Vec<ShoppingListItem>>;
    }
}

mock! {
    pub ShoppingCartWriter {}

    impl ShoppingCartWriter for ShoppingCartWriter {
        fn add_to_cart(&self, user_id: i32, recipe_id: i32) -> RepositoryResult<()>;
        fn remove_from_cart(&self, user_id: i32, recipe_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub SubscriptionReader {}

    impl SubscriptionReader for SubscriptionReader {
        fn get_subscribed_author(&self, viewer: i32, author_id: i32, recipes_limit: Option<usize>) -> RepositoryResult<Option<SubscribedAuthor>>;
        fn list_subscriptions(&self, query: SubscriptionListQuery) -> RepositoryResult<(usize, Vec<SubscribedAuthor>)>;
    }
}

mock! {
    pub SubscriptionWriter {}

    impl SubscriptionWriter for SubscriptionWriter {
        fn subscribe(&self, user_id: i32, author_id: i32) -> RepositoryResult<()>;
        fn unsubscribe(&self, user_id: i32, author_id: i32) -> RepositoryResult<()>;
    }
}
