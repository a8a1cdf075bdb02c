use foodgram::domain::ingredient::IngredientListQuery;
use foodgram::domain::recipe::{IngredientAmount, NewRecipe, RecipeListQuery, UpdateRecipe};
use foodgram::domain::subscription::SubscriptionListQuery;
use foodgram::repository::errors::RepositoryError;
use foodgram::repository::{
    DieselRepository, FavoriteWriter, IngredientReader, RecipeReader, RecipeWriter,
    ShoppingCartReader, ShoppingCartWriter, SubscriptionReader, SubscriptionWriter, TagReader,
    TagWriter, UserReader,
};

mod common;

fn sample_recipe(
    author_id: i32,
    name: &str,
    tags: Vec<i32>,
    ingredients: Vec<IngredientAmount>,
) -> NewRecipe {
    NewRecipe::new(
        author_id,
        name,
        "data:image/png;base64,iVBOR",
        "Порядок приготовления.",
        30,
        tags,
        ingredients,
    )
}

#[test]
fn test_recipe_round_trip_preserves_aggregate() {
    let test_db = common::TestDb::new("test_recipe_round_trip.db");
    let repo = DieselRepository::new(test_db.pool());

    let author = common::seed_user(&repo, "author");
    let breakfast = common::seed_tag(&repo, "Завтрак", "#ff0000", "breakfast");
    let lunch = common::seed_tag(&repo, "Обед", "#00ff00", "lunch");
    common::seed_ingredients(&repo, &[("Сахар", "г"), ("Молоко", "мл")]);

    let created = repo
        .create_recipe(&sample_recipe(
            author.id,
            "Каша",
            vec![breakfast, lunch],
            vec![
                IngredientAmount {
                    ingredient_id: 1,
                    amount: 200,
                },
                IngredientAmount {
                    ingredient_id: 2,
                    amount: 50,
                },
            ],
        ))
        .expect("create recipe");

    let fetched = repo
        .get_recipe_by_id(created.id, None)
        .expect("get recipe")
        .expect("recipe should exist");

    let mut tag_ids: Vec<i32> = fetched.tags.iter().map(|tag| tag.id).collect();
    tag_ids.sort_unstable();
    assert_eq!(tag_ids, vec![breakfast, lunch]);

    assert_eq!(fetched.ingredients.len(), 2);
    assert_eq!(fetched.ingredients[0].name, "Сахар");
    assert_eq!(fetched.ingredients[0].amount, 200);
    assert_eq!(fetched.ingredients[1].measurement_unit, "мл");
    assert_eq!(fetched.ingredients[1].amount, 50);

    assert_eq!(fetched.author.id, author.id);
    assert!(!fetched.is_favorited);
    assert!(!fetched.is_in_shopping_cart);

    // Reading twice without writes yields identical projections.
    let again = repo
        .get_recipe_by_id(created.id, None)
        .expect("get recipe")
        .expect("recipe should exist");
    assert_eq!(fetched, again);
}

#[test]
fn test_recipe_update_replaces_join_rows() {
    let test_db = common::TestDb::new("test_recipe_update_replaces_join_rows.db");
    let repo = DieselRepository::new(test_db.pool());

    let author = common::seed_user(&repo, "author");
    let breakfast = common::seed_tag(&repo, "Завтрак", "#ff0000", "breakfast");
    let lunch = common::seed_tag(&repo, "Обед", "#00ff00", "lunch");
    common::seed_ingredients(&repo, &[("Сахар", "г"), ("Молоко", "мл"), ("Мука", "г")]);

    let created = repo
        .create_recipe(&sample_recipe(
            author.id,
            "Каша",
            vec![breakfast],
            vec![
                IngredientAmount {
                    ingredient_id: 1,
                    amount: 200,
                },
                IngredientAmount {
                    ingredient_id: 2,
                    amount: 50,
                },
            ],
        ))
        .expect("create recipe");

    let updates = UpdateRecipe {
        name: "Блины".to_string(),
        image: "data:image/png;base64,iVBOR".to_string(),
        text: "Новый порядок.".to_string(),
        cooking_time: 45,
        tags: vec![lunch],
        ingredients: vec![
            // Unchanged line survives the update.
            IngredientAmount {
                ingredient_id: 1,
                amount: 200,
            },
            IngredientAmount {
                ingredient_id: 3,
                amount: 500,
            },
        ],
    };

    let updated = repo
        .update_recipe(created.id, author.id, &updates)
        .expect("update recipe");

    assert_eq!(updated.name, "Блины");
    assert_eq!(updated.cooking_time, 45);

    let tag_ids: Vec<i32> = updated.tags.iter().map(|tag| tag.id).collect();
    assert_eq!(tag_ids, vec![lunch]);

    let lines: Vec<(i32, i32)> = updated
        .ingredients
        .iter()
        .map(|line| (line.id, line.amount))
        .collect();
    assert_eq!(lines, vec![(1, 200), (3, 500)]);
}

#[test]
fn test_recipe_update_is_author_scoped() {
    let test_db = common::TestDb::new("test_recipe_update_is_author_scoped.db");
    let repo = DieselRepository::new(test_db.pool());

    let author = common::seed_user(&repo, "author");
    let intruder = common::seed_user(&repo, "intruder");
    common::seed_ingredients(&repo, &[("Сахар", "г")]);

    let created = repo
        .create_recipe(&sample_recipe(author.id, "Каша", Vec::new(), Vec::new()))
        .expect("create recipe");

    let updates = UpdateRecipe {
        name: "Чужая каша".to_string(),
        image: "data:image/png;base64,iVBOR".to_string(),
        text: "Перехвачено.".to_string(),
        cooking_time: 5,
        tags: Vec::new(),
        ingredients: Vec::new(),
    };

    let err = repo
        .update_recipe(created.id, intruder.id, &updates)
        .expect_err("expected author-scoped update to fail");
    assert!(matches!(err, RepositoryError::NotFound));

    let err = repo
        .delete_recipe(created.id, intruder.id)
        .expect_err("expected author-scoped delete to fail");
    assert!(matches!(err, RepositoryError::NotFound));

    repo.delete_recipe(created.id, author.id)
        .expect("author can delete");
    assert!(
        repo.get_recipe_by_id(created.id, None)
            .expect("get recipe")
            .is_none()
    );
}

#[test]
fn test_recipe_filters() {
    let test_db = common::TestDb::new("test_recipe_filters.db");
    let repo = DieselRepository::new(test_db.pool());

    let alice = common::seed_user(&repo, "alice");
    let bob = common::seed_user(&repo, "bob");
    let breakfast = common::seed_tag(&repo, "Завтрак", "#ff0000", "breakfast");
    let lunch = common::seed_tag(&repo, "Обед", "#00ff00", "lunch");
    common::seed_ingredients(&repo, &[("Сахар", "г")]);

    let porridge = repo
        .create_recipe(&sample_recipe(
            alice.id,
            "Каша",
            vec![breakfast],
            Vec::new(),
        ))
        .expect("create recipe");
    let soup = repo
        .create_recipe(&sample_recipe(bob.id, "Суп", vec![lunch], Vec::new()))
        .expect("create recipe");

    // By author.
    let (total, items) = repo
        .list_recipes(RecipeListQuery::new().author(alice.id))
        .expect("list recipes");
    assert_eq!(total, 1);
    assert_eq!(items[0].id, porridge.id);

    // By tag slugs, OR semantics.
    let (total, _) = repo
        .list_recipes(
            RecipeListQuery::new().tags(vec!["breakfast".to_string(), "lunch".to_string()]),
        )
        .expect("list recipes");
    assert_eq!(total, 2);

    // Favorites restriction for an authenticated viewer.
    repo.add_favorite(alice.id, soup.id).expect("add favorite");
    let (total, items) = repo
        .list_recipes(RecipeListQuery::new().viewer(alice.id).favorited())
        .expect("list recipes");
    assert_eq!(total, 1);
    assert_eq!(items[0].id, soup.id);
    assert!(items[0].is_favorited);

    // The same restriction is a no-op for anonymous viewers.
    let (total, _) = repo
        .list_recipes(RecipeListQuery::new().favorited())
        .expect("list recipes");
    assert_eq!(total, 2);

    // Newest first.
    let (_, items) = repo
        .list_recipes(RecipeListQuery::new())
        .expect("list recipes");
    assert_eq!(items[0].id, soup.id);
}

#[test]
fn test_ingredient_prefix_search_is_case_insensitive() {
    let test_db = common::TestDb::new("test_ingredient_prefix_search.db");
    let repo = DieselRepository::new(test_db.pool());

    common::seed_ingredients(&repo, &[("Salt", "g"), ("Wasal", "g"), ("salmon", "g")]);

    let found = repo
        .list_ingredients(IngredientListQuery::new().name("Sal"))
        .expect("list ingredients");

    let names: Vec<&str> = found.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, vec!["Salt", "salmon"]);
}

#[test]
fn test_favorite_marks_are_unique_per_pair() {
    let test_db = common::TestDb::new("test_favorite_marks_unique.db");
    let repo = DieselRepository::new(test_db.pool());

    let alice = common::seed_user(&repo, "alice");
    common::seed_ingredients(&repo, &[("Сахар", "г")]);
    let recipe = repo
        .create_recipe(&sample_recipe(alice.id, "Каша", Vec::new(), Vec::new()))
        .expect("create recipe");

    repo.add_favorite(alice.id, recipe.id).expect("add favorite");

    let err = repo
        .add_favorite(alice.id, recipe.id)
        .expect_err("expected duplicate favorite to fail");
    assert!(matches!(err, RepositoryError::UniqueViolation));

    repo.remove_favorite(alice.id, recipe.id)
        .expect("remove favorite");

    let err = repo
        .remove_favorite(alice.id, recipe.id)
        .expect_err("expected removing a missing mark to fail");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_shopping_list_aggregates_and_sorts() {
    let test_db = common::TestDb::new("test_shopping_list_aggregation.db");
    let repo = DieselRepository::new(test_db.pool());

    let alice = common::seed_user(&repo, "alice");
    common::seed_ingredients(&repo, &[("sugar", "g"), ("milk", "ml")]);

    let first = repo
        .create_recipe(&sample_recipe(
            alice.id,
            "Recipe1",
            Vec::new(),
            vec![IngredientAmount {
                ingredient_id: 1,
                amount: 200,
            }],
        ))
        .expect("create recipe");
    let second = repo
        .create_recipe(&sample_recipe(
            alice.id,
            "Recipe2",
            Vec::new(),
            vec![
                IngredientAmount {
                    ingredient_id: 1,
                    amount: 100,
                },
                IngredientAmount {
                    ingredient_id: 2,
                    amount: 50,
                },
            ],
        ))
        .expect("create recipe");

    repo.add_to_cart(alice.id, first.id).expect("add to cart");
    repo.add_to_cart(alice.id, second.id).expect("add to cart");

    let items = repo.shopping_list(alice.id).expect("shopping list");

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].name, "sugar");
    assert_eq!(items[0].measurement_unit, "g");
    assert_eq!(items[0].total, 300);
    assert_eq!(items[1].name, "milk");
    assert_eq!(items[1].total, 50);

    // Recipes outside the cart do not contribute.
    repo.remove_from_cart(alice.id, second.id)
        .expect("remove from cart");
    let items = repo.shopping_list(alice.id).expect("shopping list");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].total, 200);
}

#[test]
fn test_subscription_constraints_and_listing() {
    let test_db = common::TestDb::new("test_subscription_constraints.db");
    let repo = DieselRepository::new(test_db.pool());

    let alice = common::seed_user(&repo, "alice");
    let bob = common::seed_user(&repo, "bob");
    common::seed_ingredients(&repo, &[("Сахар", "г")]);

    for index in 0..3 {
        repo.create_recipe(&sample_recipe(
            bob.id,
            &format!("Рецепт {index}"),
            Vec::new(),
            Vec::new(),
        ))
        .expect("create recipe");
    }

    repo.subscribe(alice.id, bob.id).expect("subscribe");

    let err = repo
        .subscribe(alice.id, bob.id)
        .expect_err("expected duplicate subscription to fail");
    assert!(matches!(err, RepositoryError::UniqueViolation));

    let err = repo
        .subscribe(alice.id, alice.id)
        .expect_err("expected self-subscription to fail");
    assert!(matches!(err, RepositoryError::CheckViolation));

    let (total, authors) = repo
        .list_subscriptions(SubscriptionListQuery::new(alice.id).recipes_limit(2))
        .expect("list subscriptions");

    assert_eq!(total, 1);
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].author.id, bob.id);
    assert!(authors[0].author.is_subscribed);
    assert_eq!(authors[0].recipes_count, 3);
    assert_eq!(authors[0].recipes.len(), 2);

    // The flag shows up on profile reads too.
    let profile = repo
        .get_user_profile(bob.id, Some(alice.id))
        .expect("get profile")
        .expect("profile should exist");
    assert!(profile.is_subscribed);

    repo.unsubscribe(alice.id, bob.id).expect("unsubscribe");

    let err = repo
        .unsubscribe(alice.id, bob.id)
        .expect_err("expected unsubscribing twice to fail");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_recipe_delete_cascades_to_marks() {
    let test_db = common::TestDb::new("test_recipe_delete_cascades.db");
    let repo = DieselRepository::new(test_db.pool());

    let alice = common::seed_user(&repo, "alice");
    common::seed_ingredients(&repo, &[("Сахар", "г")]);

    let recipe = repo
        .create_recipe(&sample_recipe(
            alice.id,
            "Каша",
            Vec::new(),
            vec![IngredientAmount {
                ingredient_id: 1,
                amount: 200,
            }],
        ))
        .expect("create recipe");

    repo.add_favorite(alice.id, recipe.id).expect("add favorite");
    repo.add_to_cart(alice.id, recipe.id).expect("add to cart");

    repo.delete_recipe(recipe.id, alice.id).expect("delete recipe");

    assert!(repo.shopping_list(alice.id).expect("shopping list").is_empty());

    let err = repo
        .remove_favorite(alice.id, recipe.id)
        .expect_err("expected the favorite mark to be gone");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_duplicate_tag_catalog_entries_are_rejected() {
    let test_db = common::TestDb::new("test_duplicate_tag_catalog.db");
    let repo = DieselRepository::new(test_db.pool());

    common::seed_tag(&repo, "Завтрак", "#ff0000", "breakfast");

    let err = repo
        .create_tag(&foodgram::domain::tag::NewTag::new(
            "Завтрак",
            "#00ff00",
            "breakfast-2",
        ))
        .expect_err("expected duplicate tag name to fail");
    assert!(matches!(err, RepositoryError::UniqueViolation));

    let tags = repo.list_tags().expect("list tags");
    assert_eq!(tags.len(), 1);
}
