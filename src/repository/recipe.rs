use std::collections::{HashMap, HashSet};

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::recipe::{
    NewRecipe as DomainNewRecipe, Recipe as DomainRecipe, RecipeIngredientItem, RecipeListQuery,
    UpdateRecipe as DomainUpdateRecipe,
};
use crate::domain::tag::Tag as DomainTag;
use crate::models::ingredient::Ingredient as DbIngredient;
use crate::models::recipe::{
    NewRecipe as DbNewRecipe, NewRecipeIngredient as DbNewRecipeIngredient,
    NewRecipeTag as DbNewRecipeTag, Recipe as DbRecipe, RecipeIngredient as DbRecipeIngredient,
    RecipeTag as DbRecipeTag, UpdateRecipe as DbUpdateRecipe,
};
use crate::models::tag::Tag as DbTag;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::user::load_user_profiles;
use crate::repository::{DieselRepository, RecipeReader, RecipeWriter};

impl RecipeReader for DieselRepository {
    fn get_recipe_by_id(
        &self,
        id: i32,
        viewer: Option<i32>,
    ) -> RepositoryResult<Option<DomainRecipe>> {
        use crate::schema::recipes;

        let mut conn = self.conn()?;
        let recipe = recipes::table
            .filter(recipes::id.eq(id))
            .first::<DbRecipe>(&mut conn)
            .optional()?;

        let Some(recipe) = recipe else {
            return Ok(None);
        };

        let mut projected = load_recipe_details(&mut conn, vec![recipe], viewer)?;
        Ok(projected.pop())
    }

    fn list_recipes(&self, query: RecipeListQuery) -> RepositoryResult<(usize, Vec<DomainRecipe>)> {
        use crate::schema::{favorites, recipe_tags, recipes, shopping_carts, tags};

        let mut conn = self.conn()?;

        let mut count_query = recipes::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(author) = query.author {
            count_query = count_query.filter(recipes::author_id.eq(author));
        }

        if !query.tag_slugs.is_empty() {
            let tagged = recipe_tags::table
                .inner_join(tags::table)
                .filter(tags::slug.eq_any(&query.tag_slugs))
                .select(recipe_tags::recipe_id);
            count_query = count_query.filter(recipes::id.eq_any(tagged));
        }

        if let Some(viewer) = query.viewer {
            if query.favorited_only {
                let favorited = favorites::table
                    .filter(favorites::user_id.eq(viewer))
                    .select(favorites::recipe_id);
                count_query = count_query.filter(recipes::id.eq_any(favorited));
            }

            if query.in_cart_only {
                let in_cart = shopping_carts::table
                    .filter(shopping_carts::user_id.eq(viewer))
                    .select(shopping_carts::recipe_id);
                count_query = count_query.filter(recipes::id.eq_any(in_cart));
            }
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = recipes::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(author) = query.author {
            items = items.filter(recipes::author_id.eq(author));
        }

        if !query.tag_slugs.is_empty() {
            let tagged = recipe_tags::table
                .inner_join(tags::table)
                .filter(tags::slug.eq_any(&query.tag_slugs))
                .select(recipe_tags::recipe_id);
            items = items.filter(recipes::id.eq_any(tagged));
        }

        if let Some(viewer) = query.viewer {
            if query.favorited_only {
                let favorited = favorites::table
                    .filter(favorites::user_id.eq(viewer))
                    .select(favorites::recipe_id);
                items = items.filter(recipes::id.eq_any(favorited));
            }

            if query.in_cart_only {
                let in_cart = shopping_carts::table
                    .filter(shopping_carts::user_id.eq(viewer))
                    .select(shopping_carts::recipe_id);
                items = items.filter(recipes::id.eq_any(in_cart));
            }
        }

        items = items.order((recipes::created_at.desc(), recipes::id.desc()));

        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let db_recipes = items.load::<DbRecipe>(&mut conn)?;
        let recipes = load_recipe_details(&mut conn, db_recipes, query.viewer)?;

        Ok((total, recipes))
    }
}

impl RecipeWriter for DieselRepository {
    fn create_recipe(&self, new_recipe: &DomainNewRecipe) -> RepositoryResult<DomainRecipe> {
        use crate::schema::{recipe_ingredients, recipe_tags, recipes};

        let mut conn = self.conn()?;

        conn.transaction::<DomainRecipe, RepositoryError, _>(|conn| {
            let db_new = DbNewRecipe::from(new_recipe);

            let created = diesel::insert_into(recipes::table)
                .values(&db_new)
                .get_result::<DbRecipe>(conn)?;

            let recipe_id = created.id;

            if !new_recipe.tags.is_empty() {
                let payload: Vec<DbNewRecipeTag> = new_recipe
                    .tags
                    .iter()
                    .map(|tag_id| DbNewRecipeTag {
                        recipe_id,
                        tag_id: *tag_id,
                    })
                    .collect();

                diesel::insert_into(recipe_tags::table)
                    .values(&payload)
                    .execute(conn)?;
            }

            if !new_recipe.ingredients.is_empty() {
                let payload: Vec<DbNewRecipeIngredient> = new_recipe
                    .ingredients
                    .iter()
                    .map(|line| DbNewRecipeIngredient {
                        recipe_id,
                        ingredient_id: line.ingredient_id,
                        amount: line.amount,
                    })
                    .collect();

                diesel::insert_into(recipe_ingredients::table)
                    .values(&payload)
                    .execute(conn)?;
            }

            let mut projected =
                load_recipe_details(conn, vec![created], Some(new_recipe.author_id))?;
            projected.pop().ok_or(RepositoryError::NotFound)
        })
    }

    fn update_recipe(
        &self,
        recipe_id: i32,
        author_id: i32,
        updates: &DomainUpdateRecipe,
    ) -> RepositoryResult<DomainRecipe> {
        use crate::schema::{recipe_ingredients, recipe_tags, recipes};

        let mut conn = self.conn()?;

        conn.transaction::<DomainRecipe, RepositoryError, _>(|conn| {
            let db_updates = DbUpdateRecipe::from(updates);

            let target = recipes::table
                .filter(recipes::id.eq(recipe_id))
                .filter(recipes::author_id.eq(author_id));

            let updated = diesel::update(target)
                .set(&db_updates)
                .get_result::<DbRecipe>(conn)?;

            diesel::delete(recipe_tags::table.filter(recipe_tags::recipe_id.eq(recipe_id)))
                .execute(conn)?;

            if !updates.tags.is_empty() {
                let payload: Vec<DbNewRecipeTag> = updates
                    .tags
                    .iter()
                    .map(|tag_id| DbNewRecipeTag {
                        recipe_id,
                        tag_id: *tag_id,
                    })
                    .collect();

                diesel::insert_into(recipe_tags::table)
                    .values(&payload)
                    .execute(conn)?;
            }

            // Reconcile ingredient lines instead of recreating them all:
            // a line that kept its ingredient and amount keeps its row.
            let existing = recipe_ingredients::table
                .filter(recipe_ingredients::recipe_id.eq(recipe_id))
                .load::<DbRecipeIngredient>(conn)?;

            let submitted: HashSet<(i32, i32)> = updates
                .ingredients
                .iter()
                .map(|line| (line.ingredient_id, line.amount))
                .collect();
            let kept: HashSet<(i32, i32)> = existing
                .iter()
                .filter(|row| submitted.contains(&(row.ingredient_id, row.amount)))
                .map(|row| (row.ingredient_id, row.amount))
                .collect();

            let removed_ids: Vec<i32> = existing
                .iter()
                .filter(|row| !kept.contains(&(row.ingredient_id, row.amount)))
                .map(|row| row.id)
                .collect();

            if !removed_ids.is_empty() {
                diesel::delete(
                    recipe_ingredients::table.filter(recipe_ingredients::id.eq_any(&removed_ids)),
                )
                .execute(conn)?;
            }

            let payload: Vec<DbNewRecipeIngredient> = updates
                .ingredients
                .iter()
                .filter(|line| !kept.contains(&(line.ingredient_id, line.amount)))
                .map(|line| DbNewRecipeIngredient {
                    recipe_id,
                    ingredient_id: line.ingredient_id,
                    amount: line.amount,
                })
                .collect();

            if !payload.is_empty() {
                diesel::insert_into(recipe_ingredients::table)
                    .values(&payload)
                    .execute(conn)?;
            }

            let mut projected = load_recipe_details(conn, vec![updated], Some(author_id))?;
            projected.pop().ok_or(RepositoryError::NotFound)
        })
    }

    fn delete_recipe(&self, recipe_id: i32, author_id: i32) -> RepositoryResult<()> {
        use crate::schema::recipes;

        let mut conn = self.conn()?;

        let target = recipes::table
            .filter(recipes::id.eq(recipe_id))
            .filter(recipes::author_id.eq(author_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

/// Project recipe rows into domain aggregates: authors, tags, ingredient
/// lines and the viewer's favorite/cart marks, all loaded in batches.
fn load_recipe_details(
    conn: &mut SqliteConnection,
    db_recipes: Vec<DbRecipe>,
    viewer: Option<i32>,
) -> RepositoryResult<Vec<DomainRecipe>> {
    use crate::schema::{favorites, ingredients, recipe_ingredients, recipe_tags, shopping_carts, tags};

    if db_recipes.is_empty() {
        return Ok(Vec::new());
    }

    let recipe_ids: Vec<i32> = db_recipes.iter().map(|recipe| recipe.id).collect();

    let author_ids: Vec<i32> = {
        let mut seen = HashSet::new();
        db_recipes
            .iter()
            .map(|recipe| recipe.author_id)
            .filter(|author_id| seen.insert(*author_id))
            .collect()
    };
    let authors = load_user_profiles(conn, &author_ids, viewer)?;

    let tag_rows = recipe_tags::table
        .inner_join(tags::table)
        .filter(recipe_tags::recipe_id.eq_any(&recipe_ids))
        .order(recipe_tags::id.asc())
        .select((DbRecipeTag::as_select(), DbTag::as_select()))
        .load::<(DbRecipeTag, DbTag)>(conn)?;

    let mut tags_by_recipe: HashMap<i32, Vec<DomainTag>> = HashMap::new();
    for (link, tag) in tag_rows {
        tags_by_recipe
            .entry(link.recipe_id)
            .or_default()
            .push(tag.into());
    }

    let ingredient_rows = recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq_any(&recipe_ids))
        .order(recipe_ingredients::id.asc())
        .select((DbRecipeIngredient::as_select(), DbIngredient::as_select()))
        .load::<(DbRecipeIngredient, DbIngredient)>(conn)?;

    let mut ingredients_by_recipe: HashMap<i32, Vec<RecipeIngredientItem>> = HashMap::new();
    for (line, ingredient) in ingredient_rows {
        ingredients_by_recipe
            .entry(line.recipe_id)
            .or_default()
            .push(RecipeIngredientItem {
                id: ingredient.id,
                name: ingredient.name,
                measurement_unit: ingredient.measurement_unit,
                amount: line.amount,
            });
    }

    let favorited: HashSet<i32> = match viewer {
        Some(viewer_id) => favorites::table
            .filter(favorites::user_id.eq(viewer_id))
            .filter(favorites::recipe_id.eq_any(&recipe_ids))
            .select(favorites::recipe_id)
            .load::<i32>(conn)?
            .into_iter()
            .collect(),
        None => HashSet::new(),
    };

    let in_cart: HashSet<i32> = match viewer {
        Some(viewer_id) => shopping_carts::table
            .filter(shopping_carts::user_id.eq(viewer_id))
            .filter(shopping_carts::recipe_id.eq_any(&recipe_ids))
            .select(shopping_carts::recipe_id)
            .load::<i32>(conn)?
            .into_iter()
            .collect(),
        None => HashSet::new(),
    };

    let mut projected = Vec::with_capacity(db_recipes.len());
    for recipe in db_recipes {
        let author = authors
            .get(&recipe.author_id)
            .cloned()
            .ok_or(RepositoryError::NotFound)?;

        projected.push(DomainRecipe {
            id: recipe.id,
            tags: tags_by_recipe.remove(&recipe.id).unwrap_or_default(),
            author,
            ingredients: ingredients_by_recipe
                .remove(&recipe.id)
                .unwrap_or_default(),
            is_favorited: favorited.contains(&recipe.id),
            is_in_shopping_cart: in_cart.contains(&recipe.id),
            name: recipe.name,
            image: recipe.image,
            text: recipe.text,
            cooking_time: recipe.cooking_time,
            created_at: recipe.created_at,
        });
    }

    Ok(projected)
}
