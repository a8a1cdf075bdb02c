use diesel::prelude::*;

use crate::domain::ingredient::{
    Ingredient as DomainIngredient, IngredientListQuery, NewIngredient as DomainNewIngredient,
};
use crate::models::ingredient::{Ingredient as DbIngredient, NewIngredient as DbNewIngredient};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, IngredientReader, IngredientWriter};

impl IngredientReader for DieselRepository {
    fn get_ingredient_by_id(&self, id: i32) -> RepositoryResult<Option<DomainIngredient>> {
        use crate::schema::ingredients;

        let mut conn = self.conn()?;
        let ingredient = ingredients::table
            .filter(ingredients::id.eq(id))
            .first::<DbIngredient>(&mut conn)
            .optional()?;

        Ok(ingredient.map(DomainIngredient::from))
    }

    fn get_ingredients_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<DomainIngredient>> {
        use crate::schema::ingredients;

        let mut conn = self.conn()?;
        let db_ingredients = ingredients::table
            .filter(ingredients::id.eq_any(ids))
            .order(ingredients::id.asc())
            .load::<DbIngredient>(&mut conn)?;

        Ok(db_ingredients
            .into_iter()
            .map(DomainIngredient::from)
            .collect())
    }

    fn list_ingredients(&self, query: IngredientListQuery) -> RepositoryResult<Vec<DomainIngredient>> {
        use crate::schema::ingredients;

        let mut conn = self.conn()?;

        let mut items = ingredients::table
            .order(ingredients::id.asc())
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(prefix) = query.name.as_ref() {
            // sqlite LIKE is case-insensitive for ASCII.
            let pattern = format!("{}%", prefix);
            items = items.filter(ingredients::name.like(pattern));
        }

        let db_ingredients = items.load::<DbIngredient>(&mut conn)?;

        Ok(db_ingredients
            .into_iter()
            .map(DomainIngredient::from)
            .collect())
    }
}

impl IngredientWriter for DieselRepository {
    fn create_ingredients(
        &self,
        new_ingredients: &[DomainNewIngredient],
    ) -> RepositoryResult<usize> {
        use crate::schema::ingredients;

        let mut conn = self.conn()?;
        let insertable: Vec<DbNewIngredient> =
            new_ingredients.iter().map(DbNewIngredient::from).collect();

        let inserted = diesel::insert_into(ingredients::table)
            .values(&insertable)
            .execute(&mut conn)?;

        Ok(inserted)
    }
}
