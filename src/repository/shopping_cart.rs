use diesel::dsl::sum;
use diesel::prelude::*;

use crate::domain::shopping_list::ShoppingListItem;
use crate::models::shopping_cart::NewShoppingCart;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ShoppingCartReader, ShoppingCartWriter};

impl ShoppingCartReader for DieselRepository {
    fn shopping_list(&self, user_id: i32) -> RepositoryResult<Vec<ShoppingListItem>> {
        use crate::schema::{ingredients, recipe_ingredients, shopping_carts};

        let mut conn = self.conn()?;

        let cart_recipes = shopping_carts::table
            .filter(shopping_carts::user_id.eq(user_id))
            .select(shopping_carts::recipe_id);

        let rows = recipe_ingredients::table
            .inner_join(ingredients::table)
            .filter(recipe_ingredients::recipe_id.eq_any(cart_recipes))
            .group_by((ingredients::name, ingredients::measurement_unit))
            .select((
                ingredients::name,
                ingredients::measurement_unit,
                sum(recipe_ingredients::amount),
            ))
            .order(sum(recipe_ingredients::amount).desc())
            .load::<(String, String, Option<i64>)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(name, measurement_unit, total)| ShoppingListItem {
                name,
                measurement_unit,
                total: total.unwrap_or_default(),
            })
            .collect())
    }
}

impl ShoppingCartWriter for DieselRepository {
    fn add_to_cart(&self, user_id: i32, recipe_id: i32) -> RepositoryResult<()> {
        use crate::schema::shopping_carts;

        let mut conn = self.conn()?;
        let insertable = NewShoppingCart { user_id, recipe_id };

        diesel::insert_into(shopping_carts::table)
            .values(&insertable)
            .execute(&mut conn)?;

        Ok(())
    }

    fn remove_from_cart(&self, user_id: i32, recipe_id: i32) -> RepositoryResult<()> {
        use crate::schema::shopping_carts;

        let mut conn = self.conn()?;

        let target = shopping_carts::table
            .filter(shopping_carts::user_id.eq(user_id))
            .filter(shopping_carts::recipe_id.eq(recipe_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
