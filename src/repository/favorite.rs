use diesel::prelude::*;

use crate::models::favorite::NewFavorite;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, FavoriteWriter};

impl FavoriteWriter for DieselRepository {
    fn add_favorite(&self, user_id: i32, recipe_id: i32) -> RepositoryResult<()> {
        use crate::schema::favorites;

        let mut conn = self.conn()?;
        let insertable = NewFavorite { user_id, recipe_id };

        diesel::insert_into(favorites::table)
            .values(&insertable)
            .execute(&mut conn)?;

        Ok(())
    }

    fn remove_favorite(&self, user_id: i32, recipe_id: i32) -> RepositoryResult<()> {
        use crate::schema::favorites;

        let mut conn = self.conn()?;

        let target = favorites::table
            .filter(favorites::user_id.eq(user_id))
            .filter(favorites::recipe_id.eq(recipe_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
