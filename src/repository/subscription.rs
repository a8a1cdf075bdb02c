use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::recipe::RecipeSummary;
use crate::domain::subscription::{SubscribedAuthor, SubscriptionListQuery};
use crate::models::recipe::Recipe as DbRecipe;
use crate::models::subscription::NewSubscription;
use crate::models::user::User as DbUser;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, SubscriptionReader, SubscriptionWriter};

impl SubscriptionReader for DieselRepository {
    fn get_subscribed_author(
        &self,
        viewer: i32,
        author_id: i32,
        recipes_limit: Option<usize>,
    ) -> RepositoryResult<Option<SubscribedAuthor>> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let author = users::table
            .filter(users::id.eq(author_id))
            .first::<DbUser>(&mut conn)
            .optional()?;

        let Some(author) = author else {
            return Ok(None);
        };

        let mut feeds = load_author_feeds(&mut conn, &[author], viewer, recipes_limit)?;
        Ok(feeds.remove(&author_id))
    }

    fn list_subscriptions(
        &self,
        query: SubscriptionListQuery,
    ) -> RepositoryResult<(usize, Vec<SubscribedAuthor>)> {
        use crate::schema::{subscriptions, users};

        let mut conn = self.conn()?;

        let total = subscriptions::table
            .filter(subscriptions::user_id.eq(query.user_id))
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = subscriptions::table
            .inner_join(users::table.on(users::id.eq(subscriptions::author_id)))
            .filter(subscriptions::user_id.eq(query.user_id))
            .order(subscriptions::id.desc())
            .select(DbUser::as_select())
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let authors = items.load::<DbUser>(&mut conn)?;
        let author_ids: Vec<i32> = authors.iter().map(|author| author.id).collect();

        let mut feeds = load_author_feeds(&mut conn, &authors, query.user_id, query.recipes_limit)?;
        let ordered = author_ids
            .iter()
            .filter_map(|id| feeds.remove(id))
            .collect();

        Ok((total, ordered))
    }
}

impl SubscriptionWriter for DieselRepository {
    fn subscribe(&self, user_id: i32, author_id: i32) -> RepositoryResult<()> {
        use crate::schema::subscriptions;

        let mut conn = self.conn()?;
        let insertable = NewSubscription { user_id, author_id };

        diesel::insert_into(subscriptions::table)
            .values(&insertable)
            .execute(&mut conn)?;

        Ok(())
    }

    fn unsubscribe(&self, user_id: i32, author_id: i32) -> RepositoryResult<()> {
        use crate::schema::subscriptions;

        let mut conn = self.conn()?;

        let target = subscriptions::table
            .filter(subscriptions::user_id.eq(user_id))
            .filter(subscriptions::author_id.eq(author_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

/// Build `SubscribedAuthor` projections for `authors`: each one carries its
/// recipe feed (newest first, optionally capped) and the total recipe count.
fn load_author_feeds(
    conn: &mut SqliteConnection,
    authors: &[DbUser],
    viewer: i32,
    recipes_limit: Option<usize>,
) -> RepositoryResult<HashMap<i32, SubscribedAuthor>> {
    use crate::schema::recipes;

    if authors.is_empty() {
        return Ok(HashMap::new());
    }

    let author_ids: Vec<i32> = authors.iter().map(|author| author.id).collect();
    let profiles = crate::repository::user::load_user_profiles(conn, &author_ids, Some(viewer))?;

    let db_recipes = recipes::table
        .filter(recipes::author_id.eq_any(&author_ids))
        .order((recipes::created_at.desc(), recipes::id.desc()))
        .load::<DbRecipe>(conn)?;

    let mut recipes_by_author: HashMap<i32, Vec<RecipeSummary>> = HashMap::new();
    for recipe in db_recipes {
        recipes_by_author
            .entry(recipe.author_id)
            .or_default()
            .push(RecipeSummary {
                id: recipe.id,
                name: recipe.name,
                image: recipe.image,
                cooking_time: recipe.cooking_time,
            });
    }

    let mut feeds = HashMap::with_capacity(authors.len());
    for (author_id, profile) in profiles {
        let mut recipes = recipes_by_author.remove(&author_id).unwrap_or_default();
        let recipes_count = recipes.len();
        if let Some(limit) = recipes_limit {
            recipes.truncate(limit);
        }

        feeds.insert(
            author_id,
            SubscribedAuthor {
                author: profile,
                recipes,
                recipes_count,
            },
        );
    }

    Ok(feeds)
}
