use std::collections::{HashMap, HashSet};

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::user::{
    NewUser as DomainNewUser, User as DomainUser, UserListQuery, UserProfile,
};
use crate::models::user::{NewUser as DbNewUser, User as DbUser};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, UserReader, UserWriter};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<DomainUser>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::id.eq(id))
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(DomainUser::from))
    }

    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<DomainUser>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::email.eq(email))
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(DomainUser::from))
    }

    fn get_user_profile(
        &self,
        id: i32,
        viewer: Option<i32>,
    ) -> RepositoryResult<Option<UserProfile>> {
        let mut conn = self.conn()?;
        let mut profiles = load_user_profiles(&mut conn, &[id], viewer)?;

        Ok(profiles.remove(&id))
    }

    fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<UserProfile>)> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let total = users::table.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = users::table
            .order(users::id.asc())
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let db_users = items.load::<DbUser>(&mut conn)?;
        let user_ids: Vec<i32> = db_users.iter().map(|user| user.id).collect();
        let mut profiles = load_user_profiles(&mut conn, &user_ids, query.viewer)?;

        let ordered = user_ids
            .iter()
            .filter_map(|id| profiles.remove(id))
            .collect();

        Ok((total, ordered))
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &DomainNewUser) -> RepositoryResult<DomainUser> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let insertable = DbNewUser::from(new_user);

        let created = diesel::insert_into(users::table)
            .values(&insertable)
            .get_result::<DbUser>(&mut conn)?;

        Ok(created.into())
    }
}

/// Load profiles for `user_ids`, with `is_subscribed` computed against
/// `viewer` in a single query.
pub(crate) fn load_user_profiles(
    conn: &mut SqliteConnection,
    user_ids: &[i32],
    viewer: Option<i32>,
) -> RepositoryResult<HashMap<i32, UserProfile>> {
    use crate::schema::{subscriptions, users};

    if user_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let db_users = users::table
        .filter(users::id.eq_any(user_ids))
        .load::<DbUser>(conn)?;

    let subscribed: HashSet<i32> = match viewer {
        Some(viewer_id) => subscriptions::table
            .filter(subscriptions::user_id.eq(viewer_id))
            .filter(subscriptions::author_id.eq_any(user_ids))
            .select(subscriptions::author_id)
            .load::<i32>(conn)?
            .into_iter()
            .collect(),
        None => HashSet::new(),
    };

    Ok(db_users
        .into_iter()
        .map(|user| {
            let is_subscribed = subscribed.contains(&user.id);
            (
                user.id,
                UserProfile {
                    email: user.email,
                    id: user.id,
                    username: user.username,
                    first_name: user.first_name,
                    last_name: user.last_name,
                    is_subscribed,
                },
            )
        })
        .collect())
}
