use diesel::prelude::*;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::subscriptions)]
pub struct Subscription {
    pub id: i32,
    pub user_id: i32,
    pub author_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::subscriptions)]
pub struct NewSubscription {
    pub user_id: i32,
    pub author_id: i32,
}
