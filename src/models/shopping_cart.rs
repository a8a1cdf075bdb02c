use diesel::prelude::*;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::shopping_carts)]
pub struct ShoppingCart {
    pub id: i32,
    pub user_id: i32,
    pub recipe_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::shopping_carts)]
pub struct NewShoppingCart {
    pub user_id: i32,
    pub recipe_id: i32,
}
