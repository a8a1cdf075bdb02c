use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::recipe::{NewRecipe as DomainNewRecipe, UpdateRecipe as DomainUpdateRecipe};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct Recipe {
    pub id: i32,
    pub author_id: i32,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub author_id: i32,
    pub name: &'a str,
    pub image: &'a str,
    pub text: &'a str,
    pub cooking_time: i32,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::recipes)]
pub struct UpdateRecipe<'a> {
    pub name: &'a str,
    pub image: &'a str,
    pub text: &'a str,
    pub cooking_time: i32,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::recipe_tags)]
#[diesel(belongs_to(Recipe, foreign_key = recipe_id))]
pub struct RecipeTag {
    pub id: i32,
    pub recipe_id: i32,
    pub tag_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipe_tags)]
pub struct NewRecipeTag {
    pub recipe_id: i32,
    pub tag_id: i32,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::recipe_ingredients)]
#[diesel(belongs_to(Recipe, foreign_key = recipe_id))]
pub struct RecipeIngredient {
    pub id: i32,
    pub recipe_id: i32,
    pub ingredient_id: i32,
    pub amount: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipe_ingredients)]
pub struct NewRecipeIngredient {
    pub recipe_id: i32,
    pub ingredient_id: i32,
    pub amount: i32,
}

impl<'a> From<&'a DomainNewRecipe> for NewRecipe<'a> {
    fn from(value: &'a DomainNewRecipe) -> Self {
        Self {
            author_id: value.author_id,
            name: value.name.as_str(),
            image: value.image.as_str(),
            text: value.text.as_str(),
            cooking_time: value.cooking_time,
            created_at: value.created_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateRecipe> for UpdateRecipe<'a> {
    fn from(value: &'a DomainUpdateRecipe) -> Self {
        Self {
            name: value.name.as_str(),
            image: value.image.as_str(),
            text: value.text.as_str(),
            cooking_time: value.cooking_time,
        }
    }
}
