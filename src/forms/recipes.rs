use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::recipe::{IngredientAmount, NewRecipe, UpdateRecipe};

/// Maximum allowed length for a recipe name.
const NAME_MAX_LEN: usize = 200;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Maximum allowed length for the recipe description.
const TEXT_MAX_LEN: usize = 1500;
const TEXT_MAX_LEN_VALIDATOR: u64 = TEXT_MAX_LEN as u64;

/// Cooking time bounds in minutes.
const COOKING_TIME_MIN: i32 = 1;
const COOKING_TIME_MAX: i32 = 240;

/// Per-line ingredient amount bounds.
const AMOUNT_MIN: i32 = 1;
const AMOUNT_MAX: i32 = 2500;

/// Result type returned by the recipe form helpers.
pub type RecipeFormResult<T> = Result<T, RecipeFormError>;

/// Errors that can occur while processing recipe submissions.
#[derive(Debug, Error)]
pub enum RecipeFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("recipe name cannot be empty")]
    EmptyName,
    /// The provided description is empty after sanitization.
    #[error("recipe text cannot be empty")]
    EmptyText,
    /// The same tag id was submitted more than once.
    #[error("Теги не должны повторяться.")]
    DuplicateTags,
    /// The same ingredient id was submitted more than once.
    #[error("Ингредиенты не должны повторяться.")]
    DuplicateIngredients,
}

/// One submitted ingredient line: catalog id plus amount.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecipeIngredientForm {
    /// Referenced catalog ingredient id.
    pub id: i32,
    /// Quantity in the ingredient's measurement unit.
    #[validate(range(min = AMOUNT_MIN, max = AMOUNT_MAX))]
    pub amount: i32,
}

/// JSON payload accepted when creating or editing a recipe.
#[derive(Debug, Deserialize, Validate)]
pub struct RecipeForm {
    /// Referenced tag ids.
    pub tags: Vec<i32>,
    /// Ingredient lines.
    #[validate(nested)]
    pub ingredients: Vec<RecipeIngredientForm>,
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Opaque encoded image; stored verbatim.
    #[validate(length(min = 1))]
    pub image: String,
    #[validate(length(min = 1, max = TEXT_MAX_LEN_VALIDATOR))]
    pub text: String,
    /// Cooking time in minutes.
    #[validate(range(min = COOKING_TIME_MIN, max = COOKING_TIME_MAX))]
    pub cooking_time: i32,
}

impl RecipeForm {
    /// Validates and sanitizes the payload into a domain `NewRecipe`.
    pub fn into_new_recipe(self, author_id: i32) -> RecipeFormResult<NewRecipe> {
        let (name, image, text, cooking_time, tags, ingredients) = self.into_parts()?;

        Ok(NewRecipe::new(
            author_id,
            name,
            image,
            text,
            cooking_time,
            tags,
            ingredients,
        ))
    }

    /// Validates and sanitizes the payload into a domain `UpdateRecipe`.
    pub fn into_update_recipe(self) -> RecipeFormResult<UpdateRecipe> {
        let (name, image, text, cooking_time, tags, ingredients) = self.into_parts()?;

        Ok(UpdateRecipe {
            name,
            image,
            text,
            cooking_time,
            tags,
            ingredients,
        })
    }

    #[allow(clippy::type_complexity)]
    fn into_parts(
        self,
    ) -> RecipeFormResult<(String, String, String, i32, Vec<i32>, Vec<IngredientAmount>)> {
        self.validate()?;
        check_for_duplicates(&self.tags, RecipeFormError::DuplicateTags)?;
        check_for_duplicates(
            &self.ingredients.iter().map(|line| line.id).collect::<Vec<_>>(),
            RecipeFormError::DuplicateIngredients,
        )?;

        let sanitized_name = sanitize_inline_text(&self.name);
        if sanitized_name.is_empty() {
            return Err(RecipeFormError::EmptyName);
        }

        let sanitized_text = sanitize_multiline_text(&self.text);
        if sanitized_text.is_empty() {
            return Err(RecipeFormError::EmptyText);
        }

        let ingredients = self
            .ingredients
            .iter()
            .map(|line| IngredientAmount {
                ingredient_id: line.id,
                amount: line.amount,
            })
            .collect();

        Ok((
            sanitized_name,
            self.image,
            sanitized_text,
            self.cooking_time,
            self.tags,
            ingredients,
        ))
    }
}

/// Reject the submission on the first repeated id.
fn check_for_duplicates(ids: &[i32], error: RecipeFormError) -> RecipeFormResult<()> {
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(*id) {
            return Err(error);
        }
    }

    Ok(())
}

fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

fn sanitize_multiline_text(input: &str) -> String {
    let mut lines: Vec<String> = input.lines().map(sanitize_inline_text).collect();

    while matches!(lines.first(), Some(line) if line.is_empty()) {
        lines.remove(0);
    }

    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }

    let mut result = Vec::with_capacity(lines.len());
    let mut previous_empty = false;
    for line in lines {
        let is_empty = line.is_empty();
        if is_empty {
            if previous_empty {
                continue;
            }
            previous_empty = true;
            result.push(String::new());
        } else {
            previous_empty = false;
            result.push(line);
        }
    }

    result.join("\n")
}
