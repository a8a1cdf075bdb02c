use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::auth::AuthenticatedUser;
use crate::domain::recipe::RecipeSummary;
use crate::domain::shopping_list::ShoppingListItem;
use crate::repository::errors::RepositoryError;
use crate::repository::{RecipeReader, ShoppingCartReader, ShoppingCartWriter, UserReader};
use crate::services::{ServiceError, ServiceResult};

/// Downloaded file name advertised to the client.
pub const SHOPPING_CART_FILENAME: &str = "shopping_cart.pdf";

/// A4 page geometry and type sizes for the rendered list.
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 25.0;
const HEADER_SIZE: f32 = 18.0;
const LINE_SIZE: f32 = 13.0;
const LINE_STEP_MM: f32 = 10.0;

/// Put a recipe into the cart of `user`. The recipe must exist; adding it
/// twice is a validation error.
pub fn add_to_cart<R>(
    repo: &R,
    user: &AuthenticatedUser,
    recipe_id: i32,
) -> ServiceResult<RecipeSummary>
where
    R: RecipeReader + ShoppingCartWriter + ?Sized,
{
    let recipe = repo
        .get_recipe_by_id(recipe_id, Some(user.id))
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    match repo.add_to_cart(user.id, recipe_id) {
        Ok(()) => Ok(RecipeSummary::from(&recipe)),
        Err(RepositoryError::UniqueViolation) => Err(ServiceError::Form(
            "Рецепт уже в списке покупок.".to_string(),
        )),
        Err(err) => Err(ServiceError::from(err)),
    }
}

/// Take a recipe out of the cart. Removing a recipe that was never added
/// is a validation error, not a missing resource.
pub fn remove_from_cart<R>(repo: &R, user: &AuthenticatedUser, recipe_id: i32) -> ServiceResult<()>
where
    R: ShoppingCartWriter + ?Sized,
{
    match repo.remove_from_cart(user.id, recipe_id) {
        Ok(()) => Ok(()),
        Err(RepositoryError::NotFound) => Err(ServiceError::Form(
            "Рецепта нет в списке покупок.".to_string(),
        )),
        Err(err) => Err(ServiceError::from(err)),
    }
}

/// Aggregate the caller's cart and render it as a downloadable PDF.
pub fn download_shopping_list<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<u8>>
where
    R: UserReader + ShoppingCartReader + ?Sized,
{
    let account = repo
        .get_user_by_id(user.id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::Unauthorized)?;

    let items = repo.shopping_list(user.id).map_err(ServiceError::from)?;

    render_shopping_list_pdf(&account.first_name, &items)
}

/// Format the aggregated groups as numbered list lines.
pub fn shopping_list_lines(items: &[ShoppingListItem]) -> Vec<String> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            format!(
                "{}) {} - {} {};",
                index + 1,
                item.name,
                item.total,
                item.measurement_unit
            )
        })
        .collect()
}

/// Personalized header placed above the list.
pub fn shopping_list_header(first_name: &str) -> String {
    format!("{first_name}, remember to buy:")
}

fn render_shopping_list_pdf(
    first_name: &str,
    items: &[ShoppingListItem],
) -> ServiceResult<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        "Shopping list",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );

    let header_font = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|err| ServiceError::Document(err.to_string()))?;
    let line_font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|err| ServiceError::Document(err.to_string()))?;

    let current_layer = doc.get_page(page).get_layer(layer);

    let mut cursor = PAGE_HEIGHT_MM - MARGIN_MM;
    current_layer.use_text(
        shopping_list_header(first_name),
        HEADER_SIZE,
        Mm(MARGIN_MM),
        Mm(cursor),
        &header_font,
    );

    cursor -= 2.0 * LINE_STEP_MM;
    for line in shopping_list_lines(items) {
        current_layer.use_text(line, LINE_SIZE, Mm(MARGIN_MM), Mm(cursor), &line_font);
        cursor -= LINE_STEP_MM;
    }

    doc.save_to_bytes()
        .map_err(|err| ServiceError::Document(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::user::User;
    use crate::repository::errors::RepositoryResult;
    use crate::repository::mock::{MockShoppingCartReader, MockUserReader};
    use crate::repository::{ShoppingCartReader, UserReader};

    fn item(name: &str, unit: &str, total: i64) -> ShoppingListItem {
        ShoppingListItem {
            name: name.to_string(),
            measurement_unit: unit.to_string(),
            total,
        }
    }

    #[test]
    fn lines_are_numbered_and_formatted() {
        let items = vec![item("sugar", "g", 300), item("milk", "ml", 50)];

        let lines = shopping_list_lines(&items);

        assert_eq!(lines, vec!["1) sugar - 300 g;", "2) milk - 50 ml;"]);
    }

    #[test]
    fn header_is_personalized() {
        assert_eq!(shopping_list_header("Anna"), "Anna, remember to buy:");
    }

    #[test]
    fn empty_cart_produces_no_lines() {
        assert!(shopping_list_lines(&[]).is_empty());
    }

    #[test]
    fn download_renders_a_pdf_document() {
        let repo = FakeRepo::with_items(vec![item("sugar", "g", 300)]);
        let user = AuthenticatedUser { id: 1 };

        let bytes = download_shopping_list(&repo, &user).expect("expected success");

        assert!(bytes.starts_with(b"%PDF"));
    }

    struct FakeRepo {
        user_reader: MockUserReader,
        cart_reader: MockShoppingCartReader,
    }

    impl FakeRepo {
        fn with_items(items: Vec<ShoppingListItem>) -> Self {
            let mut user_reader = MockUserReader::new();
            user_reader.expect_get_user_by_id().returning(|id| {
                Ok(Some(User {
                    id,
                    email: "anna@example.com".to_string(),
                    username: "anna".to_string(),
                    first_name: "Anna".to_string(),
                    last_name: "Smith".to_string(),
                    password_hash: "hash".to_string(),
                    is_staff: false,
                }))
            });

            let mut cart_reader = MockShoppingCartReader::new();
            cart_reader
                .expect_shopping_list()
                .returning(move |_| Ok(items.clone()));

            Self {
                user_reader,
                cart_reader,
            }
        }
    }

    impl UserReader for FakeRepo {
        fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>> {
            self.user_reader.get_user_by_id(id)
        }

        fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
            self.user_reader.get_user_by_email(email)
        }

        fn get_user_profile(
            &self,
            id: i32,
            viewer: Option<i32>,
        ) -> RepositoryResult<Option<crate::domain::user::UserProfile>> {
            self.user_reader.get_user_profile(id, viewer)
        }

        fn list_users(
            &self,
            query: crate::domain::user::UserListQuery,
        ) -> RepositoryResult<(usize, Vec<crate::domain::user::UserProfile>)> {
            self.user_reader.list_users(query)
        }
    }

    impl ShoppingCartReader for FakeRepo {
        fn shopping_list(&self, user_id: i32) -> RepositoryResult<Vec<ShoppingListItem>> {
            self.cart_reader.shopping_list(user_id)
        }
    }
}
