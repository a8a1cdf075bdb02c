use actix_web::{HttpResponse, Responder, delete, get, post, web};

use crate::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::shopping_cart::{self, SHOPPING_CART_FILENAME};

#[get("/recipes/download_shopping_cart")]
/// Aggregate the caller's cart and stream it back as a PDF attachment.
pub async fn download_shopping_cart(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match shopping_cart::download_shopping_list(repo.get_ref(), &user) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{SHOPPING_CART_FILENAME}\""),
            ))
            .body(bytes),
        Err(err) => error_response(err),
    }
}

#[post("/recipes/{id}/shopping_cart")]
/// Put the recipe into the cart and return its short projection.
pub async fn add_to_cart(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let recipe_id = path.into_inner();

    match shopping_cart::add_to_cart(repo.get_ref(), &user, recipe_id) {
        Ok(summary) => HttpResponse::Created().json(summary),
        Err(err) => error_response(err),
    }
}

#[delete("/recipes/{id}/shopping_cart")]
pub async fn remove_from_cart(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let recipe_id = path.into_inner();

    match shopping_cart::remove_from_cart(repo.get_ref(), &user, recipe_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}
