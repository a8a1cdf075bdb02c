use actix_web::{HttpResponse, Responder, delete, post, web};

use crate::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::favorites;

#[post("/recipes/{id}/favorite")]
/// Mark the recipe as a favorite and return its short projection.
pub async fn add_favorite(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let recipe_id = path.into_inner();

    match favorites::add_favorite(repo.get_ref(), &user, recipe_id) {
        Ok(summary) => HttpResponse::Created().json(summary),
        Err(err) => error_response(err),
    }
}

#[delete("/recipes/{id}/favorite")]
pub async fn remove_favorite(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let recipe_id = path.into_inner();

    match favorites::remove_favorite(repo.get_ref(), &user, recipe_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}
