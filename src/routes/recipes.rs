use actix_web::{HttpRequest, HttpResponse, Responder, delete, get, patch, post, web};
use serde_json::json;

use crate::auth::{AuthenticatedUser, OptionalUser};
use crate::forms::recipes::RecipeForm;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::recipes::{self, RecipesQuery};

#[get("/recipes")]
/// Return one page of the recipe feed. The `tags` filter may be repeated,
/// so the query string is parsed with `serde_html_form`.
pub async fn list_recipes(
    req: HttpRequest,
    user: OptionalUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let query: RecipesQuery = match serde_html_form::from_str(req.query_string()) {
        Ok(query) => query,
        Err(err) => {
            return HttpResponse::BadRequest().json(json!({ "errors": err.to_string() }));
        }
    };

    match recipes::list_recipes(repo.get_ref(), user.viewer_id(), query) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err),
    }
}

#[get("/recipes/{id}")]
pub async fn get_recipe(
    path: web::Path<i32>,
    user: OptionalUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let recipe_id = path.into_inner();

    match recipes::get_recipe(repo.get_ref(), user.viewer_id(), recipe_id) {
        Ok(recipe) => HttpResponse::Ok().json(recipe),
        Err(err) => error_response(err),
    }
}

#[post("/recipes")]
pub async fn create_recipe(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<RecipeForm>,
) -> impl Responder {
    match recipes::create_recipe(repo.get_ref(), &user, form.into_inner()) {
        Ok(recipe) => HttpResponse::Created().json(recipe),
        Err(err) => error_response(err),
    }
}

#[patch("/recipes/{id}")]
pub async fn update_recipe(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<RecipeForm>,
) -> impl Responder {
    let recipe_id = path.into_inner();

    match recipes::update_recipe(repo.get_ref(), &user, recipe_id, form.into_inner()) {
        Ok(recipe) => HttpResponse::Ok().json(recipe),
        Err(err) => error_response(err),
    }
}

#[delete("/recipes/{id}")]
pub async fn delete_recipe(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let recipe_id = path.into_inner();

    match recipes::delete_recipe(repo.get_ref(), &user, recipe_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}
