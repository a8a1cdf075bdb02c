use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use serde_json::json;

use crate::auth::AuthenticatedUser;
use crate::forms::ingredients::UploadIngredientsForm;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::ingredients::{self, IngredientsQuery};

#[get("/ingredients")]
/// Search the ingredient catalog by case-insensitive name prefix.
pub async fn list_ingredients(
    params: web::Query<IngredientsQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match ingredients::list_ingredients(repo.get_ref(), params.into_inner()) {
        Ok(ingredients) => HttpResponse::Ok().json(ingredients),
        Err(err) => error_response(err),
    }
}

#[get("/ingredients/{id}")]
pub async fn get_ingredient(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let ingredient_id = path.into_inner();

    match ingredients::get_ingredient(repo.get_ref(), ingredient_id) {
        Ok(ingredient) => HttpResponse::Ok().json(ingredient),
        Err(err) => error_response(err),
    }
}

#[post("/ingredients/upload")]
/// Bulk-load reference ingredients from a headerless `name,unit` CSV.
pub async fn upload_ingredients(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    MultipartForm(form): MultipartForm<UploadIngredientsForm>,
) -> impl Responder {
    match ingredients::import_ingredients(repo.get_ref(), &user, form) {
        Ok(inserted) => HttpResponse::Created().json(json!({ "created": inserted })),
        Err(err) => error_response(err),
    }
}
