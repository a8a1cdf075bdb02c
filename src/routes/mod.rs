use actix_web::HttpResponse;
use serde_json::json;

use crate::services::ServiceError;

pub mod auth;
pub mod favorites;
pub mod ingredients;
pub mod recipes;
pub mod shopping_cart;
pub mod tags;
pub mod users;

/// Translate a service error into the JSON error response. Authentication
/// failures never reach this point (the identity extractor answers 401),
/// so `Unauthorized` here means a permission failure.
pub fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => HttpResponse::Forbidden().json(json!({
            "detail": "У вас недостаточно прав для выполнения данного действия."
        })),
        ServiceError::NotFound => HttpResponse::NotFound().json(json!({
            "detail": "Страница не найдена."
        })),
        ServiceError::Conflict => HttpResponse::BadRequest().json(json!({
            "errors": "Запись уже существует."
        })),
        ServiceError::Form(message) => HttpResponse::BadRequest().json(json!({
            "errors": message
        })),
        err => {
            log::error!("Service failure: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
