use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, post, web};

use crate::forms::auth::LoginForm;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::ServiceError;
use crate::services::auth as auth_service;

#[post("/auth/login")]
/// Verify credentials and attach the user id to the session cookie.
pub async fn login(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    form: web::Json<LoginForm>,
) -> impl Responder {
    match auth_service::authenticate(repo.get_ref(), &form) {
        Ok(account) => match Identity::login(&req.extensions(), account.id.to_string()) {
            Ok(_) => HttpResponse::NoContent().finish(),
            Err(err) => {
                log::error!("Failed to establish session: {err}");
                HttpResponse::InternalServerError().finish()
            }
        },
        Err(ServiceError::Unauthorized) => HttpResponse::BadRequest().json(
            serde_json::json!({ "errors": "Неверные учетные данные." }),
        ),
        Err(err) => error_response(err),
    }
}

#[post("/auth/logout")]
pub async fn logout(identity: Identity) -> impl Responder {
    identity.logout();
    HttpResponse::NoContent().finish()
}
