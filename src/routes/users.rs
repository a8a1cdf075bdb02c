use actix_web::{HttpResponse, Responder, delete, get, post, web};

use crate::auth::{AuthenticatedUser, OptionalUser};
use crate::forms::auth::SignupForm;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::subscriptions::{self, SubscriptionsQuery};
use crate::services::users::{self, UsersQuery};

#[get("/users")]
pub async fn list_users(
    params: web::Query<UsersQuery>,
    user: OptionalUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match users::list_users(repo.get_ref(), user.viewer_id(), params.into_inner()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err),
    }
}

#[post("/users")]
/// Register a new account.
pub async fn register(
    repo: web::Data<DieselRepository>,
    form: web::Json<SignupForm>,
) -> impl Responder {
    match users::register(repo.get_ref(), form.into_inner()) {
        Ok(profile) => HttpResponse::Created().json(profile),
        Err(err) => error_response(err),
    }
}

#[get("/users/subscriptions")]
/// List the authors the caller follows. Registered ahead of the `{id}`
/// routes so the literal segment wins.
pub async fn list_subscriptions(
    params: web::Query<SubscriptionsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match subscriptions::list_subscriptions(repo.get_ref(), &user, params.into_inner()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err),
    }
}

#[get("/users/{id}")]
pub async fn get_user(
    path: web::Path<i32>,
    user: OptionalUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let user_id = path.into_inner();

    match users::get_profile(repo.get_ref(), user.viewer_id(), user_id) {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(err) => error_response(err),
    }
}

#[post("/users/{id}/subscribe")]
/// Follow the author and return their feed projection.
pub async fn subscribe(
    path: web::Path<i32>,
    params: web::Query<SubscriptionsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let author_id = path.into_inner();

    match subscriptions::subscribe(repo.get_ref(), &user, author_id, params.into_inner()) {
        Ok(author) => HttpResponse::Created().json(author),
        Err(err) => error_response(err),
    }
}

#[delete("/users/{id}/subscribe")]
pub async fn unsubscribe(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let author_id = path.into_inner();

    match subscriptions::unsubscribe(repo.get_ref(), &user, author_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}
