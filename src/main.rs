use std::env;

use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use foodgram::db::establish_connection_pool;
use foodgram::repository::DieselRepository;
use foodgram::routes::auth::{login, logout};
use foodgram::routes::favorites::{add_favorite, remove_favorite};
use foodgram::routes::ingredients::{get_ingredient, list_ingredients, upload_ingredients};
use foodgram::routes::recipes::{
    create_recipe, delete_recipe, get_recipe, list_recipes, update_recipe,
};
use foodgram::routes::shopping_cart::{add_to_cart, download_shopping_cart, remove_from_cart};
use foodgram::routes::tags::{get_tag, list_tags};
use foodgram::routes::users::{
    get_user, list_subscriptions, list_users, register, subscribe, unsubscribe,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let database_url = env::var("DATABASE_URL").unwrap_or("foodgram.db".to_string());
    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());

    let secret = env::var("SECRET_KEY");
    let secret_key = match &secret {
        Ok(key) => Key::from(key.as_bytes()),
        Err(_) => Key::generate(),
    };

    let domain = env::var("DOMAIN").unwrap_or("localhost".to_string());

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    HttpServer::new(move || {
        App::new()
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{domain}")))
                    .build(),
            )
            .wrap(middleware::NormalizePath::trim())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(
                // Literal paths are registered ahead of their `{id}`
                // siblings so the router prefers them.
                web::scope("/api")
                    .service(login)
                    .service(logout)
                    .service(list_subscriptions)
                    .service(list_users)
                    .service(register)
                    .service(subscribe)
                    .service(unsubscribe)
                    .service(get_user)
                    .service(list_tags)
                    .service(get_tag)
                    .service(upload_ingredients)
                    .service(list_ingredients)
                    .service(get_ingredient)
                    .service(download_shopping_cart)
                    .service(list_recipes)
                    .service(create_recipe)
                    .service(add_favorite)
                    .service(remove_favorite)
                    .service(add_to_cart)
                    .service(remove_from_cart)
                    .service(get_recipe)
                    .service(update_recipe)
                    .service(delete_recipe),
            )
            .app_data(web::Data::new(repo.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
