//! Helpers for integration tests.

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use foodgram::db::{DbPool, establish_connection_pool};
use foodgram::domain::ingredient::NewIngredient;
use foodgram::domain::tag::NewTag;
use foodgram::domain::user::{NewUser, User};
use foodgram::repository::{DieselRepository, IngredientWriter, TagWriter, UserWriter};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!(); // assumes migrations/ exists

/// Temporary database used in integration tests.
pub struct TestDb {
    filename: String,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        std::fs::remove_file(filename).ok(); // Clean up old DB

        let pool =
            establish_connection_pool(filename).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            filename: filename.to_string(),
            pool,
        }
    }
    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        std::fs::remove_file(&self.filename).ok();
        std::fs::remove_file(format!("{}-shm", &self.filename)).ok();
        std::fs::remove_file(format!("{}-wal", &self.filename)).ok();
    }
}

#[allow(dead_code)]
pub fn seed_user(repo: &DieselRepository, username: &str) -> User {
    repo.create_user(&NewUser::new(
        format!("{username}@example.com"),
        username,
        "Test",
        "User",
        "argon2-hash-placeholder",
    ))
    .expect("create user")
}

#[allow(dead_code)]
pub fn seed_tag(repo: &DieselRepository, name: &str, color: &str, slug: &str) -> i32 {
    repo.create_tag(&NewTag::new(name, color, slug))
        .expect("create tag")
        .id
}

#[allow(dead_code)]
pub fn seed_ingredients(repo: &DieselRepository, rows: &[(&str, &str)]) {
    let new_ingredients: Vec<NewIngredient> = rows
        .iter()
        .map(|(name, unit)| NewIngredient::new(*name, *unit))
        .collect();

    repo.create_ingredients(&new_ingredients)
        .expect("create ingredients");
}
