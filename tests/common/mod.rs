//! Helpers for integration tests.

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::NamedTempFile;

use noobhub::db::{DbPool, establish_connection_pool};
use noobhub::domain::category::{Category, NewCategory};
use noobhub::domain::subcategory::{NewSubcategory, Subcategory};
use noobhub::domain::types::{CategoryName, SubcategoryName, Username};
use noobhub::domain::user::{NewUser, User};
use noobhub::repository::{
    CategoryReader, CategoryWriter, DieselRepository, SubcategoryReader, SubcategoryWriter,
    UserReader, UserWriter,
};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!(); // assumes migrations/ exists

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

/// Creates a category holding one subcategory and returns both rows.
pub fn seed_board(
    repo: &DieselRepository,
    category_name: &str,
    subcategory_name: &str,
) -> (Category, Subcategory) {
    let name = CategoryName::new(category_name).expect("valid category name");
    let new_category = NewCategory::new(name, None).expect("valid category");
    repo.create_category(&new_category)
        .expect("should create category");
    let category = repo
        .get_category_by_slug(new_category.slug.as_str())
        .expect("should read category")
        .expect("created category should exist");

    let name = SubcategoryName::new(subcategory_name).expect("valid subcategory name");
    let new_subcategory = NewSubcategory::new(category.id, name, None).expect("valid subcategory");
    repo.create_subcategory(&new_subcategory)
        .expect("should create subcategory");
    let subcategory = repo
        .get_subcategory_by_slug(category.id, new_subcategory.slug.as_str())
        .expect("should read subcategory")
        .expect("created subcategory should exist");

    (category, subcategory)
}

/// Creates a user and returns the stored row.
pub fn seed_user(repo: &DieselRepository, username: &str) -> User {
    let new_user = NewUser::new(
        Username::new(username).expect("valid username"),
        format!("{username}@example.com"),
    );
    repo.create_user(&new_user).expect("should create user");
    repo.get_user_by_username(username)
        .expect("should read user")
        .expect("created user should exist")
}
