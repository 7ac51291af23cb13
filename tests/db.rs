use diesel::prelude::*;
use noobhub::repository::DieselRepository;
use noobhub::schema::websites;

mod common;

#[test]
fn test_creates_and_removes_db_files() {
    let test_db = common::TestDb::new();
    let pool = test_db.pool();
    let conn = pool.get();
    assert!(conn.is_ok());
}

#[test]
fn connections_enforce_foreign_keys() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let (category, subcategory) = common::seed_board(&repo, "Programming", "Rust");
    let user = common::seed_user(&repo, "alice");

    let mut conn = test_db.pool().get().expect("should acquire connection");

    // A row pointing at an author that does not exist must be rejected.
    let orphan = diesel::insert_into(websites::table)
        .values((
            websites::category_id.eq(category.id.get()),
            websites::subcategory_id.eq(subcategory.id.get()),
            websites::recommended_by.eq(9999),
            websites::title.eq("Orphan"),
            websites::description.eq("Dangling author"),
            websites::url.eq("http://orphan.example.com"),
        ))
        .execute(&mut conn);
    assert!(orphan.is_err());

    let valid = diesel::insert_into(websites::table)
        .values((
            websites::category_id.eq(category.id.get()),
            websites::subcategory_id.eq(subcategory.id.get()),
            websites::recommended_by.eq(user.id.get()),
            websites::title.eq("Rust by Example"),
            websites::description.eq("Learn by doing"),
            websites::url.eq("http://rustbyexample.example.com"),
        ))
        .execute(&mut conn);
    assert!(valid.is_ok());
}
