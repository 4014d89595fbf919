/// Snapshot persistence tests
///
/// Run with: cargo test --test persistence_tests

use catalogdb::storage::SnapshotManager;
use catalogdb::{CatalogDb, Category, Customer, PageRequest, Product};
use rust_decimal::Decimal;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_open_empty_directory() {
    let temp_dir = TempDir::new().unwrap();
    let db = CatalogDb::open(temp_dir.path()).unwrap();

    assert!(db.is_persistent());
    assert_eq!(db.stats().unwrap().categories, 0);
}

#[test]
fn test_checkpoint_and_recover() {
    let temp_dir = TempDir::new().unwrap();

    let (category_id, product_id) = {
        let db = CatalogDb::open(temp_dir.path()).unwrap();
        let category = db.categories().save(Category::new("Shoes")).unwrap();
        db.customers().save(Customer::new("Ana", "12345678900")).unwrap();
        let product = db
            .products()
            .save(
                Product::builder("Runner")
                    .color("Blue")
                    .material("Mesh")
                    .stock_count(3)
                    .price(Decimal::new(12990, 2))
                    .category(category.id.unwrap())
                    .build(),
            )
            .unwrap();
        assert!(db.checkpoint().unwrap());
        (category.id.unwrap(), product.id.unwrap())
    };

    let db = CatalogDb::open(temp_dir.path()).unwrap();
    let stats = db.stats().unwrap();
    assert_eq!((stats.categories, stats.customers, stats.products), (1, 1, 1));

    let product = db.products().get_by_id(product_id).unwrap().unwrap();
    assert_eq!(product.price, Decimal::new(12990, 2));
    assert_eq!(product.category_id, Some(category_id));

    let customers = db
        .customers()
        .find(&Customer::probe("ana", ""), PageRequest::default())
        .unwrap();
    assert!(customers.content[0].registration_date.is_some());
}

#[test]
fn test_recovered_sequence_resumes_after_largest_id() {
    let temp_dir = TempDir::new().unwrap();
    {
        let db = CatalogDb::open(temp_dir.path()).unwrap();
        db.categories().save(Category::new("A")).unwrap();
        let b = db.categories().save(Category::new("B")).unwrap();
        db.categories().delete(&b).unwrap();
        db.checkpoint().unwrap();
    }

    let db = CatalogDb::open(temp_dir.path()).unwrap();
    assert!(db.categories().save(Category::new("A")).is_err());

    let c = db.categories().save(Category::new("C")).unwrap();
    assert_eq!(c.id, Some(2));
}

#[test]
fn test_writes_after_checkpoint_are_not_recovered() {
    let temp_dir = TempDir::new().unwrap();
    {
        let db = CatalogDb::open(temp_dir.path()).unwrap();
        db.categories().save(Category::new("Kept")).unwrap();
        db.checkpoint().unwrap();
        db.categories().save(Category::new("Lost")).unwrap();
    }

    let db = CatalogDb::open(temp_dir.path()).unwrap();
    assert_eq!(db.stats().unwrap().categories, 1);
}

#[test]
fn test_corrupt_snapshot_fails_open() {
    let temp_dir = TempDir::new().unwrap();
    let manager = SnapshotManager::in_dir(temp_dir.path());
    std::fs::write(manager.path(), b"garbage").unwrap();

    assert!(CatalogDb::open(temp_dir.path()).is_err());
}

#[test]
fn test_concurrent_checkpoints_keep_every_acknowledged_write() {
    for round in 0..25 {
        let temp_dir = TempDir::new().unwrap();
        {
            let db = CatalogDb::open(temp_dir.path()).unwrap();
            std::thread::scope(|scope| {
                for worker in 0..8 {
                    let db = &db;
                    scope.spawn(move || {
                        db.categories()
                            .save(Category::new(format!("round {round} worker {worker}")))
                            .unwrap();
                        assert!(db.checkpoint().unwrap());
                    });
                }
            });
        }

        let db = CatalogDb::open(temp_dir.path()).unwrap();
        assert_eq!(db.stats().unwrap().categories, 8, "round {round}");
    }
}

#[tokio::test]
async fn test_checkpoint_from_async_runtime() {
    let temp_dir = TempDir::new().unwrap();
    let db = Arc::new(CatalogDb::open(temp_dir.path()).unwrap());
    db.categories().save(Category::new("Async")).unwrap();

    assert!(Arc::clone(&db).checkpoint_blocking().await.unwrap());
    assert!(!Arc::new(CatalogDb::in_memory()).checkpoint_blocking().await.unwrap());

    let reopened = CatalogDb::open(temp_dir.path()).unwrap();
    assert_eq!(reopened.stats().unwrap().categories, 1);
}
