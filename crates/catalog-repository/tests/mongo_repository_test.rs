//! Integration tests for the MongoDB repositories.
//!
//! These tests run against a real MongoDB server using testcontainers and
//! require Docker. Run them with `cargo test -- --ignored`.

mod common;

use catalog_core::{
    ComponentDraft, EmbeddedComponent, EntityStore, ManufacturerDraft, ProductDraft, ProductId,
};
use catalog_repository::{
    ManufacturerRepository, MongoComponentRepository, MongoManufacturerRepository,
    MongoProductRepository, ProductRepository,
};
use common::TestDatabase;

fn widget() -> ProductDraft {
    ProductDraft {
        name: "Widget".to_string(),
        description: "A small widget".to_string(),
        price: 9.99,
        image_path: "/img/w.png".to_string(),
        components: None,
    }
}

fn manufacturer(products: Vec<ProductId>) -> ManufacturerDraft {
    ManufacturerDraft {
        name: "Acme".to_string(),
        address: "1 Road Runner Way".to_string(),
        contact_number: 5_551_234,
        profile_image_path: "/img/acme.png".to_string(),
        products: Some(products),
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_product_crud() {
    let db = TestDatabase::new().await;
    let repo = MongoProductRepository::new(db.connection());

    let created = repo.create(widget()).await.expect("Failed to create product");
    assert_eq!(created.name, "Widget");
    assert!(created.components.is_empty());

    let found = repo
        .find_by_id(&created.id)
        .await
        .expect("Query failed")
        .expect("Product not found");
    assert_eq!(found, created);

    let updated = repo
        .update_by_id(
            &created.id,
            ProductDraft {
                price: 12.5,
                ..widget()
            },
        )
        .await
        .expect("Update failed")
        .expect("Product not found");
    assert_eq!(updated.price, 12.5);

    assert_eq!(repo.find_all().await.unwrap().len(), 1);
    assert!(repo.delete_by_id(&created.id).await.unwrap());
    assert!(!repo.delete_by_id(&created.id).await.unwrap());
    assert!(repo.find_by_id(&created.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_missing_product_returns_none() {
    let db = TestDatabase::new().await;
    let repo = MongoProductRepository::new(db.connection());

    let missing = ProductId::parse("64b7f0c2a1b2c3d4e5f60718").unwrap();
    assert!(repo.update_by_id(&missing, widget()).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_push_component() {
    let db = TestDatabase::new().await;
    let repo = MongoProductRepository::new(db.connection());
    let product = repo.create(widget()).await.unwrap();

    let updated = repo
        .push_component(
            &product.id,
            EmbeddedComponent {
                name: "Bolt".to_string(),
                description: "M6 steel bolt".to_string(),
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.components.len(), 1);
    assert_eq!(updated.components[0].name, "Bolt");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_existing_ids_filters_unknown() {
    let db = TestDatabase::new().await;
    let repo = MongoProductRepository::new(db.connection());
    let product = repo.create(widget()).await.unwrap();
    let unknown = ProductId::parse("64b7f0c2a1b2c3d4e5f60718").unwrap();

    let existing = repo
        .existing_ids(&[product.id.clone(), unknown])
        .await
        .unwrap();
    assert_eq!(existing, vec![product.id]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_pull_product_reference() {
    let db = TestDatabase::new().await;
    let products = MongoProductRepository::new(db.connection());
    let manufacturers = MongoManufacturerRepository::new(db.connection());

    let p1 = products.create(widget()).await.unwrap();
    let p2 = products.create(widget()).await.unwrap();
    let m = manufacturers
        .create(manufacturer(vec![p1.id.clone(), p2.id.clone()]))
        .await
        .unwrap();
    let untouched = manufacturers
        .create(manufacturer(vec![p2.id.clone()]))
        .await
        .unwrap();

    let affected = manufacturers.pull_product_reference(&p1.id).await.unwrap();
    assert_eq!(affected, vec![m.id.clone()]);

    let reloaded = manufacturers.find_by_id(&m.id).await.unwrap().unwrap();
    assert_eq!(reloaded.products, vec![p2.id.clone()]);

    let referencing = manufacturers.find_by_product(&p2.id).await.unwrap();
    let ids: Vec<_> = referencing.into_iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![m.id, untouched.id]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_component_crud() {
    let db = TestDatabase::new().await;
    let repo = MongoComponentRepository::new(db.connection());

    let created = repo
        .create(ComponentDraft {
            name: "Bolt".to_string(),
            description: "M6 steel bolt".to_string(),
        })
        .await
        .unwrap();

    let updated = repo
        .update_by_id(
            &created.id,
            ComponentDraft {
                name: "Nut".to_string(),
                description: "M6 steel nut".to_string(),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Nut");

    assert!(repo.delete_by_id(&created.id).await.unwrap());
    assert!(repo.find_all().await.unwrap().is_empty());
}
