// tests/persistence_tests.rs
mod common;

use cartstore::error::ADD_PRODUCT_FAILED;
use cartstore::services::{FileStore, MemoryCatalog, MemoryStock, MemoryStore, RecordingSink};
use cartstore::{Cart, CartConfig, CartError, CartServices, CartStore, KeyValueStore, DEFAULT_STORAGE_KEY};
use common::*;
use std::sync::Arc;

fn parse_stored(json: &str) -> Cart {
  serde_json::from_str(json).expect("stored cart should parse")
}

#[tokio::test]
async fn test_every_successful_operation_writes_through() {
  let fx = Fixture::new(&[(1, 5), (2, 5)]);

  fx.store.add_product(1).await.unwrap();
  assert_eq!(parse_stored(&fx.stored_json().unwrap()), *fx.store.cart());

  fx.store.add_product(2).await.unwrap();
  assert_eq!(parse_stored(&fx.stored_json().unwrap()), *fx.store.cart());

  fx.store.update_product_amount(2, 4).await.unwrap();
  assert_eq!(parse_stored(&fx.stored_json().unwrap()), *fx.store.cart());

  fx.store.remove_product(1).await.unwrap();
  assert_eq!(parse_stored(&fx.stored_json().unwrap()), *fx.store.cart());

  assert_eq!(fx.storage.write_count(), 4);
}

#[tokio::test]
async fn test_stored_cart_uses_decimal_prices() {
  let fx = Fixture::new(&[]);
  fx.store.add_product(1).await.unwrap();

  let stored: serde_json::Value = serde_json::from_str(&fx.stored_json().unwrap()).unwrap();
  assert_eq!(
    stored,
    serde_json::json!([{
      "id": 1,
      "title": "Lightweight Walking Sneaker",
      "price": 179.9,
      "image": "https://cdn.example.com/products/1.jpg",
      "amount": 1
    }])
  );
}

#[tokio::test]
async fn test_reopen_restores_identical_cart() {
  let fx = Fixture::new(&[(1, 5), (3, 5)]);
  fx.store.add_product(3).await.unwrap();
  fx.store.add_product(1).await.unwrap();
  fx.store.update_product_amount(3, 2).await.unwrap();

  let reopened = fx.reopen();

  assert_eq!(*reopened.cart(), *fx.store.cart());
  assert_eq!(
    reopened.cart().items().iter().map(|i| i.id).collect::<Vec<_>>(),
    vec![3, 1]
  );
  assert_eq!(reopened.revision(), 0);
}

#[tokio::test]
async fn test_rejected_operations_never_write() {
  let fx = fixture_with_cart(&[(1, 2)], &[(1, 2)]);
  let before = fx.stored_json();

  let _ = fx.store.add_product(1).await;
  let _ = fx.store.add_product(42).await;
  let _ = fx.store.remove_product(3).await;
  let _ = fx.store.update_product_amount(1, 9).await;
  let _ = fx.store.update_product_amount(1, 0).await;

  assert_eq!(fx.storage.write_count(), 0);
  assert_eq!(fx.stored_json(), before);
  assert_eq!(fx.sink.messages().len(), 4);
}

#[tokio::test]
async fn test_failed_write_leaves_memory_unchanged() {
  let fx = Fixture::new(&[(1, 5)]);
  fx.store.add_product(1).await.unwrap();
  fx.storage.set_fail_writes(true);

  let err = fx.store.add_product(2).await.unwrap_err();

  assert!(matches!(err, CartError::Persistence { ref key, .. } if key == DEFAULT_STORAGE_KEY));
  assert_eq!(fx.lines(), vec![(1, 1)]);
  assert_eq!(fx.store.revision(), 1);
  assert_eq!(fx.sink.messages(), vec![ADD_PRODUCT_FAILED]);
  assert_eq!(parse_stored(&fx.stored_json().unwrap()), *fx.store.cart());
}

#[test]
fn test_missing_corrupt_or_invalid_storage_starts_empty() {
  let cases = [
    None,
    Some("not json"),
    Some(r#"{"id": 1}"#),
    Some(r#"[{"id":1,"title":"x","price":1.0,"image":"i","amount":0}]"#),
    Some(
      r#"[{"id":1,"title":"x","price":1.0,"image":"i","amount":1},{"id":1,"title":"x","price":1.0,"image":"i","amount":2}]"#,
    ),
  ];

  for raw in cases {
    let storage = Arc::new(MemoryStore::new());
    if let Some(raw) = raw {
      storage.insert_raw(DEFAULT_STORAGE_KEY, raw);
    }
    let fx = Fixture::with_storage(&[], storage);
    assert!(fx.store.cart().is_empty(), "expected empty cart for {:?}", raw);
  }
}

#[tokio::test]
async fn test_custom_storage_key_is_honored() {
  setup_tracing();
  let storage = Arc::new(MemoryStore::new());
  let store = CartStore::open(
    CartConfig::with_storage_key("@shop-b:cart"),
    CartServices {
      catalog: Arc::new(MemoryCatalog::new(sample_products())),
      stock: Arc::new(MemoryStock::default()),
      storage: storage.clone(),
      notifier: Arc::new(RecordingSink::new()),
    },
  )
  .unwrap();

  store.add_product(4).await.unwrap();

  assert!(storage.raw("@shop-b:cart").is_some());
  assert!(storage.raw(DEFAULT_STORAGE_KEY).is_none());
  assert_eq!(store.config().storage_key, "@shop-b:cart");
}

#[tokio::test]
async fn test_file_store_survives_reopen() {
  setup_tracing();
  let dir = tempfile::tempdir().unwrap();
  let open = |root: &std::path::Path| {
    CartStore::open(
      CartConfig::default(),
      CartServices {
        catalog: Arc::new(MemoryCatalog::new(sample_products())),
        stock: Arc::new(MemoryStock::new([(2, 4)])),
        storage: Arc::new(FileStore::open(root).unwrap()),
        notifier: Arc::new(RecordingSink::new()),
      },
    )
    .unwrap()
  };

  let first = open(dir.path());
  first.add_product(2).await.unwrap();
  first.add_product(2).await.unwrap();
  drop(first);

  let second = open(dir.path());
  assert_eq!(second.cart().get(2).map(|i| i.amount), Some(2));
}

#[test]
fn test_file_store_get_set() {
  let dir = tempfile::tempdir().unwrap();
  let store = FileStore::open(dir.path().join("nested")).unwrap();

  assert_eq!(store.get("@storefront:cart").unwrap(), None);
  store.set("@storefront:cart", "[1]").unwrap();
  store.set("@storefront:cart", "[2]").unwrap();

  assert_eq!(store.get("@storefront:cart").unwrap().as_deref(), Some("[2]"));
  assert_eq!(
    store.path_for("@storefront:cart").file_name().unwrap(),
    "_storefront_cart.json"
  );
  assert!(!store.path_for("@storefront:cart").with_extension("json.tmp").exists());
}
