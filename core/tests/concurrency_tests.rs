// tests/concurrency_tests.rs
mod common;

use cartstore::error::OUT_OF_STOCK;
use cartstore::CartError;
use common::*;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_interleaved_adds_cannot_both_pass_the_stock_check() {
  let fx = fixture_with_cart(&[(1, 1)], &[(1, 2)]);
  fx.stock.set_latency(Duration::from_millis(20));

  let (a, b) = tokio::join!(fx.store.add_product(1), fx.store.add_product(1));

  assert_eq!([a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(), 1);
  let failure = a.err().or(b.err()).unwrap();
  assert!(matches!(failure, CartError::StockInsufficient { requested: 3, .. }));
  assert_eq!(fx.lines(), vec![(1, 2)]);
  assert_eq!(fx.sink.messages(), vec![OUT_OF_STOCK]);
}

#[tokio::test]
async fn test_interleaved_first_adds_do_not_lose_items() {
  let fx = Fixture::new(&[]);
  fx.catalog.set_latency(Duration::from_millis(10));

  let (a, b, c) = tokio::join!(fx.store.add_product(1), fx.store.add_product(2), fx.store.add_product(3));
  a.unwrap();
  b.unwrap();
  c.unwrap();

  assert_eq!(fx.lines(), vec![(1, 1), (2, 1), (3, 1)]);
  assert_eq!(fx.store.revision(), 3);
}

#[tokio::test]
async fn test_same_product_added_twice_concurrently_yields_one_line() {
  let fx = Fixture::new(&[(1, 5)]);
  fx.catalog.set_latency(Duration::from_millis(10));

  let (a, b) = tokio::join!(fx.store.add_product(1), fx.store.add_product(1));
  a.unwrap();
  b.unwrap();

  assert_eq!(fx.lines(), vec![(1, 2)]);
}

#[tokio::test]
async fn test_remove_during_slow_update_wins_in_queue_order() {
  let fx = fixture_with_cart(&[(1, 1), (2, 1)], &[(1, 5), (2, 5)]);
  fx.stock.set_latency(Duration::from_millis(20));

  let (update, remove) = tokio::join!(fx.store.update_product_amount(1, 4), fx.store.remove_product(1));

  update.unwrap();
  remove.unwrap();
  assert_eq!(fx.lines(), vec![(2, 1)]);
  assert_eq!(fx.store.revision(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_tasks_respect_stock_ceiling() {
  let fx = Arc::new(Fixture::new(&[(1, 7)]));
  fx.stock.set_latency(Duration::from_millis(1));
  fx.store.add_product(1).await.unwrap();

  let handles: Vec<_> = (0..20)
    .map(|_| {
      let fx = fx.clone();
      tokio::spawn(async move { fx.store.add_product(1).await })
    })
    .collect();

  let mut succeeded = 0;
  for handle in handles {
    if handle.await.unwrap().is_ok() {
      succeeded += 1;
    }
  }

  assert_eq!(succeeded, 6);
  assert_eq!(fx.lines(), vec![(1, 7)]);
  assert_eq!(fx.sink.messages().len(), 14);
}

#[tokio::test]
async fn test_readers_see_committed_snapshot_while_operation_is_in_flight() {
  let fx = Arc::new(fixture_with_cart(&[(1, 1)], &[(1, 5)]));
  fx.stock.set_latency(Duration::from_millis(50));

  let writer = {
    let fx = fx.clone();
    tokio::spawn(async move { fx.store.update_product_amount(1, 3).await })
  };
  tokio::time::sleep(Duration::from_millis(10)).await;

  assert_eq!(fx.lines(), vec![(1, 1)]);
  writer.await.unwrap().unwrap();
  assert_eq!(fx.lines(), vec![(1, 3)]);
}
