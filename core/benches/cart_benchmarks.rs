use cartstore::services::{MemoryCatalog, MemoryStock, MemoryStore, RecordingSink};
use cartstore::{CartConfig, CartServices, CartStore, Price, Product};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use tokio::runtime::Runtime;

fn catalog_of(size: u64) -> Vec<Product> {
  (1..=size)
    .map(|id| Product {
      id,
      title: format!("Bench product {}", id),
      price: Price::from_cents(1000 + id as i64),
      image: format!("https://cdn.example.com/{}.jpg", id),
    })
    .collect()
}

fn open_store(size: u64) -> CartStore {
  CartStore::open(
    CartConfig::default(),
    CartServices {
      catalog: Arc::new(MemoryCatalog::new(catalog_of(size))),
      stock: Arc::new(MemoryStock::new((1..=size).map(|id| (id, u32::MAX)))),
      storage: Arc::new(MemoryStore::new()),
      notifier: Arc::new(RecordingSink::new()),
    },
  )
  .unwrap()
}

/// Fills a cart with `lines` distinct products, then empties it again. Each
/// commit re-serializes the whole cart, so cost grows with cart size.
fn bench_fill_and_empty(c: &mut Criterion) {
  let mut group = c.benchmark_group("FillAndEmpty");
  let rt = Runtime::new().unwrap();

  for lines in [1u64, 10, 50].iter() {
    group.throughput(Throughput::Elements(*lines * 2));
    group.bench_with_input(BenchmarkId::from_parameter(lines), lines, |b, &lines| {
      let store = open_store(lines);
      b.to_async(&rt).iter(|| async {
        for id in 1..=lines {
          store.add_product(id).await.unwrap();
        }
        for id in 1..=lines {
          store.remove_product(id).await.unwrap();
        }
      });
    });
  }
  group.finish();
}

fn bench_stock_checked_updates(c: &mut Criterion) {
  let rt = Runtime::new().unwrap();
  let store = open_store(1);
  rt.block_on(store.add_product(1)).unwrap();

  c.bench_function("UpdateAmount", |b| {
    let mut target = 1i64;
    b.to_async(&rt).iter(|| {
      target = target % 100 + 1;
      let amount = target;
      let store = &store;
      async move { store.update_product_amount(1, amount).await.unwrap() }
    });
  });
}

fn bench_rejected_add(c: &mut Criterion) {
  let rt = Runtime::new().unwrap();
  let store = open_store(0);

  c.bench_function("RejectedAdd", |b| {
    b.to_async(&rt).iter(|| async { store.add_product(7).await.unwrap_err() });
  });
}

criterion_group!(benches, bench_fill_and_empty, bench_stock_checked_updates, bench_rejected_add);
criterion_main!(benches);
