use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use storefront::{Cart, CatalogQuery, CategoryFilter, Product, SortKey, CATEGORIES};

// --- Synthetic catalog ---
fn build_catalog(size: usize) -> Vec<Product> {
  (0..size)
    .map(|i| {
      let category = CATEGORIES[i % CATEGORIES.len()].id;
      Product::new(
        format!("p{}", i),
        format!("Part {} {}", i % 97, if i % 5 == 0 { "Brake" } else { "Filter" }),
        format!("Brand{}", i % 13),
        (i % 600) as f64 + 0.99,
        category,
      )
      .with_description("Replacement part for most makes")
      .with_stock((i % 20) as u32)
      .with_rating((i % 6) as f64)
    })
    .collect()
}

fn bench_catalog_filter(c: &mut Criterion) {
  let mut group = c.benchmark_group("catalog_filter_sort");
  for size in [100usize, 1_000, 10_000] {
    let catalog = build_catalog(size);
    group.throughput(Throughput::Elements(size as u64));
    for sort in [SortKey::Name, SortKey::PriceLow, SortKey::Rating] {
      let query = CatalogQuery {
        term: "brake".to_string(),
        category: CategoryFilter::All,
        sort,
        ..CatalogQuery::default()
      };
      group.bench_with_input(BenchmarkId::new(sort.as_str(), size), &catalog, |b, catalog| {
        b.iter(|| black_box(query.apply(black_box(catalog))))
      });
    }
  }
  group.finish();
}

fn bench_cart_aggregation(c: &mut Criterion) {
  let catalog = build_catalog(200);
  c.bench_function("cart_add_200_distinct_then_repeat", |b| {
    b.iter(|| {
      let mut cart = Cart::new();
      for product in &catalog {
        cart.add_item(product.clone());
      }
      for product in catalog.iter().take(50) {
        cart.add_item(product.clone());
      }
      black_box((cart.total(), cart.item_count()))
    })
  });
}

criterion_group!(benches, bench_catalog_filter, bench_cart_aggregation);
criterion_main!(benches);
