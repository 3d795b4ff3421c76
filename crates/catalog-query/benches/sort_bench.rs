use catalog_query::{FilterCriteria, QueryBuilder, SortKey, SortPolicy};
use common::{CategoryId, NewProduct, PriceValue, ProductId, ProductView};
use criterion::{Criterion, criterion_group, criterion_main};

/// Builds N products with scattered names, barcodes and prices.
fn make_views(n: usize) -> Vec<ProductView> {
    (0..n)
        .map(|i| {
            let units = ((i * 7_919) % 50_000) as i64;
            let product = NewProduct::new(
                format!("Product {:05}", (i * 104_729) % n),
                PriceValue::from_minor_units(units),
            )
            .barcode(format!("{:013}", (i * 15_485_863) % 10_000_000_000_000))
            .category(CategoryId::new((i % 8) as i64));
            ProductView::join(product.with_id(ProductId::new(i as i64 + 1)), None)
        })
        .collect()
}

fn bench_sort_1000(c: &mut Criterion) {
    let views = make_views(1_000);

    for key in [SortKey::NameAsc, SortKey::BarcodeDesc, SortKey::PriceAsc] {
        c.bench_function(&format!("sort/1000_views/{key}"), |b| {
            b.iter(|| SortPolicy::sorted(&views, key));
        });
    }
}

fn bench_sort_10000(c: &mut Criterion) {
    let views = make_views(10_000);

    c.bench_function("sort/10000_views/PRICE_DESC", |b| {
        b.iter(|| SortPolicy::sorted(&views, SortKey::PriceDesc));
    });
}

fn bench_filter_10000(c: &mut Criterion) {
    let views = make_views(10_000);
    let criteria = FilterCriteria::new()
        .name_contains("product 0")
        .category(3)
        .price_range(
            PriceValue::from_minor_units(1_000),
            PriceValue::from_minor_units(30_000),
        );

    c.bench_function("filter/10000_views/all_clauses", |b| {
        b.iter(|| {
            let predicate = QueryBuilder::build(&criteria);
            views.iter().filter(|v| predicate.matches(v)).count()
        });
    });
}

criterion_group!(benches, bench_sort_1000, bench_sort_10000, bench_filter_10000);
criterion_main!(benches);
