/*!
# Criteria Benchmarks

Descriptor lookups, query-parameter rendering and sort resolution.

## Usage

```bash
# Run all benchmarks
cargo bench --bench criteria_benchmarks

# Run a specific benchmark group
cargo bench --bench criteria_benchmarks -- "Descriptor"

# Quick benchmark with fewer samples
cargo bench --bench criteria_benchmarks -- --quick
```

HTML reports are generated in `target/criterion/report/index.html`.
*/

use criterion::{Criterion, criterion_group, criterion_main};
use criteriacrate::Criteria;
use criteriacrate::filter::{Formatters, IntegerFilter, LocalDateFilter, StringFilter, UuidFilter};
use criteriacrate::metadata::extraction::extract_descriptor;
use criteriacrate::sort::{ColumnRef, SortConfig, SortRequest, apply_sort};
use sea_orm::sea_query::{Alias, PostgresQueryBuilder, Query, QueryStatementWriter};
use sea_orm::{Condition, EntityTrait};
use std::hint::black_box;

mod product {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "products")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

#[derive(Debug, Default, Criteria)]
pub struct AuditCriteria {
    pub id: Option<UuidFilter>,
    pub created: Option<LocalDateFilter>,
}

/// Benchmark criteria with a base level and every member shape
#[derive(Debug, Default, Criteria)]
pub struct ProductCriteria {
    #[criteria(base)]
    pub audit: AuditCriteria,
    pub name: Option<StringFilter>,
    #[criteria(alias = "cost")]
    pub price: Option<IntegerFilter>,
    #[criteria(include)]
    pub tags: Vec<String>,
    #[criteria(include)]
    pub category: Option<String>,
    pub page: u32,
}

fn sample_criteria() -> ProductCriteria {
    ProductCriteria {
        name: Some(StringFilter::new().with_contains("lamp")),
        price: Some(IntegerFilter::between(10, 50)),
        tags: vec!["desk".into(), "led".into()],
        category: Some("lighting".into()),
        ..Default::default()
    }
}

fn bench_descriptor(c: &mut Criterion) {
    let mut group = c.benchmark_group("Descriptor");

    group.bench_function("extract_uncached", |b| {
        b.iter(|| extract_descriptor(black_box(&ProductCriteria::declaration())));
    });

    group.bench_function("lookup_cached", |b| {
        let _ = ProductCriteria::descriptor();
        b.iter(|| black_box(ProductCriteria::descriptor()));
    });

    group.finish();
}

fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("Rendering");
    let criteria = sample_criteria();
    let formatters = Formatters::new();

    group.bench_function("to_query_params", |b| {
        b.iter(|| black_box(&criteria).to_query_params(&formatters));
    });

    group.bench_function("to_condition", |b| {
        b.iter(|| {
            let condition = black_box(&criteria).to_condition().unwrap_or_else(|_| Condition::all());
            Query::select()
                .column(Alias::new("id"))
                .from(Alias::new("products"))
                .cond_where(condition)
                .to_string(PostgresQueryBuilder)
        });
    });

    group.finish();
}

fn bench_sorting(c: &mut Criterion) {
    let mut group = c.benchmark_group("Sorting");
    let config = SortConfig::builder()
        .alias("name", [ColumnRef::text("name"), ColumnRef::new("id")])
        .and_then(|builder| builder.alias_positions("first", [1]))
        .map(|builder| builder.build());
    let Ok(config) = config else {
        return;
    };
    let request = SortRequest::parse("name,desc,ignorecase;first,nullslast").unwrap_or_default();

    group.bench_function("parse_request", |b| {
        b.iter(|| SortRequest::parse(black_box("name,desc,ignorecase;first,nullslast")));
    });

    group.bench_function("resolve_and_apply", |b| {
        b.iter(|| {
            let resolved = config.resolve(black_box(&request), None).unwrap_or_default();
            apply_sort(product::Entity::find(), &resolved)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_descriptor, bench_rendering, bench_sorting);
criterion_main!(benches);
