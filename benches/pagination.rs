//! Pagination Benchmarks
//!
//! Lays out large reports on the recording renderer to measure the cost of
//! chunking, column planning and footer accounting without PDF encoding.
//!
//! Run with: `cargo bench --bench pagination`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;

use chrono::NaiveDate;
use service_order_report::report::layout::{footer_labels, plan_company};
use service_order_report::report::testing::RecordingRenderer;
use service_order_report::report::{Company, OrderRecord, Paginator, ReportHeader};

fn company(index: usize, rows: usize) -> Company {
    Company {
        company_name: format!("Company {}", index),
        company_code: format!("C{:04}", index),
        service_order: (0..rows)
            .map(|i| {
                [
                    ("ServiceOrderNo", json!(format!("SO-{:06}", i))),
                    ("Command", json!("Inspect and replace worn parts")),
                    ("ServiceType", json!("Repair")),
                    ("Status", json!("Open")),
                    ("ServiceDate", json!("01/02/2024")),
                ]
                .into_iter()
                .collect::<OrderRecord>()
            })
            .collect(),
    }
}

fn bench_generate(c: &mut Criterion) {
    let header = ReportHeader::new("Bench Org", NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    let mut group = c.benchmark_group("generate");

    for companies in [1usize, 10, 100] {
        let data: Vec<Company> = (0..companies).map(|i| company(i, 23)).collect();
        group.throughput(Throughput::Elements((companies * 23) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(companies), &data, |b, data| {
            b.iter(|| {
                Paginator::new(&header)
                    .generate(RecordingRenderer::new(), black_box(data))
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    c.bench_function("plan_company_10k_rows", |b| {
        b.iter(|| plan_company(black_box(10_000), false))
    });
    c.bench_function("footer_labels_2k_pages", |b| {
        let draws = vec![1usize; 2_000];
        b.iter(|| footer_labels(black_box(&draws)))
    });
}

criterion_group!(benches, bench_generate, bench_layout);
criterion_main!(benches);
