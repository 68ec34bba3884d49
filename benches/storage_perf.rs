// Issue store benchmarks.
//
// Run with: cargo bench
//
// Performance Targets:
// | Operation           | Target    | Description                        |
// |---------------------|-----------|------------------------------------|
// | Create              | < 5us     | Single issue creation              |
// | Update              | < 5us     | Partial update of one issue        |
// | List (1k)           | < 1ms     | Snapshot + paginate 1000 issues    |
// | List (10k)          | < 10ms    | Snapshot + paginate 10000 issues   |
// | List filtered+sort  | < 15ms    | Search, filter and sort 10k issues |

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use issue_tracker::model::{IssueUpdate, NewIssue, Patch, Priority, Status};
use issue_tracker::storage::{IssueStore, ListFilters, ListQuery};
use std::hint::black_box;
use std::sync::Once;
use std::time::Instant;
use tracing::info;

/// Build a creation payload for the given index.
fn create_test_issue(i: usize) -> NewIssue {
    let new = NewIssue::new(format!("Benchmark issue {i}"))
        .with_description(format!("Description for benchmark issue {i}"))
        .with_status(Status::ALL[i % Status::ALL.len()])
        .with_priority(Priority::ALL[i % Priority::ALL.len()]);
    if i % 3 == 0 {
        new.with_assignee(format!("user{}", i % 10))
    } else {
        new
    }
}

fn init_bench_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = issue_tracker::logging::init_logging(0, false, None);
    });
}

fn log_group_start(name: &str) {
    info!("benchmark_group_start: name={name}");
}

fn log_group_end(name: &str) {
    info!("benchmark_group_end: name={name}");
}

fn log_bench_start(name: &str) -> Instant {
    info!("benchmark_start: {name}");
    Instant::now()
}

fn log_bench_end(name: &str, started_at: Instant) {
    info!("benchmark_end: {name} duration={:?}", started_at.elapsed());
}

fn setup_store_with_issues(count: usize) -> IssueStore {
    let store = IssueStore::new();
    for i in 0..count {
        store.create(create_test_issue(i));
    }
    store
}

fn bench_create_single(c: &mut Criterion) {
    init_bench_logging();
    let group_name = "storage/create";
    log_group_start(group_name);
    let mut group = c.benchmark_group(group_name);

    group.bench_function("single", |b| {
        let bench_name = "storage/create/single";
        let bench_start = log_bench_start(bench_name);
        let store = IssueStore::new();
        let mut counter = 0usize;

        b.iter(|| {
            black_box(store.create(create_test_issue(counter)));
            counter += 1;
        });
        log_bench_end(bench_name, bench_start);
    });

    group.finish();
    log_group_end(group_name);
}

fn bench_update_issue(c: &mut Criterion) {
    init_bench_logging();
    let group_name = "storage/update";
    log_group_start(group_name);
    let mut group = c.benchmark_group(group_name);
    let store = setup_store_with_issues(1_000);

    group.bench_function("single", |b| {
        let bench_name = "storage/update/single";
        let bench_start = log_bench_start(bench_name);
        let mut counter = 0u64;

        b.iter(|| {
            let update = IssueUpdate {
                title: Patch::Value(format!("Updated title {counter}")),
                status: Patch::Value(Status::InProgress),
                ..Default::default()
            };
            black_box(store.update(counter % 1_000 + 1, black_box(&update)));
            counter += 1;
        });
        log_bench_end(bench_name, bench_start);
    });

    group.finish();
    log_group_end(group_name);
}

fn bench_list_issues(c: &mut Criterion) {
    init_bench_logging();
    let group_name = "storage/list";
    log_group_start(group_name);
    let mut group = c.benchmark_group(group_name);

    for size in [100usize, 1_000, 10_000] {
        let store = setup_store_with_issues(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &store, |b, store| {
            let query = ListQuery::new();
            b.iter(|| black_box(store.list(black_box(&query))));
        });
    }

    group.finish();
    log_group_end(group_name);
}

fn bench_list_filtered_sorted(c: &mut Criterion) {
    init_bench_logging();
    let group_name = "storage/list_filtered";
    log_group_start(group_name);
    let mut group = c.benchmark_group(group_name);
    let store = setup_store_with_issues(10_000);

    group.bench_function("search_status_sort", |b| {
        let bench_name = "storage/list_filtered/search_status_sort";
        let bench_start = log_bench_start(bench_name);
        let query = ListQuery::new()
            .with_filters(ListFilters {
                search: Some("issue 1".to_string()),
                status: Some(Status::Open),
                ..Default::default()
            })
            .with_sort("priority", Some("asc"))
            .with_page(2, 25);

        b.iter(|| black_box(store.list(black_box(&query))));
        log_bench_end(bench_name, bench_start);
    });

    group.finish();
    log_group_end(group_name);
}

criterion_group!(
    storage_benches,
    bench_create_single,
    bench_update_issue,
    bench_list_issues,
    bench_list_filtered_sorted,
);

criterion_main!(storage_benches);
