use chrono::NaiveDate;
use collabnet::model::{DetailLevel, PersonStatus, ProjectRecord};
use collabnet::{infer_tenure, CollaborationNetworkBuilder, OverlapCalculator};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

/// Synthetic rosters: `people` members spread over `people / 4` projects
fn dataset(people: usize) -> (Vec<ProjectRecord>, Vec<PersonStatus>) {
    let base = NaiveDate::from_ymd_opt(2008, 1, 1).unwrap();
    let groups = ["affective", "viral", "mediated", "tangible"];
    let projects = (people / 4).max(1);

    let mut records = Vec::with_capacity(people * 2);
    let mut statuses = Vec::with_capacity(people);
    for i in 0..people {
        let id = format!("person{}", i);
        let start = base + chrono::Duration::days((i * 17 % 3000) as i64);
        let end = if i % 3 == 0 {
            None
        } else {
            Some(start + chrono::Duration::days((200 + i * 31 % 1500) as i64))
        };
        for k in 0..2 {
            let slug = format!("project{}", (i + k * 7) % projects);
            records.push(ProjectRecord::new(slug, id.clone()).with_dates(Some(start), end));
        }
        statuses.push(PersonStatus::new(id, i % 11 == 0, Some(groups[i % groups.len()])));
    }
    (records, statuses)
}

/// Benchmark co-membership aggregation
fn bench_network_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("network_build");

    for size in [100, 1000, 10_000].iter() {
        let (records, _) = dataset(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let net = CollaborationNetworkBuilder::new(DetailLevel::Counts).build(&records);
                criterion::black_box(net.serialize());
            });
        });
    }
    group.finish();
}

/// Benchmark tenure inference (fit + predict)
fn bench_tenure_inference(c: &mut Criterion) {
    let mut group = c.benchmark_group("tenure_inference");
    let reference = NaiveDate::from_ymd_opt(2019, 6, 1).unwrap();

    for size in [100, 1000, 10_000].iter() {
        let (records, statuses) = dataset(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let table = infer_tenure(&records, &statuses, reference).unwrap();
                criterion::black_box(table.len());
            });
        });
    }
    group.finish();
}

/// Benchmark pairwise overlap, sequential vs rayon
fn bench_overlap(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlap");
    let reference = NaiveDate::from_ymd_opt(2019, 6, 1).unwrap();

    for size in [100, 500].iter() {
        let (records, statuses) = dataset(*size);
        let table = infer_tenure(&records, &statuses, reference).unwrap();
        for parallel in [false, true] {
            let id = BenchmarkId::new(if parallel { "parallel" } else { "sequential" }, size);
            group.bench_with_input(id, size, |b, _| {
                b.iter(|| {
                    let edges = OverlapCalculator::new(&table).parallel(parallel).compute_all();
                    criterion::black_box(edges.len());
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_network_build, bench_tenure_inference, bench_overlap);
criterion_main!(benches);
