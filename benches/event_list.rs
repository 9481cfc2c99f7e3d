use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use onthisday_explorer::feed::{FeedCategory, parse_feed};
use onthisday_explorer::listing::EventListState;
use onthisday_explorer::models::HistoricalEvent;
use serde_json::json;

/// Synthetic events with varied descriptions
fn generate_events(num_events: usize) -> Vec<HistoricalEvent> {
    let roles = [
        "mathematician",
        "painter",
        "composer",
        "physicist",
        "novelist",
        "politician",
        "astronomer",
        "footballer",
    ];

    (0..num_events)
        .map(|i| {
            let role = roles[i % roles.len()];
            HistoricalEvent::new(format!("Person {}, notable {} and author", i, role), 1500 + (i % 500) as i32)
        })
        .collect()
}

fn feed_body(num_events: usize) -> Vec<u8> {
    let items: Vec<_> = generate_events(num_events)
        .into_iter()
        .map(|e| json!({ "text": e.text, "year": e.year, "pages": [{ "title": "x" }] }))
        .collect();
    json!({ "births": items }).to_string().into_bytes()
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for size in [100, 1_000, 10_000].iter() {
        let mut state = EventListState::new(10);
        state.set_raw_events(generate_events(*size));

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("set_term_and_page", size), size, |b, _| {
            b.iter(|| {
                state.set_search_term(black_box("physicist"));
                black_box(state.visible_page().len());
                black_box(state.page_count())
            });
        });
    }

    group.finish();
}

fn bench_paging(c: &mut Criterion) {
    let mut group = c.benchmark_group("paging");

    for size in [1_000, 10_000].iter() {
        let mut state = EventListState::new(10);
        state.set_raw_events(generate_events(*size));
        state.set_search_term("composer");

        group.bench_with_input(BenchmarkId::new("walk_all_pages", size), size, |b, _| {
            b.iter(|| {
                while state.next_page() {
                    black_box(state.visible_page());
                }
                while state.prev_page() {}
            });
        });
    }

    group.finish();
}

fn bench_parse_feed(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_feed");

    for size in [100, 1_000].iter() {
        let body = feed_body(*size);

        group.throughput(Throughput::Bytes(body.len() as u64));
        group.bench_with_input(BenchmarkId::new("births", size), size, |b, _| {
            b.iter(|| parse_feed(black_box(&body), FeedCategory::Births).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_search, bench_paging, bench_parse_feed);
criterion_main!(benches);
