//! Dispatch Performance Benchmarks
//!
//! - Reducer execution in isolation (append vs. passthrough)
//! - Store dispatch throughput with and without subscribers
//! - Cost of appending to a large list
//!
//! Run with: `cargo bench`

#![allow(missing_docs)] // Benchmarks don't need extensive docs
#![allow(clippy::unwrap_used)] // Benchmarks can unwrap for setup

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use reflux_core::reducer::Reducer;
use reflux_macros::Action;
use reflux_runtime::Store;
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
struct BenchState {
    items: Arc<Vec<String>>,
}

#[derive(Action, Clone, Debug)]
enum BenchAction {
    AddItem { text: String },
    NoOp,
}

struct BenchReducer;

impl Reducer for BenchReducer {
    type State = BenchState;
    type Action = BenchAction;

    fn init(&self) -> BenchState {
        BenchState::default()
    }

    fn reduce(&self, state: &Arc<BenchState>, action: &BenchAction) -> Arc<BenchState> {
        match action {
            BenchAction::AddItem { text } => {
                let mut items = Vec::with_capacity(state.items.len() + 1);
                items.extend(state.items.iter().cloned());
                items.push(text.clone());
                Arc::new(BenchState {
                    items: Arc::new(items),
                })
            },
            BenchAction::NoOp => Arc::clone(state),
        }
    }
}

fn state_with(len: usize) -> BenchState {
    BenchState {
        items: Arc::new((0..len).map(|i| format!("item {i}")).collect()),
    }
}

/// Benchmark reducer execution in isolation (no Store overhead)
fn benchmark_reducer_execution(c: &mut Criterion) {
    let mut group = c.benchmark_group("reducer");
    group.throughput(Throughput::Elements(1));

    let state = Arc::new(state_with(8));

    group.bench_function("add_item", |b| {
        let action = BenchAction::AddItem {
            text: "buy groceries".to_string(),
        };
        b.iter(|| BenchReducer.reduce(black_box(&state), black_box(&action)));
    });

    group.bench_function("passthrough", |b| {
        b.iter(|| BenchReducer.reduce(black_box(&state), black_box(&BenchAction::NoOp)));
    });

    group.finish();
}

/// Benchmark Store dispatch throughput (actions/sec)
fn benchmark_store_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_dispatch");
    group.throughput(Throughput::Elements(1));

    group.bench_function("passthrough_no_subscribers", |b| {
        let store = Store::new(BenchReducer);
        b.iter(|| store.dispatch(black_box(BenchAction::NoOp)).unwrap());
    });

    for subscribers in [1_usize, 8, 64] {
        group.bench_function(format!("passthrough_{subscribers}_subscribers"), |b| {
            let store = Store::new(BenchReducer);
            for _ in 0..subscribers {
                let _ = store.subscribe(|| {});
            }
            b.iter(|| store.dispatch(black_box(BenchAction::NoOp)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark append cost against list length
fn benchmark_append_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("append_scaling");
    group.throughput(Throughput::Elements(1));

    for len in [0_usize, 100, 10_000] {
        group.bench_function(format!("dispatch_add_item_len_{len}"), |b| {
            b.iter_batched(
                || Store::with_state(BenchReducer, state_with(len)),
                |store| {
                    store
                        .dispatch(BenchAction::AddItem {
                            text: "watch baseball".to_string(),
                        })
                        .unwrap();
                    store
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_reducer_execution,
    benchmark_store_dispatch,
    benchmark_append_scaling,
);
criterion_main!(benches);
