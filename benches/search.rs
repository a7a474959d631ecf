//! Performance benchmarks for the witness search.
//!
//! Run with: `cargo bench --bench search`
//!
//! ## Performance Targets
//!
//! | Operation | Target | Notes |
//! |-----------|--------|-------|
//! | Linear propagation | O(nodes) | One improvement per node |
//! | Branching propagation | O(edges) | Fan-out dominated |
//! | Reconstruction | O(path length) | Per sink |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use npd_witness_kernel::graph::memory::{InMemoryVfg, NodeOp, StoredValue};
use npd_witness_kernel::WitnessSearch;

fn null_store() -> NodeOp {
    NodeOp::Store {
        value: StoredValue::NullConstant,
    }
}

/// A store feeding a load, then a long copy pipeline into a final load.
fn build_linear_graph(n: usize) -> InMemoryVfg {
    let mut g = InMemoryVfg::new();
    let s = g.add_node(null_store());
    let l1 = g.add_node(NodeOp::Load);
    g.add_edge(s, l1);

    let mut prev = l1;
    for _ in 0..n {
        let c = g.add_node(NodeOp::Copy);
        g.add_edge(prev, c);
        prev = c;
    }

    let l2 = g.add_node(NodeOp::Load);
    g.add_edge(prev, l2);
    g
}

/// Many independent store→load chains merging into one phi, then a load.
fn build_branching_graph(branches: usize) -> InMemoryVfg {
    let mut g = InMemoryVfg::new();
    let m = g.add_node(NodeOp::Phi { arity: branches });
    let sink = g.add_node(NodeOp::Load);
    g.add_edge(m, sink);

    for _ in 0..branches {
        let s = g.add_node(null_store());
        let l = g.add_node(NodeOp::Load);
        g.add_edge(s, l);
        g.add_edge(l, m);
    }
    g
}

fn bench_linear(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear_propagation");

    for size in [100usize, 1_000, 10_000] {
        let g = build_linear_graph(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &g, |b, g| {
            b.iter(|| {
                let search = WitnessSearch::new(g, g);
                black_box(search.find_paths().unwrap())
            });
        });
    }

    group.finish();
}

fn bench_branching(c: &mut Criterion) {
    let mut group = c.benchmark_group("branching_propagation");

    for branches in [10usize, 100, 1_000] {
        let g = build_branching_graph(branches);
        group.throughput(Throughput::Elements(branches as u64));
        group.bench_with_input(BenchmarkId::from_parameter(branches), &g, |b, g| {
            b.iter(|| {
                let search = WitnessSearch::new(g, g);
                black_box(search.find_paths().unwrap())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_linear, bench_branching);
criterion_main!(benches);
