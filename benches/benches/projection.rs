// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for flattening and per-pointer-move projection.
//!
//! Run with: cargo bench -p understory_sortable_tree_benches

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use understory_sortable_tree::{
    DropIntent, ExpandAll, TreeNode, classify, commit, flatten, project, remove_descendants_of,
};

/// `groups` top-level nodes, each with `per_group` children that each have
/// two leaves.
fn make_forest(groups: u32, per_group: u32) -> Vec<TreeNode<u32>> {
    let mut next = 0;
    let mut id = || {
        next += 1;
        next
    };
    (0..groups)
        .map(|_| {
            let group = id();
            let children = (0..per_group)
                .map(|_| {
                    let child = id();
                    TreeNode::new(child, vec![TreeNode::leaf(id()), TreeNode::leaf(id())])
                })
                .collect();
            TreeNode::new(group, children)
        })
        .collect()
}

fn bench_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("sortable_tree/flatten");
    for groups in [10, 100, 1_000] {
        let forest = make_forest(groups, 8);
        group.bench_with_input(BenchmarkId::new("expand_all", groups), &forest, |b, f| {
            b.iter(|| black_box(flatten(f, &ExpandAll)));
        });
    }
    group.finish();
}

fn bench_project(c: &mut Criterion) {
    let mut group = c.benchmark_group("sortable_tree/project");
    for groups in [10, 100, 1_000] {
        let forest = make_forest(groups, 8);
        let full = flatten(&forest, &ExpandAll);
        let active = full[full.len() / 2].id;
        let rows = remove_descendants_of(&full, &[active]);
        let over = rows[rows.len() / 4].id;
        group.bench_with_input(BenchmarkId::new("project", groups), &rows, |b, rows| {
            b.iter(|| black_box(project(rows, active, over, black_box(73.0), 50.0)));
        });
        group.bench_with_input(BenchmarkId::new("classify", groups), &rows, |b, rows| {
            b.iter(|| black_box(classify(rows, active, over, black_box(1))));
        });
    }
    group.finish();
}

fn bench_commit(c: &mut Criterion) {
    let mut group = c.benchmark_group("sortable_tree/commit");
    for groups in [10, 100, 1_000] {
        let forest = make_forest(groups, 8);
        let first = forest[0].id;
        let last = forest[forest.len() - 1].id;
        group.bench_with_input(BenchmarkId::new("nest", groups), &forest, |b, f| {
            b.iter(|| black_box(commit(f, last, DropIntent::NestUnder(first))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_flatten, bench_project, bench_commit);
criterion_main!(benches);
