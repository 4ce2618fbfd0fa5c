// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-and-drop reordering of a nested list, driven by scripted input.
//!
//! This example walks through:
//! - flattening a forest with some nodes collapsed,
//! - a pointer drag that nests a row under a collapsed node,
//! - a keyboard drag that outdents a row,
//! - a drop that would put a node inside its own subtree.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_sortable_tree_demos --example drag_reorder`

use std::collections::HashSet;

use kurbo::Vec2;
use tracing_subscriber::EnvFilter;
use understory_sortable_tree::{
    DragState, DropIntent, FlatNode, Nudge, TreeNode, commit, flatten, remove_descendants_of,
};

fn print_rows(title: &str, rows: &[FlatNode<&str>]) {
    println!("{title}");
    for row in rows {
        let marker = match (row.has_children, row.collapsed) {
            (true, true) => '+',
            (true, false) => '-',
            (false, _) => ' ',
        };
        println!("  {}{marker} {}", "    ".repeat(row.depth), row.id);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut tree = vec![
        TreeNode::new(
            "groceries",
            vec![
                TreeNode::leaf("milk"),
                TreeNode::new("fruit", vec![TreeNode::leaf("apples"), TreeNode::leaf("pears")]),
            ],
        ),
        TreeNode::new("hardware", vec![TreeNode::leaf("screws")]),
        TreeNode::leaf("bread"),
    ];
    let mut expanded: HashSet<&str> = ["groceries"].into_iter().collect();
    print_rows("initial", &flatten(&tree, &expanded));

    // Pointer: drag "bread" up over "hardware" and 110px right. The row lands
    // inside the collapsed "fruit" group, which the plan asks to open.
    let mut drag = DragState::new();
    drag.on_start("bread");
    let rows = remove_descendants_of(&flatten(&tree, &expanded), &["bread"]);
    drag.on_over("hardware");
    drag.on_move(Vec2::new(110.0, -20.0));
    if let Some(preview) = drag.preview(&rows) {
        println!(
            "preview: depth {} under {:?} -> {:?}",
            preview.projection.depth, preview.projection.parent, preview.plan
        );
    }
    match drag.on_drop(&tree, &rows, &expanded) {
        Ok(outcome) => {
            if let Some(id) = outcome.expand {
                expanded.insert(id);
            }
            println!("moved: {:?}", outcome.change);
            tree = outcome.tree;
        }
        Err(rejected) => println!("rejected: {rejected}"),
    }
    print_rows("after pointer drag", &flatten(&tree, &expanded));

    // Keyboard: pick "bread" up again and outdent it one level, next to "fruit".
    drag.on_start("bread");
    let rows = remove_descendants_of(&flatten(&tree, &expanded), &["bread"]);
    if drag.nudge(&rows, Nudge::Shallower) {
        if let Ok(outcome) = drag.on_drop(&tree, &rows, &expanded) {
            assert_eq!(outcome.intent, DropIntent::InsertAfter("fruit"));
            tree = outcome.tree;
        }
    } else {
        drag.on_cancel();
    }
    print_rows("after keyboard outdent", &flatten(&tree, &expanded));

    // A drop that would nest "groceries" under its own descendant is refused
    // and the tree stays as it was.
    let before = tree.clone();
    let refused = commit(&tree, "groceries", DropIntent::NestUnder("milk"));
    println!("nest groceries under milk: {refused:?}");
    assert_eq!(tree, before);
}
