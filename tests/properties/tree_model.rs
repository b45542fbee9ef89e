//! Property tests for tree navigation.

use proptest::prelude::*;

use repolens::{SelectionEvent, TreeModel, TreeNode};

#[derive(Debug, Clone)]
enum Shape {
    File(String),
    Dir(String, Vec<Shape>),
}

#[derive(Debug, Clone)]
enum Op {
    Toggle(usize),
    Select(usize),
    SelectUnknown,
    ExpandAll,
    CollapseAll,
    Clear,
}

fn shape() -> impl Strategy<Value = Shape> {
    let leaf = "[a-z]{1,6}(\\.rs|\\.md|\\.json)?".prop_map(Shape::File);
    leaf.prop_recursive(4, 48, 5, |inner| {
        ("[a-z]{1,6}", proptest::collection::vec(inner, 0..5))
            .prop_map(|(name, children)| Shape::Dir(name, children))
    })
}

/// Sibling names get their index as a prefix so paths stay unique.
fn materialize(shapes: &[Shape], prefix: &str) -> Vec<TreeNode> {
    shapes
        .iter()
        .enumerate()
        .map(|(i, shape)| {
            let (base, children) = match shape {
                Shape::File(name) => (name, None),
                Shape::Dir(name, children) => (name, Some(children)),
            };
            let name = format!("{i}-{base}");
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}/{name}")
            };
            match children {
                None => TreeNode::file(name, path),
                Some(children) => {
                    let children = materialize(children, &path);
                    TreeNode::directory(name, path, children)
                }
            }
        })
        .collect()
}

fn forest() -> impl Strategy<Value = Vec<TreeNode>> {
    proptest::collection::vec(shape(), 0..6).prop_map(|shapes| materialize(&shapes, ""))
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<usize>().prop_map(Op::Toggle),
        4 => any::<usize>().prop_map(Op::Select),
        1 => Just(Op::SelectUnknown),
        1 => Just(Op::ExpandAll),
        1 => Just(Op::CollapseAll),
        1 => Just(Op::Clear),
    ]
}

fn all_paths(tree: &TreeModel) -> Vec<String> {
    tree.iter().map(|n| n.path.to_string()).collect()
}

fn visible_paths(tree: &TreeModel) -> Vec<String> {
    tree.visible().map(|n| n.path.to_string()).collect()
}

fn apply(tree: &mut TreeModel, paths: &[String], op: &Op) {
    let pick = |i: usize| paths.get(i % paths.len().max(1)).cloned();
    match op {
        Op::Toggle(i) => {
            if let Some(path) = pick(*i) {
                tree.toggle(&path);
            }
        }
        Op::Select(i) => {
            if let Some(path) = pick(*i) {
                tree.select(&path);
            }
        }
        Op::SelectUnknown => {
            assert_eq!(tree.select("\u{0}not-in-listing"), None);
        }
        Op::ExpandAll => {
            tree.expand_all();
        }
        Op::CollapseAll => {
            tree.collapse_all();
        }
        Op::Clear => {
            tree.clear_selection();
        }
    }
}

/// Paths whose every ancestor is expanded, computed from the full walk
fn expected_visible(tree: &TreeModel) -> Vec<String> {
    let mut expected = Vec::new();
    let mut hidden_below: Option<usize> = None;
    for node in tree.iter() {
        if let Some(depth) = hidden_below {
            if node.depth > depth {
                continue;
            }
            hidden_below = None;
        }
        expected.push(node.path.to_string());
        if node.is_directory() && !node.expanded {
            hidden_below = Some(node.depth);
        }
    }
    expected
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the full walk covers every node exactly once.
    #[test]
    fn property_iter_covers_every_node(nodes in forest()) {
        let tree = TreeModel::build(&nodes).unwrap();
        let paths = all_paths(&tree);
        prop_assert_eq!(paths.len(), tree.len());
        for path in &paths {
            prop_assert!(tree.contains(path));
        }
    }

    /// PROPERTY: a node is visible exactly when all its ancestors are expanded,
    /// whatever sequence of operations ran before.
    #[test]
    fn property_visible_matches_expand_state(
        nodes in forest(),
        ops in proptest::collection::vec(op(), 0..40),
    ) {
        let mut tree = TreeModel::build(&nodes).unwrap();
        let paths = all_paths(&tree);
        for op in &ops {
            apply(&mut tree, &paths, op);
            prop_assert_eq!(visible_paths(&tree), expected_visible(&tree));
        }
    }

    /// PROPERTY: toggling a directory twice restores every visible row.
    #[test]
    fn property_toggle_is_an_involution(
        nodes in forest(),
        ops in proptest::collection::vec(op(), 0..20),
        index in any::<usize>(),
    ) {
        let mut tree = TreeModel::build(&nodes).unwrap();
        let paths = all_paths(&tree);
        for op in &ops {
            apply(&mut tree, &paths, op);
        }
        prop_assume!(!paths.is_empty());
        let path = &paths[index % paths.len()];

        let before: Vec<(String, bool)> = tree
            .iter()
            .map(|n| (n.path.to_string(), n.expanded))
            .collect();

        match tree.toggle(path) {
            Some(first) => {
                prop_assert_eq!(tree.toggle(path), Some(!first));
            }
            None => {
                prop_assert!(!tree.get(path).unwrap().is_directory());
            }
        }

        let after: Vec<(String, bool)> = tree
            .iter()
            .map(|n| (n.path.to_string(), n.expanded))
            .collect();
        prop_assert_eq!(before, after);
    }

    /// PROPERTY: the selection is always a file, and only file activation
    /// changes it.
    #[test]
    fn property_selection_is_always_a_file(
        nodes in forest(),
        ops in proptest::collection::vec(op(), 0..40),
    ) {
        let mut tree = TreeModel::build(&nodes).unwrap();
        let paths = all_paths(&tree);
        for op in &ops {
            let previous = tree.selected().map(str::to_string);
            if let Op::Select(i) = op {
                if let Some(path) = paths.get(i % paths.len().max(1)) {
                    match tree.select(path) {
                        Some(SelectionEvent::FileSelected { path: selected }) => {
                            prop_assert_eq!(tree.selected(), Some(selected.as_str()));
                        }
                        Some(SelectionEvent::DirectoryToggled { .. }) => {
                            prop_assert_eq!(tree.selected().map(str::to_string), previous);
                        }
                        None => prop_assert!(false, "known path {} was ignored", path),
                    }
                }
            } else {
                apply(&mut tree, &paths, op);
            }

            if let Some(selected) = tree.selected() {
                prop_assert!(!tree.get(selected).unwrap().is_directory());
            }
        }
    }

    /// PROPERTY: building never panics on arbitrary JSON listings.
    #[test]
    fn property_build_never_panics(input in "(?s).{0,256}") {
        if let Ok(nodes) = serde_json::from_str::<Vec<TreeNode>>(&input) {
            let _ = TreeModel::build(&nodes);
        }
    }
}
