//! Tests for listings, tree rendering and summaries

use rscomposite::application::{filesystem_example, listing, summary, to_tree, Measure};
use rscomposite::domain::{ComponentArena, DEFAULT_MAX_DEPTH};

#[test]
fn given_folder_when_listing_then_prints_children_and_total() {
    // Arrange
    let example = filesystem_example(DEFAULT_MAX_DEPTH).unwrap();

    // Act
    let lines = listing(example.fs.arena(), example.docs, &Measure::size("bytes")).unwrap();

    // Assert
    assert_eq!(
        lines,
        vec![
            "docs contains:",
            "- a.txt | Size: 500 bytes",
            "- b.txt | Size: 800 bytes",
            "Total Size: 1300 bytes",
        ]
    );
}

#[test]
fn given_leaf_when_listing_then_errors() {
    let mut arena = ComponentArena::new();
    let file = arena.new_leaf("file", 1.0).unwrap();

    assert!(listing(&arena, file, &Measure::size("bytes")).is_err());
}

#[test]
fn given_nested_tree_when_rendering_then_labels_carry_subtree_weights() {
    // Arrange
    let example = filesystem_example(DEFAULT_MAX_DEPTH).unwrap();

    // Act
    let rendered = to_tree(
        example.fs.arena(),
        example.fs.root(),
        &Measure::size("bytes"),
        true,
    )
    .unwrap()
    .to_string();

    // Assert
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 5, "unexpected rendering:\n{}", rendered);
    assert_eq!(lines[0], "root (2500 bytes)");
    assert!(lines[1].ends_with("docs (1300 bytes)"));
    assert!(lines[2].ends_with("a.txt (500 bytes)"));
    assert!(lines[3].ends_with("b.txt (800 bytes)"));
    assert!(lines[4].ends_with("c.txt (1200 bytes)"));
}

#[test]
fn given_weights_hidden_when_rendering_then_only_names_are_printed() {
    let example = filesystem_example(DEFAULT_MAX_DEPTH).unwrap();

    let rendered = to_tree(
        example.fs.arena(),
        example.fs.root(),
        &Measure::size("bytes"),
        false,
    )
    .unwrap()
    .to_string();

    assert!(rendered.starts_with("root\n"));
    assert!(!rendered.contains("bytes"));
}

#[test]
fn given_shared_subtree_when_rendering_then_it_appears_under_each_parent() {
    let mut arena = ComponentArena::new();
    let root = arena.new_container("root");
    let left = arena.new_container("left");
    let right = arena.new_container("right");
    let shared = arena.new_leaf("shared", 4.0).unwrap();
    arena.insert(left, shared).unwrap();
    arena.insert(right, shared).unwrap();
    arena.insert(root, left).unwrap();
    arena.insert(root, right).unwrap();

    let rendered = to_tree(&arena, root, &Measure::salary(""), true)
        .unwrap()
        .to_string();

    assert_eq!(rendered.matches("shared (4)").count(), 2);
    assert!(rendered.starts_with("root (8)"));
}

#[test]
fn given_tree_when_summarizing_then_counts_shape_and_total() {
    let example = filesystem_example(DEFAULT_MAX_DEPTH).unwrap();

    let s = summary(example.fs.arena(), example.fs.root()).unwrap();

    assert_eq!(s.name, "root");
    assert_eq!(s.leaves, 3);
    assert_eq!(s.containers, 2);
    assert_eq!(s.depth, 3);
    assert_eq!(s.total.value(), 2500.0);
}
