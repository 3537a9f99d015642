//! Tests for DirectoryScanner

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use rscomposite::application::summary;
use rscomposite::infrastructure::{DirectoryScanner, InfraError};

fn create_file(dir: &TempDir, name: &str, size: usize) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok();
    }
    fs::write(&path, vec![b'x'; size]).expect("write file");
    path
}

#[test]
fn given_directory_with_files_when_scanning_then_sizes_add_up() {
    // Arrange
    let temp = TempDir::new().unwrap();
    create_file(&temp, "docs/a.txt", 500);
    create_file(&temp, "docs/b.txt", 800);
    create_file(&temp, "c.txt", 1200);

    // Act
    let tree = DirectoryScanner::default().scan(temp.path()).unwrap();

    // Assert
    assert_eq!(tree.total_size().unwrap().value(), 2500.0);
    let docs = tree.arena().find_by_name(tree.root(), "docs").unwrap();
    assert_eq!(tree.size(docs).unwrap().value(), 1300.0);
}

#[test]
fn given_directory_when_scanning_then_children_are_sorted_by_name() {
    let temp = TempDir::new().unwrap();
    create_file(&temp, "zeta.txt", 1);
    create_file(&temp, "alpha.txt", 1);
    create_file(&temp, "mid/inner.txt", 1);

    let tree = DirectoryScanner::default().scan(temp.path()).unwrap();

    let names: Vec<_> = tree
        .arena()
        .children(tree.root())
        .unwrap()
        .iter()
        .map(|&c| tree.arena().name(c).unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["alpha.txt", "mid", "zeta.txt"]);
}

#[test]
fn given_empty_subdirectory_when_scanning_then_it_is_an_empty_folder() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("empty")).unwrap();

    let tree = DirectoryScanner::default().scan(temp.path()).unwrap();

    let s = summary(tree.arena(), tree.root()).unwrap();
    assert_eq!(s.containers, 2);
    assert_eq!(s.leaves, 0);
    assert_eq!(s.total.value(), 0.0);
}

#[test]
fn given_tree_deeper_than_limit_when_scanning_then_errors() {
    let temp = TempDir::new().unwrap();
    create_file(&temp, "a/b/c/d.txt", 1);

    // root/a/b/c/d.txt has height 5
    let result = DirectoryScanner::new(4).scan(temp.path());

    assert!(result.is_err());
    assert!(DirectoryScanner::new(5).scan(temp.path()).is_ok());
}

#[test]
fn given_nonexistent_directory_when_scanning_then_errors() {
    let temp = TempDir::new().unwrap();

    let result = DirectoryScanner::default().scan(&temp.path().join("missing"));

    assert!(matches!(result, Err(InfraError::Scan { .. })));
}

#[test]
fn given_file_path_when_scanning_then_errors() {
    let temp = TempDir::new().unwrap();
    let file = create_file(&temp, "plain.txt", 3);

    let result = DirectoryScanner::default().scan(&file);

    assert!(matches!(result, Err(InfraError::Scan { .. })));
}

#[cfg(unix)]
#[test]
fn given_symlink_when_scanning_then_it_is_skipped() {
    let temp = TempDir::new().unwrap();
    let target = create_file(&temp, "real.txt", 10);
    std::os::unix::fs::symlink(&target, temp.path().join("link.txt")).unwrap();

    let tree = DirectoryScanner::default().scan(temp.path()).unwrap();

    assert_eq!(tree.total_size().unwrap().value(), 10.0);
    assert!(tree.arena().find_by_name(tree.root(), "link.txt").is_none());
}
