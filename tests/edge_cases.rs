//! Edge case and error handling tests for treedump


use harness::{TestTree, run_treedump};
use std::fs;
#[cfg(unix)]
use std::os::unix::fs::{PermissionsExt, symlink};

/// Strip all permissions from `path`. Returns false when the directory stays
/// readable anyway (running as root), so the caller can skip.
#[cfg(unix)]
fn lock(path: &std::path::Path) -> bool {
    fs::set_permissions(path, fs::Permissions::from_mode(0o000)).expect("Failed to set permissions");
    if fs::read_dir(path).is_ok() {
        unlock(path);
        return false;
    }
    true
}

#[cfg(unix)]
fn unlock(path: &std::path::Path) {
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).expect("Failed to restore permissions");
}

// ============================================================================
// Symlink Edge Cases
// ============================================================================

#[test]
#[cfg(unix)]
fn test_symlink_to_file_is_dumped() {
    let tree = TestTree::new();
    tree.add_file("target.txt", "target");
    symlink(tree.path().join("target.txt"), tree.path().join("link.txt")).expect("Failed to create symlink");

    let (stdout, _stderr, success) = run_treedump(tree.path(), &["dump", ".", "-o", "-"]);
    assert!(success);
    assert!(stdout.contains("link.txt\n```\ntarget\n```"), "got: {}", stdout);
    assert!(stdout.contains("target.txt\n```\ntarget\n```"), "got: {}", stdout);
}

#[test]
#[cfg(unix)]
fn test_symlink_to_parent_no_infinite_loop() {
    let tree = TestTree::new();
    tree.add_file("subdir/file.txt", "x");
    symlink("..", tree.path().join("subdir").join("parent")).expect("Failed to create parent symlink");

    let (stdout, _stderr, success) = run_treedump(tree.path(), &["tree", "subdir"]);
    assert!(success, "should not hang on parent symlink");
    assert_eq!(stdout, "└── subdir\n    ├── parent\n    └── file.txt\n");

    let (stdout, _stderr, success) = run_treedump(tree.path(), &["dump", ".", "-o", "-"]);
    assert!(success);
    assert_eq!(stdout, "subdir/file.txt\n```\nx\n```\n\n");
}

#[test]
#[cfg(unix)]
fn test_broken_symlink_is_reported_not_fatal() {
    let tree = TestTree::new();
    tree.add_file("real.txt", "real");
    symlink("nonexistent.txt", tree.path().join("broken.txt")).expect("Failed to create broken symlink");

    let (stdout, stderr, success) = run_treedump(tree.path(), &["dump", ".", "-o", "-"]);
    assert!(success, "broken symlinks are per-entry failures");
    assert_eq!(stdout, "real.txt\n```\nreal\n```\n\n");
    assert!(stderr.contains("error: skipped"), "got: {}", stderr);
}

// ============================================================================
// Permission Error Handling
// ============================================================================

#[test]
#[cfg(unix)]
fn test_unreadable_directory_in_tree() {
    let tree = TestTree::new();
    tree.add_file("locked/secret.txt", "");
    tree.add_file("open/visible.txt", "");
    let locked = tree.path().join("locked");
    if !lock(&locked) {
        return;
    }

    let (stdout, _stderr, success) = run_treedump(tree.path(), &["tree", "locked", "open"]);
    unlock(&locked);

    assert!(success, "unreadable directories are not fatal");
    assert_eq!(
        stdout,
        "├── locked\n│   └── [permission denied]\n└── open\n    └── visible.txt\n"
    );
}

#[test]
#[cfg(unix)]
fn test_unreadable_directory_in_dump() {
    let tree = TestTree::new();
    tree.add_file("locked/secret.txt", "secret");
    tree.add_file("open/visible.txt", "visible");
    let locked = tree.path().join("locked");
    if !lock(&locked) {
        return;
    }

    let (stdout, stderr, success) = run_treedump(tree.path(), &["dump", ".", "-o", "-"]);
    unlock(&locked);

    assert!(success);
    assert_eq!(stdout, "open/visible.txt\n```\nvisible\n```\n\n");
    assert!(stderr.contains("cannot read directory"), "got: {}", stderr);
}

#[test]
#[cfg(unix)]
fn test_unreadable_file_is_skipped() {
    let tree = TestTree::new();
    let secret = tree.add_file("secret.txt", "secret");
    tree.add_file("visible.txt", "visible");
    fs::set_permissions(&secret, fs::Permissions::from_mode(0o000)).expect("Failed to set permissions");
    if fs::read(&secret).is_ok() {
        return;
    }

    let (stdout, stderr, success) = run_treedump(tree.path(), &["dump", ".", "-o", "-"]);
    assert!(success);
    assert_eq!(stdout, "visible.txt\n```\nvisible\n```\n\n");
    assert!(stderr.contains("cannot read"), "got: {}", stderr);
}

// ============================================================================
// File Content Edge Cases
// ============================================================================

#[test]
fn test_non_utf8_file_is_omitted() {
    let tree = TestTree::new();
    tree.add_file("a.txt", "before");
    tree.add_bytes("image.png", &[0x89, 0x50, 0x4e, 0x47, 0xff, 0xfe]);
    tree.add_file("z.txt", "after");

    let (stdout, stderr, success) = run_treedump(tree.path(), &["dump", ".", "-o", "-"]);
    assert!(success);
    assert_eq!(
        stdout,
        "a.txt\n```\nbefore\n```\n\nz.txt\n```\nafter\n```\n\n"
    );
    assert!(stderr.contains("not valid UTF-8"), "got: {}", stderr);
}

#[test]
fn test_empty_file() {
    let tree = TestTree::new();
    tree.add_file("empty.txt", "");

    let (stdout, _stderr, success) = run_treedump(tree.path(), &["dump", ".", "-o", "-"]);
    assert!(success);
    assert_eq!(stdout, "empty.txt\n```\n\n```\n\n");
}

#[test]
fn test_file_with_trailing_newline_keeps_it() {
    let tree = TestTree::new();
    tree.add_file("a.rs", "fn a() {}\n");

    let (stdout, _stderr, success) = run_treedump(tree.path(), &["dump", ".", "-o", "-"]);
    assert!(success);
    assert_eq!(stdout, "a.rs\n```\nfn a() {}\n\n```\n\n");
}

#[test]
fn test_filename_with_unicode_and_spaces() {
    let tree = TestTree::new();
    tree.add_file("日本語 notes.txt", "こんにちは");
    tree.add_file("dir with spaces/émoji_🎉.txt", "party");

    let (stdout, _stderr, success) = run_treedump(tree.path(), &["dump", ".", "-o", "-"]);
    assert!(success);
    assert!(stdout.contains("dir with spaces/émoji_🎉.txt\n```\nparty"));
    assert!(stdout.contains("日本語 notes.txt\n```\nこんにちは"));

    let (stdout, _stderr, success) = run_treedump(tree.path(), &["tree"]);
    assert!(success);
    assert!(stdout.contains("└── émoji_🎉.txt"), "got: {}", stdout);
}

// ============================================================================
// Structure Edge Cases
// ============================================================================

#[test]
fn test_empty_root() {
    let tree = TestTree::new();
    tree.add_dir("empty");

    let (stdout, stderr, success) = run_treedump(tree.path(), &["dump", "empty", "-o", "-"]);
    assert!(success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("wrote 0 files"), "got: {}", stderr);
}

#[test]
fn test_root_is_a_file() {
    let tree = TestTree::new();
    tree.add_file("file.txt", "x");

    let (_stdout, stderr, success) = run_treedump(tree.path(), &["dump", "file.txt", "-o", "-"]);
    assert!(!success);
    assert!(stderr.contains("is not a directory"), "got: {}", stderr);
}

#[test]
fn test_very_deep_nesting() {
    let tree = TestTree::new();
    let deep_path = (0..40).map(|i| format!("d{}", i)).collect::<Vec<_>>().join("/");
    tree.add_file(&format!("{}/deep.txt", deep_path), "bottom");

    let (stdout, _stderr, success) = run_treedump(tree.path(), &["dump", ".", "-o", "-"]);
    assert!(success);
    assert_eq!(stdout, format!("{}/deep.txt\n```\nbottom\n```\n\n", deep_path));

    let (stdout, _stderr, success) = run_treedump(tree.path(), &["tree", "d0"]);
    assert!(success);
    assert_eq!(stdout.lines().count(), 41);
}

#[test]
fn test_many_files_in_directory() {
    let tree = TestTree::new();
    for i in 0..200 {
        tree.add_file(&format!("many/file{:03}.txt", i), "x");
    }

    let (stdout, _stderr, success) = run_treedump(tree.path(), &["tree", "many"]);
    assert!(success);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 201);
    assert_eq!(lines[1], "    ├── file000.txt");
    assert_eq!(lines[200], "    └── file199.txt");
}

#[test]
fn test_sorting_order() {
    let tree = TestTree::new();
    tree.add_file("Zebra.txt", "");
    tree.add_file("apple.txt", "");
    tree.add_file("Banana/x.txt", "");
    tree.add_file("cherry/y.txt", "");

    let (stdout, _stderr, success) = run_treedump(tree.path(), &["tree", "-L", "1"]);
    assert!(success);
    assert_eq!(
        stdout,
        "├── Banana\n├── cherry\n├── apple.txt\n└── Zebra.txt\n"
    );

    let (stdout, _stderr, success) = run_treedump(tree.path(), &["dump", ".", "-o", "-"]);
    assert!(success);
    let labels: Vec<&str> = stdout
        .lines()
        .filter(|line| line.ends_with(".txt"))
        .collect();
    assert_eq!(labels, ["apple.txt", "Banana/x.txt", "cherry/y.txt", "Zebra.txt"]);
}

#[test]
fn test_repeated_runs_are_identical() {
    let tree = TestTree::new();
    tree.add_file("b/2.txt", "2");
    tree.add_file("a/1.txt", "1");
    tree.add_file("c.txt", "3");

    let (first, _, _) = run_treedump(tree.path(), &["dump", ".", "-o", "-"]);
    let (second, _, _) = run_treedump(tree.path(), &["dump", ".", "-o", "-"]);
    assert_eq!(first, second);

    let (first, _, _) = run_treedump(tree.path(), &["tree"]);
    let (second, _, _) = run_treedump(tree.path(), &["tree"]);
    assert_eq!(first, second);
}
