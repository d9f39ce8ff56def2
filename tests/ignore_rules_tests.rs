use foldermerge::IgnoreRules;
use std::path::Path;

#[test]
fn test_empty_rules_match_nothing() {
    let rules = IgnoreRules::new();
    assert!(rules.is_empty());
    assert!(!rules.matches("main.rs"));
    assert!(!rules.matches(".gitignore"));
}

#[test]
fn test_comments_and_blank_lines_are_not_patterns() {
    let mut rules = IgnoreRules::new();
    let added = rules.add("# build output\n\n   \n*.log\n");
    assert_eq!(added, 1, "Expected only the *.log line to be added");
    assert_eq!(rules.len(), 1);
    assert!(rules.matches("server.log"));
    assert!(!rules.matches("# build output"));
}

#[test]
fn test_basename_pattern_matches() {
    let mut rules = IgnoreRules::new();
    rules.add("*.log\nsecret.env\n");
    assert!(rules.matches("secret.log"));
    assert!(rules.matches("secret.env"));
    assert!(!rules.matches("secret.txt"));
}

#[test]
fn test_negation_reincludes_earlier_match() {
    let mut rules = IgnoreRules::new();
    rules.add("*.txt\n!keep.txt\n");
    assert!(rules.matches("drop.txt"));
    assert!(!rules.matches("keep.txt"));
}

#[test]
fn test_last_match_wins_across_adds() {
    let mut rules = IgnoreRules::new();
    rules.add("!notes.md\n");
    rules.add("*.md\n");
    assert!(
        rules.matches("notes.md"),
        "A later exclusion must override an earlier negation"
    );

    rules.add("!notes.md\n");
    assert!(!rules.matches("notes.md"));
    assert!(rules.matches("todo.md"));
}

#[test]
fn test_directory_pattern_does_not_match_files() {
    let mut rules = IgnoreRules::new();
    rules.add("build/\n");
    assert!(!rules.matches("build"));
}

#[test]
fn test_anchored_pattern_matches_root_entry() {
    let mut rules = IgnoreRules::new();
    rules.add("/config.local.json\n");
    assert!(rules.matches("config.local.json"));
    assert!(!rules.matches("config.json"));
}

#[test]
fn test_add_from_source_accumulates() {
    let mut rules = IgnoreRules::new();
    rules.add_from_source(Path::new("first/.gitignore"), "*.tmp\n");
    rules.add_from_source(Path::new("second/.gitignore"), "*.bak\n");
    assert_eq!(rules.len(), 2);
    assert!(rules.matches("a.tmp"));
    assert!(rules.matches("a.bak"));
}

#[test]
fn test_cloned_rules_are_independent() {
    let mut rules = IgnoreRules::new();
    rules.add("*.log\n");
    let snapshot = rules.clone();
    rules.add("*.txt\n");
    assert!(rules.matches("a.txt"));
    assert!(!snapshot.matches("a.txt"));
    assert!(snapshot.matches("a.log"));
}

#[test]
fn test_patterns_match_case_insensitively() {
    let mut rules = IgnoreRules::new();
    rules.add("*.LOG\nREADME.md\n");
    assert!(rules.matches("secret.log"));
    assert!(rules.matches("readme.md"));
    assert!(rules.matches("Readme.MD"));
    assert!(!rules.matches("readme.txt"));
}
