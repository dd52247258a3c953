use std::io::Write;
use std::path::Path;

use crate::{IgnoreIndex, ParsedLine, RuleSet, parse_line};

fn pattern_of(parsed: &ParsedLine) -> &str {
    match parsed {
        ParsedLine::Exclude(rule) | ParsedLine::Negate(rule) => rule.pattern(),
        other => panic!("expected a rule line, got {other:?}"),
    }
}

#[test]
fn blank_line_is_noop() {
    assert_eq!(parse_line(" ").unwrap(), ParsedLine::NoOp);
    assert_eq!(parse_line("\n").unwrap(), ParsedLine::NoOp);
    assert_eq!(parse_line("").unwrap(), ParsedLine::NoOp);
}

#[test]
fn comment_line_is_noop() {
    assert_eq!(parse_line("# too simple").unwrap(), ParsedLine::NoOp);
}

#[test]
fn escaped_hash_line_is_literal() {
    assert_eq!(
        parse_line("\\#123abc").unwrap(),
        ParsedLine::LiteralHash("123abc".to_owned())
    );
}

#[test]
fn plain_line_excludes() {
    let parsed = parse_line("excited/*.*").unwrap();
    assert!(matches!(parsed, ParsedLine::Exclude(_)));
    assert_eq!(pattern_of(&parsed), "excited/*.*");
}

#[test]
fn bang_prefix_negates() {
    let parsed = parse_line("!too_simple.py").unwrap();
    assert!(matches!(parsed, ParsedLine::Negate(_)));
    assert_eq!(pattern_of(&parsed), "too_simple.py");
}

#[test]
fn double_asterisk_collapses_to_single() {
    let parsed = parse_line("young/**/simple/**/naive").unwrap();
    assert_eq!(pattern_of(&parsed), "young/*/simple/*/naive");

    // `a/**/b` compiles identically to `a/*/b`.
    assert_eq!(
        pattern_of(&parse_line("a/**/b").unwrap()),
        pattern_of(&parse_line("a/*/b").unwrap())
    );
}

#[test]
fn trailing_separator_matches_directory_contents() {
    assert_eq!(pattern_of(&parse_line("excited/").unwrap()), "excited/*");
}

#[test]
fn escaped_space_is_unescaped() {
    assert_eq!(
        pattern_of(&parse_line("too\\ young.py").unwrap()),
        "too young.py"
    );
}

#[test]
fn escaped_trailing_space_is_preserved() {
    assert_eq!(pattern_of(&parse_line("name\\ ").unwrap()), "name ");
}

#[test]
fn leading_dot_slash_is_stripped() {
    assert_eq!(
        pattern_of(&parse_line("./too_young.py").unwrap()),
        "too_young.py"
    );
}

#[test]
fn bare_bang_compiles_to_empty_glob() {
    let parsed = parse_line("!").unwrap();
    match parsed {
        ParsedLine::Negate(rule) => {
            assert_eq!(rule.pattern(), "");
            assert!(rule.is_match(""));
            assert!(!rule.is_match("x"));
        }
        other => panic!("expected a negation, got {other:?}"),
    }
}

#[test]
fn glob_star_crosses_separators() {
    let parsed = parse_line("*.log").unwrap();
    match parsed {
        ParsedLine::Exclude(rule) => {
            assert!(rule.is_match("keep.log"));
            assert!(rule.is_match("deep/nested/keep.log"));
        }
        other => panic!("expected an exclusion, got {other:?}"),
    }
}

#[test]
fn directory_pattern_does_not_match_sibling_prefix() {
    let parsed = parse_line("build/").unwrap();
    match parsed {
        ParsedLine::Exclude(rule) => {
            assert!(rule.is_match("build/x.o"));
            assert!(!rule.is_match("build2/x.o"));
        }
        other => panic!("expected an exclusion, got {other:?}"),
    }
}

#[test]
fn rule_set_partitions_by_kind() {
    let set = RuleSet::from_lines([
        "# header",
        "",
        "\\#2A00BF",
        "*.log",
        "!keep.log",
        "build/",
    ]);
    assert_eq!(set.hashes(), ["2A00BF"]);
    assert_eq!(set.negations().len(), 1);
    assert_eq!(set.exclusions().len(), 2);
    assert!(!set.is_empty());
}

#[test]
fn rule_set_load_reads_file_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".gitignore");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "*.tmp").unwrap();
    writeln!(file, "# noise").unwrap();
    writeln!(file, "!keep.tmp").unwrap();
    drop(file);

    let set = RuleSet::load(&path).unwrap();
    assert_eq!(set.exclusions().len(), 1);
    assert_eq!(set.negations().len(), 1);
    assert!(set.hashes().is_empty());
}

#[test]
fn rule_set_load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join(".gitignore");
    let error = RuleSet::load(&missing).unwrap_err();
    assert_eq!(error.path(), missing);
}

#[test]
fn scopes_sort_descending() {
    let mut index = IgnoreIndex::new("/a", ".gitignore");
    index.insert_rule_set(Path::new("/a/.gitignore"), RuleSet::default());
    index.insert_rule_set(Path::new("/a/b/c/.gitignore"), RuleSet::default());
    index.insert_rule_set(Path::new("/a/b/.gitignore"), RuleSet::default());
    assert_eq!(index.scopes(), ["/a/b/c/", "/a/b/", "/a/"]);

    let nearest: Vec<_> = index.nearest_scopes_for("/a/b/c/x").collect();
    assert_eq!(nearest, ["/a/b/c/", "/a/b/", "/a/"]);
}

#[test]
#[should_panic(expected = "does not end in the ignore filename")]
fn foreign_file_name_is_rejected() {
    let mut index = IgnoreIndex::new("/a", ".gitignore");
    index.insert_rule_set(Path::new("/a/notes.txt"), RuleSet::default());
}
