//! Tests for replacement contribution sources and conflict validation.

mod helpers;

use helpers::TestEnv;

use distweave::replacements::{self, REPLACEMENTS_FILE_NAME};
use std::fs;

// =============================================================================
// Properties file source
// =============================================================================

#[test]
fn test_properties_parsing_skips_comments_and_blanks() {
    let env = TestEnv::new();
    env.write_replacements(
        "# leading comment\n\
         ! alternative comment\n\
         \n\
         repo = https://repo.example.com\n\
         name=demo\n\
         line without separator\n",
    );

    let contribution = replacements::from_properties_file(&env.replacements_file).unwrap();
    assert_eq!(contribution.values.len(), 2);
    assert_eq!(contribution.values["repo"].text, "https://repo.example.com");
    assert_eq!(contribution.values["name"].text, "demo");
}

#[test]
fn test_properties_origin_names_the_file() {
    let env = TestEnv::new();
    env.write_replacements("key=value\n");

    let contribution = replacements::from_properties_file(&env.replacements_file).unwrap();
    assert_eq!(
        contribution.values["key"].origin,
        format!("property from file {REPLACEMENTS_FILE_NAME}")
    );
}

#[test]
fn test_missing_properties_file_is_an_empty_contribution() {
    let env = TestEnv::new();

    let contribution = replacements::from_properties_file(&env.replacements_file).unwrap();
    assert!(contribution.values.is_empty());
    assert!(contribution.source.contains("replacements file"));
}

// =============================================================================
// Include directory source
// =============================================================================

#[test]
fn test_include_files_are_keyed_by_stripped_name() {
    let env = TestEnv::new();
    env.write_include("repo.conf", "maven { url = \"https://repo.example.com\" }\n");
    env.write_include("archive.tar.gz", "payload");
    env.write_include(".hidden", "dot");

    let contribution = replacements::from_include_dir(&env.include_dir).unwrap();
    assert_eq!(contribution.values.len(), 3);
    assert!(contribution.values.contains_key("repo"));
    assert!(contribution.values.contains_key("archive"));
    assert!(contribution.values.contains_key(".hidden"));
    assert_eq!(
        contribution.values["repo"].origin,
        "include file repo.conf"
    );
}

#[test]
fn test_include_value_is_the_full_file_content() {
    let env = TestEnv::new();
    env.write_include("block.conf", "line1\nline2\n");

    let contribution = replacements::from_include_dir(&env.include_dir).unwrap();
    assert_eq!(contribution.values["block"].text, "line1\nline2\n");
}

#[test]
fn test_reserved_replacements_file_is_not_an_include() {
    let env = TestEnv::new();
    env.write_replacements("key=value\n");
    env.write_include("other.conf", "content");

    let contribution = replacements::from_include_dir(&env.include_dir).unwrap();
    assert_eq!(contribution.values.len(), 1);
    assert!(!contribution.values.contains_key("replacements"));
}

#[test]
fn test_missing_include_dir_is_an_empty_contribution() {
    let env = TestEnv::new();
    let missing = env.base_dir.join("nowhere");

    let contribution = replacements::from_include_dir(&missing).unwrap();
    assert!(contribution.values.is_empty());
}

#[test]
fn test_subdirectories_are_skipped() {
    let env = TestEnv::new();
    fs::create_dir(env.include_dir.join("nested.d")).unwrap();
    env.write_include("real.conf", "content");

    let contribution = replacements::from_include_dir(&env.include_dir).unwrap();
    assert_eq!(contribution.values.len(), 1);
}

#[test]
fn test_two_files_with_the_same_key_are_rejected() {
    let env = TestEnv::new();
    env.write_include("repo.conf", "one");
    env.write_include("repo.txt", "two");

    let err = replacements::from_include_dir(&env.include_dir).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("repo.conf"));
    assert!(message.contains("repo.txt"));
    assert!(message.contains("'repo'"));
}

// =============================================================================
// Merge and conflict validation
// =============================================================================

#[test]
fn test_key_in_both_sources_fails_with_both_origins_named() {
    let env = TestEnv::new();
    env.write_replacements("repo=from-properties\n");
    env.write_include("repo.conf", "from-include");

    let err = replacements::load_all(&env.replacements_file, &env.include_dir).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("there is property 'repo' in replacements file"));
    assert!(message.contains(REPLACEMENTS_FILE_NAME));
    assert!(message.contains("include file repo.conf"));
    assert!(message.contains("Can't decide which one should be applied"));
}

#[test]
fn test_distinct_keys_from_both_sources_merge() {
    let env = TestEnv::new();
    env.write_replacements("version=1.0\n");
    env.write_include("repo.conf", "repo-content");

    let store = replacements::load_all(&env.replacements_file, &env.include_dir).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store["version"].text, "1.0");
    assert_eq!(store["repo"].text, "repo-content");
}

#[test]
fn test_empty_sources_merge_to_an_empty_store() {
    let env = TestEnv::new();

    let store = replacements::load_all(&env.replacements_file, &env.include_dir).unwrap();
    assert!(store.is_empty());
}
