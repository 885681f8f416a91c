use anyhow::Result;
use std::path::Path;

use crate::helpers::test_harness::TestHarness;

#[test]
fn test_build_directory_pattern_keeps_similar_file_names() -> Result<()> {
    let harness = TestHarness::new()?;
    harness.create_test_file(".gitignore", "build/\n")?;
    harness.create_test_file("build/out.js", "x")?;
    harness.create_test_file("build/nested/deep.js", "x")?;
    harness.create_test_file("src/build-utils.ts", "x")?;

    let files = harness.listed_files()?;

    assert_eq!(files, vec![".gitignore", "src/build-utils.ts"]);
    Ok(())
}

#[test]
fn test_each_file_listed_exactly_once() -> Result<()> {
    let harness = TestHarness::new()?;
    for name in ["a.ts", "b/c.ts", "b/d/e.ts", "f/g.md"] {
        harness.create_test_file(name, "x")?;
    }

    let files = harness.listed_files()?;

    assert_eq!(files, vec!["a.ts", "b/c.ts", "b/d/e.ts", "f/g.md"]);
    Ok(())
}

#[test]
fn test_negation_after_broader_rule_reincludes() -> Result<()> {
    let harness = TestHarness::new()?;
    harness.create_test_file(".gitignore", "# generated\n*.gen.ts\n!keep.gen.ts\n")?;
    harness.create_test_file("api.gen.ts", "x")?;
    harness.create_test_file("keep.gen.ts", "x")?;
    harness.create_test_file("index.ts", "x")?;

    let files = harness.listed_files()?;

    assert_eq!(files, vec![".gitignore", "index.ts", "keep.gen.ts"]);
    Ok(())
}

#[test]
fn test_permanent_directories_never_listed() -> Result<()> {
    let harness = TestHarness::new()?;
    harness.create_test_file(".gitignore", "!node_modules/\n")?;
    harness.create_test_file(".git/config", "x")?;
    harness.create_test_file("node_modules/pkg/index.js", "x")?;
    harness.create_test_file("apps/web/node_modules/pkg/index.js", "x")?;
    harness.create_test_file("apps/web/index.ts", "x")?;

    let files = harness.listed_files()?;

    assert_eq!(files, vec![".gitignore", "apps/web/index.ts"]);
    Ok(())
}

#[test]
fn test_nested_rules_do_not_leak_into_siblings() -> Result<()> {
    let harness = TestHarness::new()?;
    harness.create_test_file("a/.gitignore", "local.ts\n")?;
    harness.create_test_file("a/local.ts", "x")?;
    harness.create_test_file("a/kept.ts", "x")?;
    harness.create_test_file("b/local.ts", "x")?;

    let files = harness.listed_files()?;

    assert_eq!(files, vec!["a/.gitignore", "a/kept.ts", "b/local.ts"]);
    Ok(())
}

#[test]
fn test_nested_rules_apply_relative_to_their_directory() -> Result<()> {
    let harness = TestHarness::new()?;
    harness.create_test_file("pkg/.gitignore", "dist/\n")?;
    harness.create_test_file("pkg/dist/bundle.js", "x")?;
    harness.create_test_file("pkg/src/index.ts", "x")?;
    harness.create_test_file("dist/root.js", "x")?;

    let files = harness.listed_files()?;

    assert_eq!(
        files,
        vec!["dist/root.js", "pkg/.gitignore", "pkg/src/index.ts"]
    );
    Ok(())
}

#[test]
fn test_excluded_directory_is_pruned() -> Result<()> {
    let harness = TestHarness::new()?;
    harness.create_test_file(".gitignore", "cache/\n")?;
    // Re-including a child of a pruned directory has no effect
    harness.create_test_file("cache/.gitignore", "!*\n")?;
    harness.create_test_file("cache/data.json", "x")?;

    let files = harness.listed_files()?;

    assert_eq!(files, vec![".gitignore"]);
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_propagates_error() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let harness = TestHarness::new()?;
    harness.create_test_file("locked/secret.ts", "x")?;
    let locked = harness.path().join("locked");
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000))?;

    // Root ignores permission bits; nothing to assert in that case
    let readable_anyway = std::fs::read_dir(&locked).is_ok();
    let result = harness.codebase().list_files(None);
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755))?;

    if !readable_anyway {
        assert!(matches!(
            result,
            Err(codefetch::Error::PermissionDenied { .. })
        ));
    }
    Ok(())
}

#[test]
fn test_list_files_under_sub_path_honours_root_rules() -> Result<()> {
    let harness = TestHarness::new()?;
    harness.create_test_file(".gitignore", "*.snap\n")?;
    harness.create_test_file("src/a.ts", "x")?;
    harness.create_test_file("src/a.snap", "x")?;
    harness.create_test_file("docs/readme.md", "x")?;

    let codebase = harness.codebase();
    let files: Vec<String> = codebase
        .list_files(Some(Path::new("src")))?
        .iter()
        .map(|f| codebase.display_path(f))
        .collect();

    assert_eq!(files, vec!["src/a.ts"]);
    Ok(())
}

#[test]
fn test_custom_rule_file_name() -> Result<()> {
    let mut harness = TestHarness::new()?;
    harness.config.ignore_file = ".fetchignore".to_string();
    harness.create_test_file(".fetchignore", "secret/\n")?;
    harness.create_test_file(".gitignore", "src/\n")?;
    harness.create_test_file("secret/key.ts", "x")?;
    harness.create_test_file("src/app.ts", "x")?;

    let files = harness.listed_files()?;

    assert_eq!(files, vec![".fetchignore", ".gitignore", "src/app.ts"]);
    Ok(())
}

#[test]
fn test_tool_directory_excluded_by_default() -> Result<()> {
    let harness = TestHarness::new()?;
    harness.create_test_file(".codefetch/config.toml", "[indexer]\n")?;
    harness.create_test_file(".codefetch/logs/codefetch.log", "x")?;
    harness.create_test_file("src/app.ts", "x")?;

    let files = harness.listed_files()?;

    assert_eq!(files, vec!["src/app.ts"]);
    Ok(())
}
