//! Shared test utilities for the folio test suite.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = minimal_site();
//! write_post(&tmp.path().join("posts"), "hello.md", &post_source("Hello", "2024-01-01", "hello", true));
//! let site = load_site(tmp.path()).unwrap();
//! assert_eq!(slugs(&site.posts.list_published()), vec!["hello"]);
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::types::PostMeta;

/// Smallest valid `site.toml`.
pub const MINIMAL_SITE_TOML: &str = r#"[presentation]
mail = "me@example.com"
title = "Me"
description = ""
"#;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

/// A content root with a minimal `site.toml` and an empty `posts/`.
pub fn minimal_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("site.toml"), MINIMAL_SITE_TOML).unwrap();
    fs::create_dir_all(tmp.path().join("posts")).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Post authoring
// =========================================================================

/// Front-matter block for a post, with an empty description and no body.
pub fn post_source(title: &str, published_at: &str, slug: &str, is_publish: bool) -> String {
    format!(
        "---\ntitle: \"{title}\"\npublishedAt: {published_at}\ndescription: \"\"\nslug: \"{slug}\"\nisPublish: {is_publish}\n---\n"
    )
}

/// Write `text` to `dir/rel_path`, creating parent directories.
pub fn write_post(dir: &Path, rel_path: &str, text: &str) {
    let path = dir.join(rel_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, text).unwrap();
}

// =========================================================================
// Extractors
// =========================================================================

/// Slugs in listing order.
pub fn slugs<'a>(posts: &[&'a PostMeta]) -> Vec<&'a str> {
    posts.iter().map(|m| m.slug.as_str()).collect()
}
