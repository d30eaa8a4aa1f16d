//! End-to-end tests against the public API.
//!
//! Loads `fixtures/content/` in place (read-only) and a few throwaway sites
//! built in temp dirs.
//!
//! Run with: cargo test --test site

use folio::collection::{Audience, PostCollection, Source};
use folio::config::ContentConfig;
use folio::diagnostics::DiagnosticKind;
use folio::scan::{self, Site};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn fixture_site() -> Site {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    scan::load_site(&root).unwrap()
}

fn slugs(site: &Site, all: bool) -> Vec<String> {
    let posts = if all {
        site.posts.list_all()
    } else {
        site.posts.list_published()
    };
    posts.iter().map(|m| m.slug.clone()).collect()
}

// =========================================================================
// Fixture site
// =========================================================================

#[test]
fn fixture_loads_clean() {
    let site = fixture_site();
    assert!(site.diagnostics().is_empty(), "{:?}", site.diagnostics());
    assert_eq!(site.data.presentation.socials.len(), 2);
    assert_eq!(site.data.shipped_projects().count(), 2);
}

#[test]
fn fixture_published_order() {
    let site = fixture_site();
    assert_eq!(
        slugs(&site, false),
        vec!["new-year", "notes-on-rust", "hello-world", "first-steps"]
    );
}

#[test]
fn fixture_list_all_includes_draft_by_date() {
    let site = fixture_site();
    assert_eq!(slugs(&site, true)[0], "draft-post");
    assert_eq!(site.posts.list_all().len(), 5);
}

#[test]
fn fixture_listings_are_newest_first() {
    let site = fixture_site();
    for list in [site.posts.list_published(), site.posts.list_all()] {
        assert!(list.windows(2).all(|w| w[0].published_at >= w[1].published_at));
    }
}

#[test]
fn fixture_published_is_subset_of_all() {
    let site = fixture_site();
    let all: HashSet<String> = slugs(&site, true).into_iter().collect();
    for slug in slugs(&site, false) {
        assert!(all.contains(&slug));
    }
    assert_eq!(all.len(), site.posts.list_all().len());
}

#[test]
fn fixture_lookups() {
    let site = fixture_site();

    let post = site.posts.get_by_slug("notes-on-rust").unwrap();
    assert_eq!(post.meta.title, "Notes on Rust's borrow checker");
    assert_eq!(post.meta.source, "notes-on-rust/index.md");
    assert!(post.body.starts_with("Lifetimes are regions"));

    let archived = site.posts.get_by_slug("first-steps").unwrap();
    assert_eq!(archived.meta.description, "");
    assert_eq!(archived.meta.published_at.to_string(), "2023-09-10");

    assert!(site.posts.get_by_slug("draft-post").is_none());
    assert!(
        site.posts
            .get_by_slug_as("draft-post", Audience::Preview)
            .is_some()
    );
    assert!(site.posts.get_by_slug("nope").is_none());
}

// =========================================================================
// Broken content
// =========================================================================

#[test]
fn broken_post_is_skipped_and_reported() {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    fs::copy(fixtures.join("site.toml"), tmp.path().join("site.toml")).unwrap();
    let posts = tmp.path().join("posts");
    fs::create_dir_all(&posts).unwrap();
    fs::write(
        posts.join("ok.md"),
        "---\ntitle: Ok\npublishedAt: 2024-02-02\nslug: ok\nisPublish: true\n---\n",
    )
    .unwrap();
    fs::write(posts.join("broken.md"), "title: no delimiters\n").unwrap();

    let site = scan::load_site(tmp.path()).unwrap();
    assert_eq!(slugs(&site, true), vec!["ok"]);
    assert!(site.has_errors());
    let broken = site
        .diagnostics()
        .iter()
        .find(|d| d.path == Some(Path::new("posts").join("broken.md")))
        .unwrap();
    assert!(matches!(broken.kind, DiagnosticKind::MalformedFrontMatter(_)));
}

#[test]
fn from_sources_keeps_first_given_source() {
    let text = |title: &str| {
        format!("---\ntitle: {title}\npublishedAt: 2024-01-01\nslug: same\nisPublish: true\n---\n")
    };
    // Given in the order `load` would produce: `old/same.md` sorts first.
    let collection = PostCollection::from_sources(
        vec![
            Source::new("old/same.md", text("First")),
            Source::new("same.md", text("Second")),
        ],
        &ContentConfig::default(),
    );

    assert_eq!(collection.len(), 1);
    assert_eq!(collection.get_by_slug("same").unwrap().meta.title, "First");
    assert_eq!(collection.diagnostics().len(), 1);
    assert_eq!(
        collection.diagnostics()[0].kind,
        DiagnosticKind::DuplicateSlug {
            slug: "same".to_string(),
            kept: "old/same.md".to_string()
        }
    );
}

#[test]
fn load_site_resolves_duplicates_in_path_order() {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    fs::copy(fixtures.join("site.toml"), tmp.path().join("site.toml")).unwrap();
    let posts = tmp.path().join("posts");
    fs::create_dir_all(posts.join("old")).unwrap();
    fs::write(
        posts.join("same.md"),
        "---\ntitle: Newer copy\npublishedAt: 2025-01-01\nslug: same\nisPublish: true\n---\n",
    )
    .unwrap();
    fs::write(
        posts.join("old/same.md"),
        "---\ntitle: Older copy\npublishedAt: 2020-01-01\nslug: same\nisPublish: true\n---\n",
    )
    .unwrap();

    let site = scan::load_site(tmp.path()).unwrap();
    assert_eq!(site.posts.get_by_slug("same").unwrap().meta.title, "Older copy");
    let duplicate = site
        .diagnostics()
        .iter()
        .find(|d| matches!(d.kind, DiagnosticKind::DuplicateSlug { .. }))
        .unwrap();
    assert_eq!(duplicate.path, Some(Path::new("posts").join("same.md")));
    assert_eq!(
        duplicate.kind,
        DiagnosticKind::DuplicateSlug {
            slug: "same".to_string(),
            kept: "old/same.md".to_string()
        }
    );
}

#[test]
fn manifest_round_trips_through_disk() {
    let site = fixture_site();
    let out = TempDir::new().unwrap();
    let path = site.write_manifest(out.path()).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    let posts: Vec<&str> = json["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["slug"].as_str().unwrap())
        .collect();
    assert_eq!(posts, slugs(&site, false));
    assert_eq!(json["projects"][2]["is_coming_soon"], true);
}
