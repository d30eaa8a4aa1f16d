//! Post filename conventions.
//!
//! Post files are named either `name.md` or `YYYY-MM-DD-name.md`. A post can
//! also live in its own directory as `name/index.md`, in which case the
//! directory supplies the name.
//!
//! The front-matter `slug` is the source of truth for a post's URL. The
//! filename is only checked against it: the name part is slugified and
//! compared, and a date prefix is compared with `publishedAt`.
//!
//! - `2024-01-01-hello-world.md` → date=2024-01-01, slug="hello-world"
//! - `Hello World.md` → date=None, slug="hello-world"
//! - `notes-on-rust/index.md` → date=None, slug="notes-on-rust"

use chrono::NaiveDate;
use std::path::Path;

/// Result of parsing a post file name.
#[derive(Debug, Clone, PartialEq)]
pub struct PostFileName {
    /// Date prefix if present (e.g. `2024-01-01` from `2024-01-01-hello.md`)
    pub date: Option<NaiveDate>,
    /// Name part after the date prefix, as written.
    pub name: String,
    /// `name` run through `slug::slugify`.
    pub slug: String,
}

/// Parse a file stem following the `(YYYY-MM-DD-)?name` convention.
pub fn parse_post_stem(stem: &str) -> PostFileName {
    let (date, name) = match split_date_prefix(stem) {
        Some((date, rest)) => (Some(date), rest),
        None => (None, stem),
    };
    PostFileName {
        date,
        name: name.to_string(),
        slug: slug::slugify(name),
    }
}

/// Parse the relative path of a post file.
///
/// Returns `None` if the path has no usable stem.
pub fn parse_post_path(rel_path: &Path) -> Option<PostFileName> {
    let stem = rel_path.file_stem()?.to_str()?;
    if stem.eq_ignore_ascii_case("index") {
        let dir = rel_path.parent()?.file_name()?.to_str()?;
        return Some(parse_post_stem(dir));
    }
    Some(parse_post_stem(stem))
}

fn split_date_prefix(stem: &str) -> Option<(NaiveDate, &str)> {
    let prefix = stem.get(..10)?;
    let date = NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()?;
    let rest = &stem[10..];
    if rest.is_empty() {
        return Some((date, rest));
    }
    rest.strip_prefix('-').map(|name| (date, name))
}

/// Render a relative path with `/` separators regardless of platform.
pub fn display_rel_path(rel_path: &Path) -> String {
    rel_path
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
