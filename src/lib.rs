//! # Folio
//!
//! The content model behind a personal portfolio and blog. A site is three
//! things: a presentation block (who the author is and where to find them),
//! a list of projects, and a directory of markdown posts with front-matter.
//!
//! # Architecture: Load Once, Query Many
//!
//! Everything is read from the content root in one pass and frozen into an
//! immutable [`scan::Site`]:
//!
//! ```text
//! content/site.toml    →  SiteData          (presentation + projects)
//! content/posts/**.md  →  PostCollection    (parsed, deduplicated, sorted)
//! content/config.toml  →  SiteConfig        (optional, stock defaults otherwise)
//! ```
//!
//! Rendering layers only ever see the loaded model, either through the query
//! methods on [`collection::PostCollection`] or through the JSON manifest that
//! `folio scan` writes. Nothing is re-read per request.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Record schemas: `Presentation`, `Social`, `Project`, `PostMeta`, `Post` |
//! | [`data`] | Loads and validates the static `site.toml` tables |
//! | [`frontmatter`] | Splits a post into its front-matter block and body, and types the fields |
//! | [`collection`] | Scans the posts directory and answers `list_published`, `list_all`, `get_by_slug` |
//! | [`naming`] | `YYYY-MM-DD-slug` file-name convention, used to cross-check front-matter |
//! | [`diagnostics`] | Per-file errors and warnings collected during loading |
//! | [`config`] | `config.toml` loading, stock defaults, merging, and validation |
//! | [`scan`] | Ties the above together into a `Site` and its JSON manifest |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Front-Matter Is the Source of Truth
//!
//! A post's slug and date come from its front-matter, never from its file
//! name. File names are still checked: a `2024-01-01-hello.md` whose
//! front-matter says `slug: goodbye` loads as `goodbye` and produces a
//! warning. Renaming a file never changes a URL.
//!
//! ## Bad Files Don't Sink the Site
//!
//! A post with malformed front-matter is skipped and reported, and the rest
//! of the collection loads. Only structural problems (no `site.toml`, no
//! posts directory, an invalid `config.toml`) abort loading. `folio check`
//! turns error diagnostics into a non-zero exit for CI.
//!
//! ## Drafts Are Opt-In at Every Call Site
//!
//! `isPublish: false` posts are never returned by `list_published` and are
//! reported as not found by `get_by_slug` unless the caller asks as
//! [`collection::Audience::Preview`]. `list_all` is the one listing that
//! includes them.

pub mod collection;
pub mod config;
pub mod data;
pub mod diagnostics;
pub mod frontmatter;
pub mod naming;
pub mod output;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
