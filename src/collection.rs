//! Post collection: scanning, assembly, and the query surface.
//!
//! The posts directory is scanned once. Every file is parsed independently,
//! in parallel, and the results are merged in sorted path order:
//!
//! ```text
//! posts/                              # content.posts_dir
//! ├── 2024-01-01-hello-world.md       # dated file name
//! ├── draft-post.md                   # isPublish: false → listed by list_all only
//! ├── notes-on-rust/
//! │   └── index.md                    # directory supplies the file-name slug
//! └── .obsidian/                      # hidden entries are skipped
//! ```
//!
//! ## Assembly rules
//!
//! - A file that fails to read or parse is skipped with an error diagnostic.
//!   So is a subdirectory the walk cannot enter; only the posts directory
//!   itself is fatal. Symlinks are followed and loops are reported.
//! - Two files with the same slug: the first in path order wins, the second
//!   is skipped with a [`DiagnosticKind::DuplicateSlug`] naming both.
//! - Posts are ordered by `published_at`, newest first. The sort is stable, so
//!   equal dates keep path order.
//! - Candidate files but zero valid posts yields an
//!   [`DiagnosticKind::EmptyCollection`] warning, not an error.
//!
//! ## Drafts
//!
//! [`PostCollection::list_published`] never returns drafts.
//! [`PostCollection::list_all`] is the only listing that does. Slug lookups
//! return drafts only to an [`Audience::Preview`] caller.

use crate::config::ContentConfig;
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::frontmatter;
use crate::naming;
use crate::types::{Post, PostMeta};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("Posts directory not found: {0}")]
    MissingDirectory(PathBuf),
    #[error("Failed to scan {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Who is asking for a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Audience {
    /// Drafts are reported as not found.
    #[default]
    Public,
    /// Drafts are visible, for local previews.
    Preview,
}

impl Audience {
    fn can_see(self, meta: &PostMeta) -> bool {
        meta.is_publish || self == Audience::Preview
    }
}

/// One candidate file: its path relative to the posts directory and its text.
#[derive(Debug)]
pub struct Source {
    pub rel_path: PathBuf,
    pub text: io::Result<String>,
}

impl Source {
    pub fn new(rel_path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            rel_path: rel_path.into(),
            text: Ok(text.into()),
        }
    }

    /// A path that was found but could not be read.
    pub fn unreadable(rel_path: impl Into<PathBuf>, err: io::Error) -> Self {
        Self {
            rel_path: rel_path.into(),
            text: Err(err),
        }
    }
}

/// An entry turned up by the walk.
enum Found {
    File(PathBuf),
    Failed(PathBuf, io::Error),
}

impl Found {
    fn rel_path(&self) -> &Path {
        match self {
            Found::File(path) | Found::Failed(path, _) => path,
        }
    }
}

/// The assembled, immutable set of posts.
#[derive(Debug, Clone, Default)]
pub struct PostCollection {
    posts: Vec<Post>,
    index: HashMap<String, usize>,
    audience: Audience,
    diagnostics: Vec<Diagnostic>,
}

impl PostCollection {
    /// Scan `posts_dir` and assemble every post file found in it.
    ///
    /// Only a missing or unreadable `posts_dir` is fatal; problems with
    /// individual files and subdirectories end up in
    /// [`PostCollection::diagnostics`].
    pub fn load(posts_dir: &Path, config: &ContentConfig) -> Result<Self, CollectionError> {
        let found = discover(posts_dir, config)?;
        tracing::debug!(dir = %posts_dir.display(), entries = found.len(), "discovered post files");

        let sources: Vec<Source> = found
            .into_par_iter()
            .map(|entry| match entry {
                Found::File(rel_path) => Source {
                    text: fs::read_to_string(posts_dir.join(&rel_path)),
                    rel_path,
                },
                Found::Failed(rel_path, err) => Source::unreadable(rel_path, err),
            })
            .collect();

        Ok(Self::from_sources(sources, config))
    }

    /// Assemble a collection from already-read sources.
    ///
    /// Sources are parsed in parallel, then merged in the order given.
    pub fn from_sources(sources: Vec<Source>, config: &ContentConfig) -> Self {
        let candidates = sources.len();
        let parsed: Vec<(PathBuf, Result<(Post, Vec<DiagnosticKind>), DiagnosticKind>)> = sources
            .into_par_iter()
            .map(|source| {
                let outcome = parse_source(&source, config);
                (source.rel_path, outcome)
            })
            .collect();

        let mut posts: Vec<Post> = Vec::with_capacity(parsed.len());
        let mut diagnostics = Vec::new();
        let mut owners: HashMap<String, PathBuf> = HashMap::new();

        for (rel_path, outcome) in parsed {
            match outcome {
                Ok((post, warnings)) => {
                    if let Some(kept) = owners.get(&post.meta.slug) {
                        let kind = DiagnosticKind::DuplicateSlug {
                            slug: post.meta.slug.clone(),
                            kept: naming::display_rel_path(kept),
                        };
                        tracing::warn!(path = %rel_path.display(), error = %kind, "skipping post");
                        diagnostics.push(Diagnostic::new(rel_path, kind));
                        continue;
                    }
                    tracing::debug!(path = %rel_path.display(), slug = %post.meta.slug, "parsed post");
                    diagnostics.extend(
                        warnings
                            .into_iter()
                            .map(|kind| Diagnostic::new(rel_path.clone(), kind)),
                    );
                    owners.insert(post.meta.slug.clone(), rel_path);
                    posts.push(post);
                }
                Err(kind) => {
                    tracing::warn!(path = %rel_path.display(), error = %kind, "skipping post");
                    diagnostics.push(Diagnostic::new(rel_path, kind));
                }
            }
        }

        if candidates > 0 && posts.is_empty() {
            let kind = DiagnosticKind::EmptyCollection { candidates };
            tracing::warn!("{kind}");
            diagnostics.push(Diagnostic::global(kind));
        }

        posts.sort_by(|a, b| b.meta.published_at.cmp(&a.meta.published_at));
        let index = posts
            .iter()
            .enumerate()
            .map(|(i, post)| (post.meta.slug.clone(), i))
            .collect();

        Self {
            posts,
            index,
            audience: config.drafts.audience(),
            diagnostics,
        }
    }

    /// Replace the audience used by [`PostCollection::get_by_slug`].
    pub fn with_audience(mut self, audience: Audience) -> Self {
        self.audience = audience;
        self
    }

    pub fn audience(&self) -> Audience {
        self.audience
    }

    /// Published posts, newest first. Never contains drafts.
    pub fn list_published(&self) -> Vec<&PostMeta> {
        self.posts
            .iter()
            .map(|p| &p.meta)
            .filter(|meta| meta.is_publish)
            .collect()
    }

    /// All posts including drafts, newest first.
    pub fn list_all(&self) -> Vec<&PostMeta> {
        self.posts.iter().map(|p| &p.meta).collect()
    }

    /// Drafts only, newest first.
    pub fn list_drafts(&self) -> Vec<&PostMeta> {
        self.posts
            .iter()
            .map(|p| &p.meta)
            .filter(|meta| meta.is_draft())
            .collect()
    }

    /// Look up a post by slug as the collection's configured audience.
    pub fn get_by_slug(&self, slug: &str) -> Option<&Post> {
        self.get_by_slug_as(slug, self.audience)
    }

    /// Look up a post by slug as an explicit audience.
    ///
    /// A draft looked up by a [`Audience::Public`] caller is `None`, exactly
    /// like a slug that does not exist.
    pub fn get_by_slug_as(&self, slug: &str, audience: Audience) -> Option<&Post> {
        self.index
            .get(slug)
            .map(|&i| &self.posts[i])
            .filter(|post| audience.can_see(&post.meta))
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of posts, drafts included.
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// List candidate files and failed entries under `posts_dir`, relative and
/// sorted by path.
fn discover(posts_dir: &Path, config: &ContentConfig) -> Result<Vec<Found>, CollectionError> {
    if !posts_dir.is_dir() {
        return Err(CollectionError::MissingDirectory(posts_dir.to_path_buf()));
    }

    let mut found = Vec::new();
    let walker = WalkDir::new(posts_dir)
        .min_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !is_hidden(e.file_name()));
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) if source.depth() == 0 => {
                return Err(CollectionError::Walk {
                    path: posts_dir.to_path_buf(),
                    source,
                });
            }
            Err(err) => {
                let rel_path = err
                    .path()
                    .and_then(|p| p.strip_prefix(posts_dir).ok())
                    .map(Path::to_path_buf)
                    .unwrap_or_default();
                tracing::warn!(path = %rel_path.display(), error = %err, "skipping unreadable entry");
                found.push(Found::Failed(rel_path, err.into()));
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let accepted = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| config.accepts_extension(e));
        if !accepted {
            continue;
        }
        if let Ok(rel) = entry.path().strip_prefix(posts_dir) {
            found.push(Found::File(rel.to_path_buf()));
        }
    }

    found.sort_by(|a, b| a.rel_path().cmp(b.rel_path()));
    Ok(found)
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

/// Parse one source into a post plus any warnings about it.
fn parse_source(
    source: &Source,
    config: &ContentConfig,
) -> Result<(Post, Vec<DiagnosticKind>), DiagnosticKind> {
    let text = source
        .text
        .as_ref()
        .map_err(|e| DiagnosticKind::Unreadable(e.to_string()))?;
    let parsed = frontmatter::parse_post(text)?;

    let mut warnings = Vec::new();
    if config.check_filename_slug {
        warnings.extend(filename_warnings(&source.rel_path, &parsed.front_matter));
    }

    let meta = parsed
        .front_matter
        .into_meta(naming::display_rel_path(&source.rel_path));
    Ok((
        Post {
            meta,
            body: parsed.body,
        },
        warnings,
    ))
}

fn filename_warnings(rel_path: &Path, fm: &frontmatter::FrontMatter) -> Vec<DiagnosticKind> {
    let mut warnings = Vec::new();
    let Some(file_name) = naming::parse_post_path(rel_path) else {
        return warnings;
    };
    if !file_name.slug.is_empty() && file_name.slug != fm.slug {
        warnings.push(DiagnosticKind::SlugMismatch {
            slug: fm.slug.clone(),
            filename_slug: file_name.slug,
        });
    }
    if let Some(filename_date) = file_name.date
        && filename_date != fm.published_at
    {
        warnings.push(DiagnosticKind::DateMismatch {
            published_at: fm.published_at,
            filename_date,
        });
    }
    warnings
}
