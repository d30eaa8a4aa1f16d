//! Content loading and manifest generation.
//!
//! [`load_site`] is the one place the content root is read. It loads the build
//! config, the data tables, and the post collection, and returns them as an
//! immutable [`Site`] together with every diagnostic found on the way.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                         # Content root
//! ├── config.toml                  # Build configuration (optional)
//! ├── site.toml                    # Presentation and projects (required)
//! └── posts/                       # One file per post
//!     ├── 2024-01-01-hello.md
//!     └── draft-post.md
//! ```
//!
//! ## Output
//!
//! [`Site::manifest`] produces the JSON document handed to the rendering
//! layer:
//!
//! - the presentation block and the project list, unchanged
//! - published post metadata, newest first (bodies are not included)
//! - draft metadata, only when `content.drafts = "preview"`
//! - all diagnostics as `{severity, path, message}` records

use crate::collection::{Audience, CollectionError, PostCollection};
use crate::config::{self, ConfigError, SiteConfig};
use crate::data::{self, DataError, SiteData};
use crate::diagnostics::{self, Diagnostic};
use crate::types::{PostMeta, Presentation, Project};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Data error: {0}")]
    Data(#[from] DataError),
    #[error("Posts error: {0}")]
    Collection(#[from] CollectionError),
}

/// Everything loaded from one content root.
#[derive(Debug, Clone)]
pub struct Site {
    pub root: PathBuf,
    pub config: SiteConfig,
    pub data: SiteData,
    pub posts: PostCollection,
    diagnostics: Vec<Diagnostic>,
}

/// Serialized view of a [`Site`] for the rendering layer.
#[derive(Debug, Serialize)]
pub struct Manifest<'a> {
    pub presentation: &'a Presentation,
    pub projects: &'a [Project],
    pub posts: Vec<&'a PostMeta>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub drafts: Vec<&'a PostMeta>,
    pub diagnostics: &'a [Diagnostic],
}

/// Load config, data tables, and posts from `root`.
pub fn load_site(root: &Path) -> Result<Site, ScanError> {
    let config = config::load_config(root)?;
    tracing::debug!(root = %root.display(), ?config, "loaded config");
    load_site_with(root, config)
}

/// Load data tables and posts from `root` with an already-loaded config.
pub fn load_site_with(root: &Path, config: SiteConfig) -> Result<Site, ScanError> {
    let site_data = data::load_site_data(root, &config.data_file)?;
    let mut diagnostics = site_data.validate(Path::new(&config.data_file));

    let posts_dir = root.join(&config.content.posts_dir);
    let posts = PostCollection::load(&posts_dir, &config.content)?;
    diagnostics.extend(posts.diagnostics().iter().cloned().map(|mut d| {
        d.path = d.path.map(|p| Path::new(&config.content.posts_dir).join(p));
        d
    }));

    let (errors, warnings) = diagnostics::tally(&diagnostics);
    tracing::info!(
        posts = posts.len(),
        projects = site_data.projects.len(),
        errors,
        warnings,
        "content loaded"
    );

    Ok(Site {
        root: root.to_path_buf(),
        config,
        data: site_data,
        posts,
        diagnostics,
    })
}

impl Site {
    /// Diagnostics from the data tables and the posts, paths relative to the
    /// content root.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn manifest(&self) -> Manifest<'_> {
        let drafts = match self.posts.audience() {
            Audience::Preview => self.posts.list_drafts(),
            Audience::Public => Vec::new(),
        };
        Manifest {
            presentation: &self.data.presentation,
            projects: &self.data.projects,
            posts: self.posts.list_published(),
            drafts,
            diagnostics: &self.diagnostics,
        }
    }

    /// Write the manifest as pretty JSON into `output_dir`, returning its path.
    pub fn write_manifest(&self, output_dir: &Path) -> Result<PathBuf, ScanError> {
        fs::create_dir_all(output_dir)?;
        let path = output_dir.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(&self.manifest())?;
        fs::write(&path, json)?;
        Ok(path)
    }
}
