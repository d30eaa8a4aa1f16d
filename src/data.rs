//! Static data tables: the presentation block and the project list.
//!
//! Both are hand-authored in `site.toml` at the content root and loaded once
//! into an immutable [`SiteData`]. Shape errors (missing fields, unknown keys,
//! relative URLs) fail the load. Softer problems, like a shipped project
//! without techs, are reported by [`SiteData::validate`] as warnings.
//!
//! ```toml
//! [presentation]
//! mail = "ada@example.com"
//! title = "Hi, I'm Ada"
//! description = "I build compilers and write about them."
//! profile = "/profile.webp"             # optional
//!
//! [[presentation.socials]]
//! label = "GitHub"
//! link = "https://github.com/ada"
//!
//! [[projects]]
//! title = "folio"
//! techs = ["Rust"]
//! link = "https://github.com/ada/folio"
//! is_coming_soon = false                # optional
//! ```

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::types::{Presentation, Project};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Data file not found: {0}")]
    Missing(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid data file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// The presentation and project tables of one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteData {
    pub presentation: Presentation,
    /// Display order is authoring order.
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl SiteData {
    /// Projects that are not flagged as coming soon, in authoring order.
    pub fn shipped_projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|p| p.is_shipped())
    }

    /// Projects flagged as coming soon, in authoring order.
    pub fn upcoming_projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|p| p.is_coming_soon)
    }

    /// Report soft problems. `path` is attached to every diagnostic.
    pub fn validate(&self, path: &Path) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        let p = &self.presentation;
        for (field, value) in [("mail", &p.mail), ("title", &p.title)] {
            if value.trim().is_empty() {
                diagnostics.push(Diagnostic::new(
                    path,
                    DiagnosticKind::EmptyPresentationField { field },
                ));
            }
        }

        let mut seen = HashSet::new();
        for project in &self.projects {
            if project.is_shipped() && project.techs.is_empty() {
                diagnostics.push(Diagnostic::new(
                    path,
                    DiagnosticKind::ProjectWithoutTechs {
                        title: project.title.clone(),
                    },
                ));
            }
            if !seen.insert(project.title.as_str()) {
                diagnostics.push(Diagnostic::new(
                    path,
                    DiagnosticKind::DuplicateProject {
                        title: project.title.clone(),
                    },
                ));
            }
        }

        diagnostics
    }
}

/// Parse the tables from TOML text.
pub fn parse_site_data(text: &str) -> Result<SiteData, toml::de::Error> {
    toml::from_str(text)
}

/// Load `<root>/<file_name>`.
///
/// The file is required: the tables are never synthesized from defaults.
pub fn load_site_data(root: &Path, file_name: &str) -> Result<SiteData, DataError> {
    let path = root.join(file_name);
    if !path.is_file() {
        return Err(DataError::Missing(path));
    }
    let text = fs::read_to_string(&path)?;
    parse_site_data(&text).map_err(|source| DataError::Toml { path, source })
}

/// Returns a commented starter `site.toml`.
///
/// Used by the `init-data` CLI command.
pub fn stock_site_toml() -> &'static str {
    r#"# folio site data
# ================
# The presentation block and the project list shown on the site.
# Unknown keys and malformed URLs are rejected.

[presentation]
mail = "you@example.com"
title = "Hi, I'm You"
description = "A short paragraph about what you do."
# Path to a profile picture, relative to the site root (optional).
# profile = "/profile.webp"

# Any number of social links, in display order.
[[presentation.socials]]
label = "GitHub"
link = "https://github.com/you"

# Projects, in display order.
[[projects]]
title = "My project"
techs = ["Rust"]
link = "https://github.com/you/my-project"

[[projects]]
title = "Something new"
link = "https://example.com/something-new"
# Shown as "coming soon"; techs may stay empty until it ships.
is_coming_soon = true
"#
}
