//! Non-fatal findings collected while loading content.
//!
//! A malformed post never aborts a load: the file is skipped and a
//! [`Diagnostic`] is recorded instead. Errors mark content that was dropped;
//! warnings mark content that was kept but looks wrong.

use crate::frontmatter::FrontMatterError;
use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    #[error("malformed front-matter: {0}")]
    MalformedFrontMatter(#[from] FrontMatterError),
    #[error("unreadable file: {0}")]
    Unreadable(String),
    #[error("duplicate slug `{slug}`, already used by {kept}")]
    DuplicateSlug { slug: String, kept: String },
    #[error("slug `{slug}` does not match file name (`{filename_slug}`)")]
    SlugMismatch { slug: String, filename_slug: String },
    #[error("publishedAt {published_at} does not match file name date {filename_date}")]
    DateMismatch {
        published_at: NaiveDate,
        filename_date: NaiveDate,
    },
    #[error("no valid posts among {candidates} candidate files")]
    EmptyCollection { candidates: usize },
    #[error("shipped project `{title}` lists no techs")]
    ProjectWithoutTechs { title: String },
    #[error("project title `{title}` appears more than once")]
    DuplicateProject { title: String },
    #[error("presentation field `{field}` is empty")]
    EmptyPresentationField { field: &'static str },
}

impl DiagnosticKind {
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::MalformedFrontMatter(_)
            | DiagnosticKind::Unreadable(_)
            | DiagnosticKind::DuplicateSlug { .. } => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

/// A finding tied to the file it was found in, when there is one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub path: Option<PathBuf>,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(path: impl Into<PathBuf>, kind: DiagnosticKind) -> Self {
        Self {
            path: Some(path.into()),
            kind,
        }
    }

    pub fn global(kind: DiagnosticKind) -> Self {
        Self { path: None, kind }
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}: {}: {}", self.severity(), path.display(), self.kind),
            None => write!(f, "{}: {}", self.severity(), self.kind),
        }
    }
}

impl Serialize for Diagnostic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Diagnostic", 3)?;
        state.serialize_field("severity", self.severity().as_str())?;
        state.serialize_field(
            "path",
            &self.path.as_ref().map(|p| p.to_string_lossy().into_owned()),
        )?;
        state.serialize_field("message", &self.kind.to_string())?;
        state.end()
    }
}

/// Count `(errors, warnings)`.
pub fn tally<'a>(diagnostics: impl IntoIterator<Item = &'a Diagnostic>) -> (usize, usize) {
    diagnostics
        .into_iter()
        .fold((0, 0), |(errors, warnings), d| match d.severity() {
            Severity::Error => (errors + 1, warnings),
            Severity::Warning => (errors, warnings + 1),
        })
}
