//! Record schemas shared by the data tables, the post collection and the
//! manifest.
//!
//! Hand-authored records (`Presentation`, `Project`, `Social`) reject unknown
//! keys and malformed URLs at load time, so a typo in `site.toml` fails the
//! build instead of producing a half-populated record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::Url;

/// A link to one of the site owner's profiles elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Social {
    pub label: String,
    pub link: Url,
}

/// The site owner's presentation block. Exactly one exists per site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Presentation {
    pub mail: String,
    pub title: String,
    pub description: String,
    /// May be empty, never absent.
    #[serde(default)]
    pub socials: Vec<Social>,
    /// Path to a profile picture, relative to the site root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

/// One entry of the project list. Display order is authoring order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub techs: Vec<String>,
    pub link: Url,
    #[serde(default, alias = "isComingSoon")]
    pub is_coming_soon: bool,
}

impl Project {
    /// A shipped project is one that is not flagged as coming soon.
    pub fn is_shipped(&self) -> bool {
        !self.is_coming_soon
    }
}

/// Metadata of a post, as read from its front-matter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMeta {
    pub title: String,
    pub published_at: NaiveDate,
    /// Empty when the front-matter leaves it out.
    pub description: String,
    pub slug: String,
    pub is_publish: bool,
    /// Path of the source file relative to the posts directory, `/`-separated.
    pub source: String,
}

impl PostMeta {
    pub fn is_draft(&self) -> bool {
        !self.is_publish
    }
}

/// A post: its metadata plus the raw body that follows the front-matter.
///
/// The body is opaque at this layer; no markdown is parsed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(flatten)]
    pub meta: PostMeta,
    pub body: String,
}
