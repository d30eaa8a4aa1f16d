//! Front-matter parsing for post files.
//!
//! A post file starts with a YAML metadata block fenced by `---` lines,
//! followed by the body:
//!
//! ```text
//! ---
//! title: "Hello, world"
//! publishedAt: 2024-01-01
//! description: ""
//! slug: "hello-world"
//! isPublish: true
//! tags: [rust, web]          # unknown keys are ignored
//! ---
//! Body text, opaque to this module.
//! ```
//!
//! ## Delimiters
//!
//! - The first line must be the opening `---` (an optional UTF-8 BOM is
//!   skipped). A file without it is rejected.
//! - The block ends at the next `---` line. A block that never closes is
//!   rejected; everything after the closing line is the body, byte for byte.
//! - Both `\n` and `\r\n` line endings are accepted.
//!
//! The block between the delimiters is handed to `serde_yaml`, so any YAML
//! mapping is accepted: quoted or plain scalars, comments, lists, nested
//! maps, and `|` / `>` block scalars. Error line numbers are file lines.
//!
//! ## Typed keys
//!
//! | Key | Type | Required |
//! |-----|------|----------|
//! | `title` | non-empty string | yes |
//! | `publishedAt` | `YYYY-MM-DD` or RFC 3339 date-time | yes |
//! | `description` | string | no, defaults to `""` |
//! | `slug` | URL-safe string, taken verbatim | yes |
//! | `isPublish` | unquoted `true` / `false` | yes |
//!
//! `published_at` and `is_publish` are accepted as aliases; giving both
//! spellings of a key is an error.

use crate::types::PostMeta;
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use serde_yaml::Value;
use thiserror::Error;

const DELIMITER: &str = "---";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrontMatterError {
    #[error("missing opening `---` delimiter on the first line")]
    MissingOpeningDelimiter,
    #[error("front-matter block is never closed with `---`")]
    Unterminated,
    #[error("invalid YAML: {message}")]
    Yaml {
        /// 1-based file line, when the YAML parser reports one.
        line: Option<usize>,
        message: String,
    },
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("invalid value `{value}` for `{key}`: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl From<serde_yaml::Error> for FrontMatterError {
    fn from(err: serde_yaml::Error) -> Self {
        FrontMatterError::Yaml {
            line: err.location().map(|loc| loc.line()),
            message: err.to_string(),
        }
    }
}

/// Typed front-matter of one post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: String,
    pub published_at: NaiveDate,
    pub description: String,
    pub slug: String,
    pub is_publish: bool,
}

impl FrontMatter {
    /// Attach the source path the front-matter was read from.
    pub fn into_meta(self, source: String) -> PostMeta {
        PostMeta {
            title: self.title,
            published_at: self.published_at,
            description: self.description,
            slug: self.slug,
            is_publish: self.is_publish,
            source,
        }
    }
}

/// A post file split into its front-matter and its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPost {
    pub front_matter: FrontMatter,
    pub body: String,
}

/// The known keys as YAML wrote them, before type checks.
///
/// Values stay untyped so a quoted `"true"` can be told apart from `true`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFrontMatter {
    title: Option<Value>,
    #[serde(rename = "publishedAt", alias = "published_at")]
    published_at: Option<Value>,
    description: Option<Value>,
    slug: Option<Value>,
    #[serde(rename = "isPublish", alias = "is_publish")]
    is_publish: Option<Value>,
}

/// Parse the full text of a post file.
pub fn parse_post(text: &str) -> Result<ParsedPost, FrontMatterError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let (document, body) = split_block(text)?;
    // The opening `---` doubles as a YAML document marker, so line numbers in
    // parser errors line up with the file. An empty block is a null document.
    let raw: Option<RawFrontMatter> = serde_yaml::from_str(document)?;
    let front_matter = coerce(raw.unwrap_or_default())?;
    Ok(ParsedPost {
        front_matter,
        body: body.to_string(),
    })
}

/// Split `text` into the YAML document (opening delimiter included) and the body.
fn split_block(text: &str) -> Result<(&str, &str), FrontMatterError> {
    let mut lines = text.split_inclusive('\n');

    let first = lines
        .next()
        .ok_or(FrontMatterError::MissingOpeningDelimiter)?;
    if !is_delimiter(first) {
        return Err(FrontMatterError::MissingOpeningDelimiter);
    }

    let mut offset = first.len();
    for line in lines {
        if is_delimiter(line) {
            return Ok((&text[..offset], &text[offset + line.len()..]));
        }
        offset += line.len();
    }
    Err(FrontMatterError::Unterminated)
}

fn is_delimiter(line: &str) -> bool {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);
    line.trim_end() == DELIMITER
}

fn coerce(raw: RawFrontMatter) -> Result<FrontMatter, FrontMatterError> {
    let title = string_field("title", required("title", raw.title)?)?;
    if title.trim().is_empty() {
        return Err(FrontMatterError::InvalidValue {
            key: "title",
            value: title,
            reason: "must not be empty",
        });
    }

    let published_at = parse_date(required("publishedAt", raw.published_at)?)?;

    let description = match raw.description {
        Some(value) => string_field("description", value)?,
        None => String::new(),
    };

    let slug = string_field("slug", required("slug", raw.slug)?)?;
    if !is_url_safe_slug(&slug) {
        return Err(FrontMatterError::InvalidValue {
            key: "slug",
            value: slug,
            reason: "must be non-empty and use only letters, digits, `-`, `_`, `.` or `~`",
        });
    }

    let is_publish = match required("isPublish", raw.is_publish)? {
        Value::Bool(flag) => flag,
        other => return Err(invalid("isPublish", &other, "expected an unquoted `true` or `false`")),
    };

    Ok(FrontMatter {
        title,
        published_at,
        description,
        slug,
        is_publish,
    })
}

fn required(key: &'static str, value: Option<Value>) -> Result<Value, FrontMatterError> {
    match value {
        None | Some(Value::Null) => Err(FrontMatterError::MissingField(key)),
        Some(value) => Ok(value),
    }
}

/// Scalars are read as text; `title: 2024` is the string `"2024"`.
fn string_field(key: &'static str, value: Value) -> Result<String, FrontMatterError> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(invalid(key, &other, "expected a string")),
    }
}

fn invalid(key: &'static str, value: &Value, reason: &'static str) -> FrontMatterError {
    let value = match value {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    };
    FrontMatterError::InvalidValue { key, value, reason }
}

fn parse_date(value: Value) -> Result<NaiveDate, FrontMatterError> {
    const REASON: &str = "expected a `YYYY-MM-DD` date";
    let Value::String(text) = &value else {
        return Err(invalid("publishedAt", &value, REASON));
    };
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.date_naive())
        .map_err(|_| invalid("publishedAt", &value, REASON))
}

/// Slugs are used verbatim as URL path segments.
pub fn is_url_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~'))
}
