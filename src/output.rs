//! CLI output formatting.
//!
//! Output is information-first: each entity leads with its positional index
//! and title, and the source file is shown as an indented `Source:` line.
//!
//! ## Scan
//!
//! ```text
//! Posts
//! 001 2025-01-01 A new year
//!     Source: 2025-01-01-new-year.md
//! 002 2024-06-15 Notes on Rust's borrow checker
//!     Source: notes-on-rust/index.md
//!
//! Drafts
//! 001 2025-03-01 Work in progress
//!     Source: draft-post.md
//!
//! Projects
//! 001 folio [Rust, TOML]
//! 002 Field notes (coming soon)
//!
//! Diagnostics
//!     error: posts/broken.md: malformed front-matter: ...
//!
//! 3 published, 1 draft, 2 projects, 1 error, 0 warnings
//! ```
//!
//! Each section has a `format_*` function returning `Vec<String>` and, where
//! the CLI needs it, a `print_*` wrapper that writes to stdout. Format
//! functions are pure.

use crate::diagnostics::{self, Diagnostic};
use crate::scan::Site;
use crate::types::{Post, PostMeta, Project};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte, _)) => format!("{}...", &text[..byte]),
        None => text.to_string(),
    }
}

fn plural(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

/// `001 2024-01-01 Title` header plus indented description and source.
fn post_entry(index: usize, meta: &PostMeta) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {} {}",
        format_index(index),
        meta.published_at,
        meta.title
    )];
    let desc = truncate_desc(meta.description.trim(), 60);
    if !desc.is_empty() {
        lines.push(format!("{}{}", indent(1), desc));
    }
    lines.push(format!("{}Source: {}", indent(1), meta.source));
    lines
}

fn project_line(index: usize, project: &Project) -> String {
    if project.is_coming_soon {
        format!("{} {} (coming soon)", format_index(index), project.title)
    } else if project.techs.is_empty() {
        format!("{} {}", format_index(index), project.title)
    } else {
        format!(
            "{} {} [{}]",
            format_index(index),
            project.title,
            project.techs.join(", ")
        )
    }
}

/// Format a listing of posts, one entry each.
pub fn format_post_list(posts: &[&PostMeta]) -> Vec<String> {
    posts
        .iter()
        .enumerate()
        .flat_map(|(i, meta)| post_entry(i + 1, meta))
        .collect()
}

/// Format diagnostics, one per line.
pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> Vec<String> {
    diagnostics
        .iter()
        .map(|d| format!("{}{}", indent(1), d))
        .collect()
}

/// One-line summary of a loaded site.
pub fn format_summary(site: &Site) -> String {
    let (errors, warnings) = diagnostics::tally(site.diagnostics());
    format!(
        "{}, {}, {}, {}, {}",
        plural(site.posts.list_published().len(), "published", "published"),
        plural(site.posts.list_drafts().len(), "draft", "drafts"),
        plural(site.data.projects.len(), "project", "projects"),
        plural(errors, "error", "errors"),
        plural(warnings, "warning", "warnings"),
    )
}

/// Format the full scan report: posts, drafts, projects, diagnostics, summary.
pub fn format_scan_output(site: &Site) -> Vec<String> {
    let mut lines = vec!["Posts".to_string()];
    lines.extend(format_post_list(&site.posts.list_published()));

    let drafts = site.posts.list_drafts();
    if !drafts.is_empty() {
        lines.push(String::new());
        lines.push("Drafts".to_string());
        lines.extend(format_post_list(&drafts));
    }

    if !site.data.projects.is_empty() {
        lines.push(String::new());
        lines.push("Projects".to_string());
        lines.extend(
            site.data
                .projects
                .iter()
                .enumerate()
                .map(|(i, p)| project_line(i + 1, p)),
        );
    }

    if !site.diagnostics().is_empty() {
        lines.push(String::new());
        lines.push("Diagnostics".to_string());
        lines.extend(format_diagnostics(site.diagnostics()));
    }

    lines.push(String::new());
    lines.push(format_summary(site));
    lines
}

/// Format a single post: metadata block, blank line, raw body.
pub fn format_post_detail(post: &Post) -> Vec<String> {
    let meta = &post.meta;
    let mut lines = vec![
        format!("Title: {}", meta.title),
        format!("Slug: {}", meta.slug),
        format!("Published at: {}", meta.published_at),
    ];
    if !meta.description.is_empty() {
        lines.push(format!("Description: {}", meta.description));
    }
    if meta.is_draft() {
        lines.push("Status: draft".to_string());
    }
    lines.push(format!("Source: {}", meta.source));
    lines.push(String::new());
    lines.extend(post.body.lines().map(str::to_string));
    lines
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

/// Print scan output to stdout.
pub fn print_scan_output(site: &Site) {
    print_lines(format_scan_output(site));
}

/// Print a post listing to stdout.
pub fn print_post_list(posts: &[&PostMeta]) {
    print_lines(format_post_list(posts));
}

/// Print a single post to stdout.
pub fn print_post_detail(post: &Post) {
    print_lines(format_post_detail(post));
}
