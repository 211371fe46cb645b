//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Posts
//! 001 A Post
//!     Notebook: posts/a-post/a_post.ipynb
//! 002 My First Post
//!     Notebook: posts/my-first-post/analysis.ipynb
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! 001 A Post → posts/a-post/index.html
//! 002 My First Post → posts/my-first-post/index.html
//!
//! Generated 2 posts
//! ```
//!
//! ## Fetch
//!
//! ```text
//! Downloading: weights.npz Bytes: 100000
//!       8192  [8.19%]
//!     100000  [100.00%]
//! Saved 100000 bytes to weights.npz
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::fetch::FetchEvent;
use crate::generate::GeneratedPage;
use crate::scan::Manifest;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = vec!["Posts".to_string()];
    if manifest.posts.is_empty() {
        lines.push("    (none)".to_string());
    }
    for (i, post) in manifest.posts.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), post.title));
        lines.push(format!("    Notebook: {}", post.notebook_path));
    }
    lines
}

pub fn print_check_output(manifest: &Manifest) {
    for line in format_check_output(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

/// Expects the homepage first, as returned by [`crate::generate::generate`].
pub fn format_build_output(pages: &[GeneratedPage]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut posts = pages.iter();
    if let Some(home) = posts.next() {
        lines.push(format!("Home → {}", home.path));
    }
    let mut count = 0;
    for (i, page) in posts.enumerate() {
        lines.push(format!("{} {} → {}", format_index(i + 1), page.title, page.path));
        count += 1;
    }
    lines.push(String::new());
    lines.push(format!("Generated {}", plural(count, "post")));
    lines
}

pub fn print_build_output(pages: &[GeneratedPage]) {
    for line in format_build_output(pages) {
        println!("{}", line);
    }
}

// ============================================================================
// Fetch
// ============================================================================

pub fn format_fetch_event(event: &FetchEvent) -> Vec<String> {
    match event {
        FetchEvent::Started {
            destination,
            total_bytes,
        } => vec![format!(
            "Downloading: {} Bytes: {}",
            destination.display(),
            total_bytes
        )],
        FetchEvent::Progress(p) => vec![format!("{:>10}  [{:.2}%]", p.bytes, p.percent)],
        FetchEvent::Finished { .. } => Vec::new(),
    }
}

pub fn print_fetch_event(event: &FetchEvent) {
    for line in format_fetch_event(event) {
        println!("{}", line);
    }
}

pub fn format_fetch_summary(bytes: u64, destination: &std::path::Path) -> String {
    format!("Saved {} bytes to {}", bytes, destination.display())
}
