//! HTML site generation.
//!
//! Stage 2 of a build. Takes the scan [`Manifest`] and writes the static
//! pages.
//!
//! ## Generated Pages
//!
//! - **Homepage** (`/index.html`): links section from config, then one link
//!   per post under a "Blog Posts" header
//! - **Post pages** (`/posts/{slug}/index.html`): the post title and two
//!   links to its notebook, one opening it in Colab and one showing the
//!   pre-rendered notebook on GitHub
//!
//! ## Output Structure
//!
//! ```text
//! site/
//! ├── index.html                   # Homepage
//! └── posts/
//!     ├── a-post/
//!     │   ├── a_post.ipynb         # Source, untouched
//!     │   └── index.html           # Post page
//!     └── b-post/
//!         └── index.html
//! ```
//!
//! Existing pages are overwritten. Rendering is deterministic, so building an
//! unchanged site twice leaves identical bytes on disk.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.

use crate::config::{self, RepositoryUrls, SiteConfig};
use crate::scan::{Manifest, Post};
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

/// A page written to disk, for CLI reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPage {
    pub title: String,
    /// Path relative to the output directory, `/`-separated.
    pub path: String,
}

const POST_LIST_HEADING: &str = "Blog Posts";
const VIEWER_LINK_TEXT: &str = "Explore the post in your browser using Colab";
const SOURCE_LINK_TEXT: &str = "See the pre-rendered post on GitHub";

/// Write every post page, then the homepage, under `output_dir`.
///
/// Returns the written pages with the homepage first.
pub fn generate(manifest: &Manifest, output_dir: &Path) -> Result<Vec<GeneratedPage>, GenerateError> {
    let urls = manifest.config.repository.urls()?;

    let mut written = Vec::with_capacity(manifest.posts.len() + 1);
    written.push(GeneratedPage {
        title: manifest.config.title.clone(),
        path: "index.html".to_string(),
    });

    for post in &manifest.posts {
        let post_dir = output_dir.join(&post.path);
        fs::create_dir_all(&post_dir)?;

        let page = render_post_page(post, &urls);
        fs::write(post_dir.join("index.html"), page.into_string())?;
        written.push(GeneratedPage {
            title: post.title.clone(),
            path: format!("{}/index.html", post.path),
        });
    }

    fs::create_dir_all(output_dir)?;
    let homepage = render_homepage(&manifest.posts, &manifest.config);
    fs::write(output_dir.join("index.html"), homepage.into_string())?;

    Ok(written)
}

/// Homepage link for a post: `site_url` joined with the post page path.
pub fn post_link(site_url: &str, post: &Post) -> String {
    let page = format!("{}/index.html", post.path);
    if site_url.is_empty() {
        page
    } else if site_url.ends_with('/') {
        format!("{}{}", site_url, page)
    } else {
        format!("{}/{}", site_url, page)
    }
}

// ============================================================================
// HTML Components
// ============================================================================

fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                title { (title) }
            }
            body {
                (content)
            }
        }
    }
}

fn section_header(text: &str) -> Markup {
    html! {
        header {
            h3 { (text) }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders a post page linking to the post's notebook.
pub fn render_post_page(post: &Post, urls: &RepositoryUrls) -> Markup {
    let viewer = format!("{}/{}", urls.viewer_base, post.notebook_path);
    let source = format!("{}/{}", urls.source_base, post.notebook_path);

    let content = html! {
        (section_header(&post.title))
        div {
            a href=(viewer) { (VIEWER_LINK_TEXT) }
        }
        div {
            a href=(source) { (SOURCE_LINK_TEXT) }
        }
    };

    base_document(&post.title, content)
}

/// Renders the homepage: optional links section, then the post list.
pub fn render_homepage(posts: &[Post], config: &SiteConfig) -> Markup {
    let content = html! {
        h1 { (config.title) }
        @if !config.links.is_empty() {
            article {
                (section_header(&config.about_heading))
                @for link in &config.links {
                    div {
                        (link.text) " "
                        a href=(link.url) { (link.label.as_deref().unwrap_or(&link.url)) }
                    }
                }
            }
        }
        (section_header(POST_LIST_HEADING))
        @for post in posts {
            div {
                a href=(post_link(&config.site_url, post)) { (post.title) }
            }
        }
    };

    base_document(&config.title, content)
}
