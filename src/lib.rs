//! # nbpress
//!
//! A minimal static site generator for a blog whose posts are notebooks, plus
//! a small download helper.
//!
//! # Site Builder
//!
//! The filesystem is the data source. Every directory under `posts/` is a
//! post, its name is the slug, and the single notebook inside it is the
//! content. nbpress never parses notebooks; it links to them:
//!
//! ```text
//! 1. Scan      posts/   →  Manifest      (directories → sorted posts)
//! 2. Generate  Manifest →  index.html    (homepage + one page per post)
//! ```
//!
//! Each post page links the notebook twice, once opened in Colab and once
//! rendered on GitHub. The homepage lists every post by title, in directory
//! order. Everything is rebuilt on each run and the output is deterministic.
//!
//! # Fetcher
//!
//! [`fetch::fetch`] streams one URL to a file in 8 KiB reads and reports
//! progress every few percent. It needs `Content-Length` to do so.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — lists the posts root and produces the [`scan::Manifest`] |
//! | [`generate`] | Stage 2 — renders post pages and the homepage with Maud |
//! | [`naming`] | slug → display title |
//! | [`config`] | `site.toml` loading, defaults, validation |
//! | [`fetch`] | single-GET download with progress events |
//! | [`output`] | CLI output formatting |

pub mod config;
pub mod fetch;
pub mod generate;
pub mod naming;
pub mod output;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
