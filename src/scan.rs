//! Post discovery.
//!
//! Stage 1 of a build. Lists the posts root and turns every post directory
//! into a [`Post`], producing a [`Manifest`] that [`crate::generate`] renders.
//!
//! ## Directory Structure
//!
//! ```text
//! site/                            # Site root
//! ├── site.toml                    # Site configuration (optional)
//! └── posts/                       # Posts root
//!     ├── gan-tricks/              # Post → "Gan Tricks"
//!     │   └── gan_tricks.ipynb     # Exactly one notebook
//!     ├── my-first-post/
//!     │   ├── analysis.ipynb
//!     │   └── figure.png           # Other files are ignored
//!     ├── build_all.sh             # Skipped: script suffix
//!     └── utils.py                 # Skipped: script suffix
//! ```
//!
//! ## Validation
//!
//! Every post directory must contain exactly one notebook file. Zero or
//! several candidates are errors rather than an arbitrary pick. Scanning
//! finishes before anything is written, so a bad directory never gets a page.

use crate::config::SiteConfig;
use crate::naming::slug_to_title;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Posts root is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("No notebook found in post directory: {0}")]
    MissingNotebook(PathBuf),
    #[error("More than one notebook in post directory {0}: {1:?}")]
    AmbiguousNotebook(PathBuf, Vec<String>),
}

/// Manifest output from the scan stage.
#[derive(Debug, Serialize)]
pub struct Manifest {
    /// Posts sorted by directory name.
    pub posts: Vec<Post>,
    pub config: SiteConfig,
}

/// A blog post: one directory holding one notebook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// Directory name, e.g. `my-first-post`.
    pub slug: String,
    /// Display title derived from the slug, e.g. `My First Post`.
    pub title: String,
    /// Directory relative to the site root, `/`-separated.
    pub path: String,
    /// Notebook file name inside the directory.
    pub notebook: String,
    /// Notebook path relative to the site root, `/`-separated.
    pub notebook_path: String,
}

/// Scan `root/<posts_dir>` for posts.
pub fn scan(root: &Path, config: &SiteConfig) -> Result<Manifest, ScanError> {
    let posts_root = root.join(&config.posts_dir);
    if !posts_root.is_dir() {
        return Err(ScanError::NotADirectory(posts_root));
    }

    let mut posts = Vec::new();
    for dir in collect_post_dirs(&posts_root, config)? {
        posts.push(build_post(&dir, config)?);
    }

    Ok(Manifest {
        posts,
        config: config.clone(),
    })
}

/// Post directories of the posts root, sorted by name.
fn collect_post_dirs(posts_root: &Path, config: &SiteConfig) -> Result<Vec<PathBuf>, ScanError> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(posts_root)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            let name = file_name(p);
            !name.starts_with('.')
                && !config
                    .skip_suffixes
                    .iter()
                    .any(|suffix| name.ends_with(suffix.as_str()))
                && p.is_dir()
        })
        .collect();

    dirs.sort();
    Ok(dirs)
}

fn build_post(dir: &Path, config: &SiteConfig) -> Result<Post, ScanError> {
    let notebook = find_notebook(dir, &config.notebook_extension)?;
    let slug = file_name(dir);
    let path = format!("{}/{}", config.posts_dir.trim_end_matches('/'), slug);
    let notebook_path = format!("{}/{}", path, notebook);

    Ok(Post {
        title: slug_to_title(&slug),
        slug,
        path,
        notebook,
        notebook_path,
    })
}

/// The single notebook file in `dir`.
fn find_notebook(dir: &Path, extension: &str) -> Result<String, ScanError> {
    let mut candidates: Vec<String> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| is_notebook(p, extension))
        .map(|p| file_name(&p))
        .collect();

    candidates.sort();
    match candidates.len() {
        0 => Err(ScanError::MissingNotebook(dir.to_path_buf())),
        1 => Ok(candidates.remove(0)),
        _ => Err(ScanError::AmbiguousNotebook(dir.to_path_buf(), candidates)),
    }
}

fn is_notebook(path: &Path, extension: &str) -> bool {
    path.is_file()
        && path
            .extension()
            .map(|e| e.to_string_lossy().eq_ignore_ascii_case(extension))
            .unwrap_or(false)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
