//! Release metadata sources.
//!
//! The site only ever talks to GitHub, but the pipelines depend on the
//! [`Provider`] trait so they can be driven by a mock in tests.

mod github;

use anyhow::Result;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

pub use github::{DEFAULT_API_URL, GitHubProvider};

/// Number of releases requested by the changelog, in a single page.
pub const RELEASES_PER_PAGE: usize = 100;

/// Repository identifier (owner/repo format).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for RepoId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            anyhow::bail!("Invalid repository format. Expected 'owner/repo'.")
        } else {
            Ok(RepoId {
                owner: parts[0].to_string(),
                repo: parts[1].to_string(),
            })
        }
    }
}

/// A downloadable asset from a release.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseAsset {
    pub name: String,
    pub size: u64,
    pub download_url: String,
}

/// A published version of the tool.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Release {
    /// Version tag (e.g., "v1.0.0")
    pub tag: String,
    /// Release name/title
    pub name: Option<String>,
    /// Publication date (ISO 8601)
    pub published_at: Option<String>,
    /// Release notes in Markdown
    pub body: Option<String>,
    /// Release page on the hosting site
    pub html_url: Option<String>,
    /// Downloadable assets
    pub assets: Vec<ReleaseAsset>,
}

/// Trait for release metadata providers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Provider: Send + Sync {
    /// Fetch the most recent release.
    async fn get_latest_release(&self, repo: &RepoId) -> Result<Release>;

    /// Fetch up to [`RELEASES_PER_PAGE`] releases, newest first.
    async fn get_releases(&self, repo: &RepoId) -> Result<Vec<Release>>;
}
