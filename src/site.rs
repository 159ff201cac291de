//! Assembles the page fragments from the three independent pipelines.

use anyhow::Result;
use log::info;
use std::path::Path;

use crate::catalog::{self, CatalogSource, Filter};
use crate::changelog::{self, PageLocation};
use crate::http::HttpClient;
use crate::provider::{Provider, RepoId};
use crate::release_info;
use crate::runtime::Runtime;

pub const DOWNLOAD_FRAGMENT: &str = "download.html";
pub const CHANGELOG_FRAGMENT: &str = "changelog.html";
pub const UPDATES_FRAGMENT: &str = "updates.html";

/// Rendered HTML for each section of the site.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteFragments {
    pub download: String,
    pub changelog: String,
    pub updates: String,
    /// Header date of the catalog, when it loaded and had entries.
    pub updates_date: Option<String>,
}

pub struct SiteInputs<'a> {
    pub repo: &'a RepoId,
    pub catalog: &'a CatalogSource,
    pub location: &'a PageLocation,
    pub filter: &'a Filter,
}

/// Runs every pipeline concurrently. A failure in one only affects its own
/// fragment.
#[tracing::instrument(skip_all)]
pub async fn build<P: Provider + ?Sized, R: Runtime>(
    provider: &P,
    runtime: &R,
    http_client: &HttpClient,
    inputs: SiteInputs<'_>,
) -> SiteFragments {
    let (info, releases, entries) = tokio::join!(
        release_info::fetch(provider, inputs.repo),
        changelog::fetch(provider, inputs.repo),
        catalog::load(runtime, http_client, inputs.catalog),
    );

    SiteFragments {
        download: release_info::render_download_panel(&info),
        changelog: changelog::render_changelog(&releases, inputs.location),
        updates: catalog::render_catalog(&entries, inputs.filter),
        updates_date: entries.as_ref().ok().and_then(|e| catalog::latest_date(e)),
    }
}

/// Writes each fragment into `out_dir`.
pub fn write<R: Runtime>(runtime: &R, out_dir: &Path, fragments: &SiteFragments) -> Result<()> {
    runtime.create_dir_all(out_dir)?;
    for (name, html) in [
        (DOWNLOAD_FRAGMENT, &fragments.download),
        (CHANGELOG_FRAGMENT, &fragments.changelog),
        (UPDATES_FRAGMENT, &fragments.updates),
    ] {
        let path = out_dir.join(name);
        runtime.write(&path, html.as_bytes())?;
        info!("Wrote {}", path.display());
    }
    Ok(())
}
