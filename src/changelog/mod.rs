//! Changelog page: one card per release, newest first.

mod anchor;
mod card;
mod clipboard;
mod permalink;

use anyhow::Result;
use log::{info, warn};

use crate::markdown::escape_html;
use crate::provider::{Provider, Release, RepoId};

pub use anchor::{
    DEFAULT_NAV_HEIGHT, HIGHLIGHT_DURATION, HashTarget, SCROLL_MARGIN, ScrollPlan, plan_scroll,
    scroll_top,
};
pub use card::{ReleaseCard, UNKNOWN_DATE, format_long_date};
pub use clipboard::{
    CONFIRMATION_DURATION, Clipboard, CopyFeedback, StdoutClipboard, SystemClipboard,
    copy_permalink,
};
pub use permalink::{PageLocation, decode_fragment, encode_fragment, permalink};

/// Fetches the release list. A single request, never retried.
#[tracing::instrument(skip(provider))]
pub async fn fetch<P: Provider + ?Sized>(provider: &P, repo: &RepoId) -> Result<Vec<Release>> {
    let releases = provider.get_releases(repo).await?;
    info!("Loaded {} releases for {}", releases.len(), repo);
    Ok(releases)
}

/// Builds the cards for a release list; the first one is flagged latest.
pub fn build_cards(releases: &[Release], location: &PageLocation) -> Vec<ReleaseCard> {
    releases
        .iter()
        .enumerate()
        .map(|(i, release)| ReleaseCard::new(release, i == 0, location))
        .collect()
}

/// Renders the outcome of a release-list fetch.
///
/// Errors become a single error panel, an empty list a single
/// "no releases" panel.
pub fn render_changelog(result: &Result<Vec<Release>>, location: &PageLocation) -> String {
    match result {
        Err(e) => {
            warn!("Failed to load releases: {:#}", e);
            render_error(&format!("{:#}", e))
        }
        Ok(releases) if releases.is_empty() => render_empty(),
        Ok(releases) => build_cards(releases, location)
            .iter()
            .map(ReleaseCard::render)
            .collect(),
    }
}

fn render_empty() -> String {
    r#"<div class="no-releases">
    <i class="fas fa-inbox"></i>
    <p>No releases found.</p>
</div>
"#
    .to_string()
}

fn render_error(message: &str) -> String {
    format!(
        r#"<div class="no-releases error">
    <i class="fas fa-exclamation-triangle"></i>
    <p>Failed to load releases. Please try again later.</p>
    <small>{}</small>
</div>
"#,
        escape_html(message)
    )
}
