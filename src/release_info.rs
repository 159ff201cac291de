//! Download panel: version badge and installer/portable links.

use log::{info, warn};

use crate::markdown::escape_html;
use crate::provider::{Provider, Release, ReleaseAsset, RepoId};

/// Displayed when the latest release cannot be fetched.
pub const FALLBACK_VERSION: &str = "2.1.0-beta";

/// One wired-up download button.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadLink {
    pub url: String,
    pub size_bytes: u64,
}

impl DownloadLink {
    fn from_asset(asset: &ReleaseAsset) -> Self {
        Self {
            url: asset.download_url.clone(),
            size_bytes: asset.size,
        }
    }

    /// Size in mebibytes with one decimal, e.g. `12.3`. Halves round up.
    pub fn size_mib(&self) -> String {
        let mib = self.size_bytes as f64 / 1024.0 / 1024.0;
        format!("{:.1}", (mib * 10.0).round() / 10.0)
    }

    /// The label shown next to the button, e.g. `(12.3 MB)`.
    pub fn size_label(&self) -> String {
        format!("({} MB)", self.size_mib())
    }
}

/// What the download panel shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseInfo {
    pub version: String,
    pub installer: Option<DownloadLink>,
    pub portable: Option<DownloadLink>,
}

impl ReleaseInfo {
    pub fn from_release(release: &Release) -> Self {
        let version = release
            .tag
            .strip_prefix('v')
            .unwrap_or(&release.tag)
            .to_string();

        Self {
            version,
            installer: find_installer(&release.assets).map(DownloadLink::from_asset),
            portable: find_portable(&release.assets).map(DownloadLink::from_asset),
        }
    }

    /// Static version, no download links.
    pub fn fallback() -> Self {
        Self {
            version: FALLBACK_VERSION.to_string(),
            installer: None,
            portable: None,
        }
    }

    pub fn badge(&self) -> String {
        format!("Version {}", self.version)
    }
}

/// First `.exe` asset whose name contains `Setup`.
pub fn find_installer(assets: &[ReleaseAsset]) -> Option<&ReleaseAsset> {
    assets
        .iter()
        .find(|a| a.name.ends_with(".exe") && a.name.contains("Setup"))
}

/// First `.zip` asset.
pub fn find_portable(assets: &[ReleaseAsset]) -> Option<&ReleaseAsset> {
    assets.iter().find(|a| a.name.ends_with(".zip"))
}

/// Fetches the latest release, falling back to [`ReleaseInfo::fallback`]
/// on any failure.
#[tracing::instrument(skip(provider))]
pub async fn fetch<P: Provider + ?Sized>(provider: &P, repo: &RepoId) -> ReleaseInfo {
    match provider.get_latest_release(repo).await {
        Ok(release) => {
            info!("Loaded release: {}", release.tag);
            ReleaseInfo::from_release(&release)
        }
        Err(e) => {
            warn!("Could not fetch latest release, using fallback: {:#}", e);
            ReleaseInfo::fallback()
        }
    }
}

/// Renders the version badge and the two download buttons.
///
/// A button without a matching asset keeps no `href` and no size.
pub fn render_download_panel(info: &ReleaseInfo) -> String {
    format!(
        r#"<div class="download-panel">
    <span id="version-text">{badge}</span>
{installer}{portable}</div>
"#,
        badge = escape_html(&info.badge()),
        installer = render_button(
            "download-installer",
            "installer-size",
            "fab fa-windows",
            "Download Installer",
            info.installer.as_ref()
        ),
        portable = render_button(
            "download-portable",
            "portable-size",
            "fas fa-file-archive",
            "Download Portable",
            info.portable.as_ref()
        ),
    )
}

fn render_button(
    id: &str,
    size_id: &str,
    icon: &str,
    label: &str,
    link: Option<&DownloadLink>,
) -> String {
    let (href, size) = match link {
        Some(link) => (
            format!(r#" href="{}""#, escape_html(&link.url)),
            link.size_label(),
        ),
        None => (String::new(), String::new()),
    };

    format!(
        r#"    <a id="{id}" class="btn btn-download"{href}>
        <i class="{icon}"></i> {label} <span id="{size_id}">{size}</span>
    </a>
"#
    )
}
