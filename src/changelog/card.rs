use chrono::DateTime;

use crate::markdown::{self, escape_html};
use crate::provider::Release;

use super::permalink::{PageLocation, permalink};

/// Shown when a release has no publication date.
pub const UNKNOWN_DATE: &str = "Unknown date";

/// Everything needed to render one changelog card.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseCard {
    /// Anchor id and displayed version. Falls back to the release name.
    pub tag: String,
    pub release_url: String,
    pub is_latest: bool,
    pub date: String,
    pub permalink: String,
    pub body_html: String,
}

impl ReleaseCard {
    pub fn new(release: &Release, is_latest: bool, location: &PageLocation) -> Self {
        let tag = if !release.tag.is_empty() {
            release.tag.clone()
        } else {
            release
                .name
                .clone()
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Unknown".to_string())
        };

        Self {
            permalink: permalink(location, &tag),
            release_url: release.html_url.clone().unwrap_or_else(|| "#".to_string()),
            is_latest,
            date: release
                .published_at
                .as_deref()
                .and_then(format_long_date)
                .unwrap_or_else(|| UNKNOWN_DATE.to_string()),
            body_html: markdown::to_html(release.body.as_deref().unwrap_or_default()),
            tag,
        }
    }

    pub fn render(&self) -> String {
        let tag = escape_html(&self.tag);
        let badge = if self.is_latest {
            r#"<span class="latest-badge">LATEST</span>"#
        } else {
            ""
        };

        format!(
            r#"<div class="release-card" id="{tag}">
    <div class="release-header">
        <div class="release-title-row">
            <a href="{url}" target="_blank" rel="noopener" class="release-version">
                <i class="fas fa-tag"></i> {tag}
            </a>
            {badge}
        </div>
        <div class="release-meta">
            <span class="release-date"><i class="far fa-calendar-alt"></i> {date}</span>
            <button class="copy-link-btn" data-link="{link}" title="Copy link to this release">
                <i class="fas fa-link"></i>
            </button>
        </div>
    </div>
    <div class="release-body">{body}</div>
</div>
"#,
            url = escape_html(&self.release_url),
            date = escape_html(&self.date),
            link = escape_html(&self.permalink),
            body = self.body_html,
        )
    }
}

/// Formats an ISO-8601 timestamp as e.g. `January 5, 2025`.
///
/// The calendar date is taken in the timestamp's own offset.
pub fn format_long_date(iso: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(iso)
        .ok()
        .map(|d| d.format("%B %-d, %Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location() -> PageLocation {
        PageLocation::new("https://example.com", "/whatsnew.html")
    }

    fn release(tag: &str) -> Release {
        Release {
            tag: tag.to_string(),
            published_at: Some("2025-01-05T18:30:00Z".to_string()),
            body: Some("- fixed <things>".to_string()),
            html_url: Some(format!("https://github.com/o/r/releases/tag/{tag}")),
            ..Default::default()
        }
    }

    #[test]
    fn test_format_long_date() {
        assert_eq!(
            format_long_date("2025-01-05T18:30:00Z").as_deref(),
            Some("January 5, 2025")
        );
        assert_eq!(
            format_long_date("2024-12-31T23:00:00-05:00").as_deref(),
            Some("December 31, 2024")
        );
        assert_eq!(format_long_date("yesterday"), None);
    }

    #[test]
    fn test_card_fields() {
        let card = ReleaseCard::new(&release("v2.1.13-beta"), true, &location());

        assert_eq!(card.tag, "v2.1.13-beta");
        assert_eq!(card.date, "January 5, 2025");
        assert_eq!(
            card.permalink,
            "https://example.com/whatsnew.html#v2.1.13-beta"
        );
        assert_eq!(card.body_html, "<ul>\n  <li>fixed &lt;things&gt;</li>\n</ul>\n");
    }

    #[test]
    fn test_card_defaults_for_missing_fields() {
        let bare = Release {
            name: Some("Hotfix".to_string()),
            ..Default::default()
        };
        let card = ReleaseCard::new(&bare, false, &location());

        assert_eq!(card.tag, "Hotfix");
        assert_eq!(card.release_url, "#");
        assert_eq!(card.date, UNKNOWN_DATE);
        assert_eq!(card.body_html, markdown::fallback_html());

        let card = ReleaseCard::new(&Release::default(), false, &location());
        assert_eq!(card.tag, "Unknown");
    }

    #[test]
    fn test_render_latest_badge() {
        let html = ReleaseCard::new(&release("v2"), true, &location()).render();
        assert!(html.contains(r#"<div class="release-card" id="v2">"#));
        assert!(html.contains("LATEST"));

        let html = ReleaseCard::new(&release("v1"), false, &location()).render();
        assert!(!html.contains("LATEST"));
    }

    #[test]
    fn test_render_escapes_tag() {
        let html = ReleaseCard::new(&release(r#"v1"><b>"#), false, &location()).render();
        assert!(html.contains(r#"id="v1&quot;&gt;&lt;b&gt;""#));
        assert!(!html.contains("<b>"));
    }
}
