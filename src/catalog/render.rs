use crate::markdown::escape_html;

use super::UpdateEntry;

const PLACEHOLDER_IMAGE: &str =
    r#"<div class="placeholder-image"><i class="fas fa-image"></i></div>"#;

/// Swaps a broken image for the placeholder icon.
const IMAGE_ONERROR: &str = r#"this.parentElement.innerHTML='<div class=\'placeholder-image\'><i class=\'fas fa-image\'></i></div>'"#;

/// Renders the visible entries, or a single "no results" panel.
pub fn render_grid(entries: &[&UpdateEntry]) -> String {
    if entries.is_empty() {
        return r#"<div class="no-results">
    <i class="fas fa-search"></i>
    <p>No updates found matching your criteria.</p>
</div>
"#
        .to_string();
    }

    entries.iter().map(|e| render_card(e)).collect()
}

pub fn render_card(entry: &UpdateEntry) -> String {
    let hero = escape_html(&entry.hero);
    let image = match entry.image.as_deref().filter(|i| !i.is_empty()) {
        Some(src) => format!(
            r#"<img src="{}" alt="{hero} update" loading="lazy" onerror="{IMAGE_ONERROR}">"#,
            escape_html(src)
        ),
        None => PLACEHOLDER_IMAGE.to_string(),
    };

    format!(
        r#"<div class="update-card">
    <div class="update-image-container">
        {image}
    </div>
    <div class="update-content">
        <h3 class="update-hero-name">{hero}</h3>
    </div>
</div>
"#
    )
}

/// Shown when the catalog itself cannot be loaded.
pub fn render_load_error() -> String {
    r#"<div class="update-card load-error">
    <i class="fas fa-exclamation-triangle"></i>
    <p>Unable to load updates at this time.</p>
</div>
"#
    .to_string()
}
