//! Hero update catalog: a static list filtered by category and name.

mod filter;
mod render;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate};
use log::{debug, info, warn};
use serde::Deserialize;
use std::path::PathBuf;

use crate::http::HttpClient;
use crate::runtime::Runtime;

pub use filter::{CategoryFilter, Filter, select};
pub use render::{render_card, render_grid, render_load_error};

/// One catalog entry, as stored in `updates.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateEntry {
    pub hero: String,
    #[serde(default)]
    pub attribute: Option<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Where `updates.json` comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Path(PathBuf),
    Url(String),
}

impl From<&str> for CatalogSource {
    fn from(s: &str) -> Self {
        if s.starts_with("http://") || s.starts_with("https://") {
            CatalogSource::Url(s.to_string())
        } else {
            CatalogSource::Path(PathBuf::from(s))
        }
    }
}

/// Loads the full catalog snapshot.
#[tracing::instrument(skip(runtime, http_client))]
pub async fn load<R: Runtime>(
    runtime: &R,
    http_client: &HttpClient,
    source: &CatalogSource,
) -> Result<Vec<UpdateEntry>> {
    let entries: Vec<UpdateEntry> = match source {
        CatalogSource::Path(path) => {
            debug!("Reading catalog from {}...", path.display());
            let content = runtime.read_to_string(path)?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse catalog {}", path.display()))?
        }
        CatalogSource::Url(url) => http_client
            .get_json(url)
            .await
            .context("Failed to load updates")?,
    };

    info!("Loaded {} catalog entries", entries.len());
    Ok(entries)
}

/// Renders the grid for a load result under the given filter.
pub fn render_catalog(result: &Result<Vec<UpdateEntry>>, filter: &Filter) -> String {
    match result {
        Ok(entries) => render_grid(&select(entries, filter)),
        Err(e) => {
            warn!("Error fetching updates: {:#}", e);
            render_load_error()
        }
    }
}

/// The most recent entry date, formatted like `Jan 5, 2025`.
///
/// Dates are compared as strings, so they must share the `YYYY-MM-DD` form.
pub fn latest_date(entries: &[UpdateEntry]) -> Option<String> {
    let max = entries.iter().map(|e| e.date.as_str()).max()?;
    parse_date(max).map(|d| d.format("%b %-d, %Y").to_string())
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(date).ok().map(|d| d.date_naive()))
}
