use std::fmt;
use std::str::FromStr;

use super::UpdateEntry;

/// Which category tag to show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "" | "all" => CategoryFilter::All,
            tag => CategoryFilter::Only(tag.to_string()),
        })
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Only(tag) => write!(f, "{}", tag),
        }
    }
}

/// Immutable filter criteria, rebuilt on every input change.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Filter {
    pub category: CategoryFilter,
    search: String,
}

impl Filter {
    pub fn new(category: CategoryFilter, search: &str) -> Self {
        Self {
            category,
            search: search.trim().to_lowercase(),
        }
    }

    /// The normalized (trimmed, lowercased) search text.
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn matches(&self, entry: &UpdateEntry) -> bool {
        let category_matches = match &self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(tag) => entry.attribute.as_deref() == Some(tag.as_str()),
        };

        category_matches && entry.hero.to_lowercase().contains(&self.search)
    }
}

/// Entries visible under `filter`, in snapshot order.
pub fn select<'a>(entries: &'a [UpdateEntry], filter: &Filter) -> Vec<&'a UpdateEntry> {
    entries.iter().filter(|e| filter.matches(e)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(hero: &str, attribute: Option<&str>) -> UpdateEntry {
        UpdateEntry {
            hero: hero.to_string(),
            attribute: attribute.map(str::to_string),
            date: "2025-01-01".to_string(),
            image: None,
        }
    }

    fn catalog() -> Vec<UpdateEntry> {
        vec![
            entry("Dragon Knight", Some("str")),
            entry("Jakiro", Some("int")),
            entry("Shadow Demon", Some("int")),
            entry("Dragonfly", Some("agi")),
            entry("Drow Ranger", Some("agi")),
            entry("Snapfire", None),
        ]
    }

    fn heroes(selected: &[&UpdateEntry]) -> Vec<String> {
        selected.iter().map(|e| e.hero.clone()).collect()
    }

    #[test]
    fn test_default_filter_shows_everything() {
        let entries = catalog();
        assert_eq!(select(&entries, &Filter::default()).len(), entries.len());
    }

    #[test]
    fn test_category_and_search_combine() {
        let entries = catalog();
        let filter = Filter::new(CategoryFilter::Only("agi".into()), "drag");
        assert_eq!(heroes(&select(&entries, &filter)), vec!["Dragonfly"]);
    }

    #[test]
    fn test_search_is_case_insensitive_and_trimmed() {
        let entries = catalog();
        let filter = Filter::new(CategoryFilter::All, "  DRAG ");
        assert_eq!(
            heroes(&select(&entries, &filter)),
            vec!["Dragon Knight", "Dragonfly"]
        );
    }

    #[test]
    fn test_entries_without_category_only_match_all() {
        let entries = catalog();
        let filter = Filter::new(CategoryFilter::Only("uni".into()), "");
        assert!(select(&entries, &filter).is_empty());

        let filter = Filter::new(CategoryFilter::All, "snap");
        assert_eq!(heroes(&select(&entries, &filter)), vec!["Snapfire"]);
    }

    #[test]
    fn test_select_does_not_mutate_snapshot() {
        let entries = catalog();
        let before = entries.clone();
        let _ = select(&entries, &Filter::new(CategoryFilter::Only("int".into()), "j"));
        assert_eq!(entries, before);
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!("".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "agi".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only("agi".into())
        );
        assert_eq!(CategoryFilter::Only("str".into()).to_string(), "str");
    }
}
