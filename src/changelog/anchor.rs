//! Scroll-to-card behaviour for `#<tag>` fragments.
//!
//! The view layer measures the page and applies the result; this module
//! only decides which card is targeted and where to scroll.

use std::time::Duration;

use super::card::ReleaseCard;
use super::permalink::decode_fragment;

/// How long a targeted card keeps its highlight.
pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(3000);

/// Navigation bar height used when the bar cannot be measured.
pub const DEFAULT_NAV_HEIGHT: f64 = 70.0;

/// Extra space kept between the navigation bar and the card.
pub const SCROLL_MARGIN: f64 = 20.0;

/// The card a URL fragment points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashTarget(String);

impl HashTarget {
    /// Returns `None` for an empty fragment.
    pub fn parse(fragment: &str) -> Option<Self> {
        let tag = decode_fragment(fragment);
        (!tag.is_empty()).then_some(Self(tag))
    }

    pub fn tag(&self) -> &str {
        &self.0
    }

    /// Finds the card whose anchor matches this target.
    pub fn find_card<'a>(&self, cards: &'a [ReleaseCard]) -> Option<&'a ReleaseCard> {
        cards.iter().find(|c| c.tag == self.0)
    }
}

/// Where and how to reveal a targeted card.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollPlan {
    pub tag: String,
    pub top: f64,
    pub highlight_for: Duration,
}

/// Document offset to scroll to so the card sits below the navigation bar.
///
/// `card_top` is relative to the viewport, `page_offset` is the current
/// scroll position.
pub fn scroll_top(card_top: f64, page_offset: f64, nav_height: Option<f64>) -> f64 {
    card_top + page_offset - nav_height.unwrap_or(DEFAULT_NAV_HEIGHT) - SCROLL_MARGIN
}

/// Resolves a fragment against the rendered cards.
///
/// Runs once after the cards render and again on every fragment change.
/// `measure` returns the viewport-relative top of the card with the given tag.
pub fn plan_scroll(
    fragment: &str,
    cards: &[ReleaseCard],
    page_offset: f64,
    nav_height: Option<f64>,
    measure: impl Fn(&str) -> f64,
) -> Option<ScrollPlan> {
    let target = HashTarget::parse(fragment)?;
    let card = target.find_card(cards)?;

    Some(ScrollPlan {
        tag: card.tag.clone(),
        top: scroll_top(measure(&card.tag), page_offset, nav_height),
        highlight_for: HIGHLIGHT_DURATION,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changelog::PageLocation;
    use crate::provider::Release;

    fn cards(tags: &[&str]) -> Vec<ReleaseCard> {
        let location = PageLocation::new("https://example.com", "/");
        tags.iter()
            .enumerate()
            .map(|(i, tag)| {
                let release = Release {
                    tag: tag.to_string(),
                    ..Default::default()
                };
                ReleaseCard::new(&release, i == 0, &location)
            })
            .collect()
    }

    #[test]
    fn test_hash_target_parse() {
        assert_eq!(HashTarget::parse("#v1%20rc").unwrap().tag(), "v1 rc");
        assert_eq!(HashTarget::parse("#"), None);
        assert_eq!(HashTarget::parse(""), None);
    }

    #[test]
    fn test_scroll_top() {
        assert_eq!(scroll_top(500.0, 100.0, Some(60.0)), 520.0);
        assert_eq!(scroll_top(500.0, 0.0, None), 410.0);
    }

    #[test]
    fn test_plan_scroll_targets_matching_card() {
        let cards = cards(&["v3", "v2 beta", "v1"]);
        let plan = plan_scroll("#v2%20beta", &cards, 0.0, Some(80.0), |tag| {
            assert_eq!(tag, "v2 beta");
            300.0
        })
        .unwrap();

        assert_eq!(plan.tag, "v2 beta");
        assert_eq!(plan.top, 200.0);
        assert_eq!(plan.highlight_for, Duration::from_millis(3000));
    }

    #[test]
    fn test_plan_scroll_ignores_unknown_or_empty_fragment() {
        let cards = cards(&["v1"]);
        assert_eq!(plan_scroll("#v9", &cards, 0.0, None, |_| 0.0), None);
        assert_eq!(plan_scroll("", &cards, 0.0, None, |_| 0.0), None);
    }

    #[test]
    fn test_fragment_change_replans() {
        let cards = cards(&["v2", "v1"]);
        let first = plan_scroll("#v2", &cards, 0.0, None, |_| 100.0).unwrap();
        let second = plan_scroll("#v1", &cards, 0.0, None, |_| 900.0).unwrap();

        assert_eq!(first.tag, "v2");
        assert_eq!(second.tag, "v1");
        assert!(second.top > first.top);
    }
}
