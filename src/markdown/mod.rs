//! Markdown subset to HTML, for release notes.
//!
//! A single forward pass over the lines of the input. For each line the
//! first matching rule wins:
//!
//! 1. fenced code block (three backticks, optional language)
//! 2. horizontal rule
//! 3. heading, with the level clamped to `h3`..=`h5`
//! 4. blockquote (consecutive `>` lines, joined with spaces)
//! 5. unordered list (`-`, `*` or `+`)
//! 6. ordered list (`1.`), renumbered by the browser
//! 7. blank line, skipped
//! 8. paragraph
//!
//! All text from the source is escaped before any tag is emitted. This is
//! not CommonMark: overlapping emphasis is resolved by whichever inline
//! pattern matches first.

use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

mod inline;

pub use inline::{escape_html, render_inline};

/// Rendered in place of empty release notes.
pub const EMPTY_BODY_FALLBACK: &str = "Bug Fixed";

const FENCE: &str = "```";
const MIN_HEADING_LEVEL: usize = 3;
const MAX_HEADING_LEVEL: usize = 5;

regex!(HORIZONTAL_RULE, r"^(\s*[-*_]){3,}\s*$");
regex!(HEADING, r"^(#{1,6})\s+([^\r\x{2028}\x{2029}]*)");
regex!(QUOTE_MARKER, r"^\s*>\s?");
regex!(UNORDERED_ITEM, r"^\s*[-*+]\s+");
regex!(ORDERED_ITEM, r"^\s*[0-9]+\.\s+");

/// The paragraph emitted for blank release notes.
pub fn fallback_html() -> String {
    format!(
        r#"<p class="fallback-text"><i class="fas fa-wrench"></i> {}</p>"#,
        EMPTY_BODY_FALLBACK
    )
}

/// Converts Markdown to an HTML fragment.
pub fn to_html(markdown: &str) -> String {
    if is_blank(markdown) {
        return fallback_html();
    }

    let normalized = markdown.replace("\r\n", "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();

    let mut html = String::new();
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];

        if let Some(info) = line.trim().strip_prefix(FENCE) {
            i = code_block(&lines, i + 1, info.trim(), &mut html);
            continue;
        }

        if HORIZONTAL_RULE.is_match(line) {
            html.push_str("<hr>\n");
            i += 1;
            continue;
        }

        if let Some(caps) = HEADING.captures(line) {
            let level = caps[1]
                .len()
                .clamp(MIN_HEADING_LEVEL, MAX_HEADING_LEVEL);
            html.push_str(&format!(
                "<h{level}>{}</h{level}>\n",
                render_inline(&caps[2])
            ));
            i += 1;
            continue;
        }

        if line.trim_start().starts_with('>') {
            let mut quoted = Vec::new();
            while i < lines.len() && lines[i].trim_start().starts_with('>') {
                quoted.push(QUOTE_MARKER.replace(lines[i], "").into_owned());
                i += 1;
            }
            html.push_str(&format!(
                "<blockquote>{}</blockquote>\n",
                render_inline(&quoted.join(" "))
            ));
            continue;
        }

        if UNORDERED_ITEM.is_match(line) {
            i = list(&lines, i, &UNORDERED_ITEM, "ul", &mut html);
            continue;
        }

        if ORDERED_ITEM.is_match(line) {
            i = list(&lines, i, &ORDERED_ITEM, "ol", &mut html);
            continue;
        }

        if is_blank(line) {
            i += 1;
            continue;
        }

        html.push_str(&format!("<p>{}</p>\n", render_inline(line)));
        i += 1;
    }

    html
}

/// Whitespace-only, counting a byte order mark as whitespace.
fn is_blank(text: &str) -> bool {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}').is_empty()
}

/// Emits a `<pre><code>` block for the lines starting at `start`.
/// Returns the index just past the closing fence (or the end of input).
fn code_block(lines: &[&str], start: usize, language: &str, html: &mut String) -> usize {
    let mut i = start;
    let mut code = Vec::new();
    while i < lines.len() && !lines[i].trim().starts_with(FENCE) {
        code.push(escape_html(lines[i]));
        i += 1;
    }

    if language.is_empty() {
        html.push_str("<pre><code>");
    } else {
        html.push_str(&format!(
            r#"<pre><code class="language-{}">"#,
            escape_html(language)
        ));
    }
    html.push_str(&code.join("\n"));
    html.push_str("</code></pre>\n");

    // Skip the closing fence.
    i + 1
}

/// Emits one list made of the consecutive lines matching `marker`.
fn list(lines: &[&str], start: usize, marker: &Regex, tag: &str, html: &mut String) -> usize {
    let mut i = start;
    html.push_str(&format!("<{tag}>\n"));
    while i < lines.len() && marker.is_match(lines[i]) {
        let content = marker.replace(lines[i], "");
        html.push_str(&format!("  <li>{}</li>\n", render_inline(&content)));
        i += 1;
    }
    html.push_str(&format!("</{tag}>\n"));
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = r#"<p class="fallback-text"><i class="fas fa-wrench"></i> Bug Fixed</p>"#;

    #[test]
    fn test_blank_input_renders_fallback() {
        assert_eq!(to_html(""), FALLBACK);
        assert_eq!(to_html("   \n\t\r\n "), FALLBACK);
        assert_eq!(to_html("\u{feff}"), FALLBACK);
        assert_eq!(to_html(" \u{feff}\n\u{a0}"), FALLBACK);
    }

    #[test]
    fn test_byte_order_mark_line_is_skipped() {
        assert_eq!(to_html("a\n\u{feff}\nb"), "<p>a</p>\n<p>b</p>\n");
    }

    #[test]
    fn test_heading_levels_are_clamped() {
        assert_eq!(to_html("# Title"), "<h3>Title</h3>\n");
        assert_eq!(to_html("## Title"), "<h3>Title</h3>\n");
        assert_eq!(to_html("#### Title"), "<h4>Title</h4>\n");
        assert_eq!(to_html("###### Title"), "<h5>Title</h5>\n");
    }

    #[test]
    fn test_heading_requires_space() {
        assert_eq!(to_html("#hashtag"), "<p>#hashtag</p>\n");
    }

    #[test]
    fn test_heading_stops_at_line_separator() {
        assert_eq!(to_html("# a\u{2028}b"), "<h3>a</h3>\n");
        assert_eq!(to_html("## x\ry"), "<h3>x</h3>\n");
    }

    #[test]
    fn test_unordered_list_groups_consecutive_items() {
        assert_eq!(
            to_html("- a\n- b"),
            "<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_mixed_bullets_share_one_list() {
        assert_eq!(
            to_html("* a\n  + b\n- c"),
            "<ul>\n  <li>a</li>\n  <li>b</li>\n  <li>c</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_ordered_list_ignores_numbers() {
        assert_eq!(
            to_html("3. third\n1. first"),
            "<ol>\n  <li>third</li>\n  <li>first</li>\n</ol>\n"
        );
    }

    #[test]
    fn test_list_kinds_do_not_merge() {
        assert_eq!(
            to_html("- a\n1. b"),
            "<ul>\n  <li>a</li>\n</ul>\n<ol>\n  <li>b</li>\n</ol>\n"
        );
    }

    #[test]
    fn test_fenced_code_block_with_language() {
        assert_eq!(
            to_html("```js\ncode\n```"),
            "<pre><code class=\"language-js\">code</code></pre>\n"
        );
    }

    #[test]
    fn test_fenced_code_is_escaped_not_transformed() {
        assert_eq!(
            to_html("```\n**a** <b>\n\n`x`\n```\nafter"),
            "<pre><code>**a** &lt;b&gt;\n\n`x`</code></pre>\n<p>after</p>\n"
        );
    }

    #[test]
    fn test_unclosed_fence_runs_to_end() {
        assert_eq!(
            to_html("```rust\nfn main() {}"),
            "<pre><code class=\"language-rust\">fn main() {}</code></pre>\n"
        );
    }

    #[test]
    fn test_horizontal_rules() {
        assert_eq!(to_html("---"), "<hr>\n");
        assert_eq!(to_html(" * * *"), "<hr>\n");
        assert_eq!(to_html("_____  "), "<hr>\n");
    }

    #[test]
    fn test_rule_takes_precedence_over_list() {
        assert_eq!(to_html("- - -"), "<hr>\n");
    }

    #[test]
    fn test_blockquote_lines_are_joined() {
        assert_eq!(
            to_html("> first\n>second\n  > **third**\nnext"),
            "<blockquote>first second <strong>third</strong></blockquote>\n<p>next</p>\n"
        );
    }

    #[test]
    fn test_paragraph_per_line() {
        assert_eq!(
            to_html("one\r\ntwo\n\nthree"),
            "<p>one</p>\n<p>two</p>\n<p>three</p>\n"
        );
    }

    #[test]
    fn test_source_text_is_escaped_everywhere() {
        let input = "# <h1>\n> \"q\" & <q>\n- <li>\n1. <ol>\n<script>alert(1)</script>";
        let html = to_html(input);

        assert!(!html.contains("<script>"));
        assert!(!html.contains("<h1>"));
        assert!(!html.contains("\"q\""));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("&quot;q&quot; &amp; &lt;q&gt;"));
    }

    #[test]
    fn test_code_language_is_escaped() {
        assert_eq!(
            to_html("```\"><x\n```"),
            "<pre><code class=\"language-&quot;&gt;&lt;x\"></code></pre>\n"
        );
    }

    #[test]
    fn test_release_notes_example() {
        let notes = "## What's Changed\n\n* Fixed `crash` on start by @dev in [#12](https://github.com/o/r/pull/12)\n* ~~Removed~~ old menu\n\n**Full Changelog**: v1...v2";
        assert_eq!(
            to_html(notes),
            "<h3>What's Changed</h3>\n\
             <ul>\n  \
             <li>Fixed <code>crash</code> on start by @dev in <a href=\"https://github.com/o/r/pull/12\" target=\"_blank\" rel=\"noopener\">#12</a></li>\n  \
             <li><del>Removed</del> old menu</li>\n\
             </ul>\n\
             <p><strong>Full Changelog</strong>: v1...v2</p>\n"
        );
    }
}
