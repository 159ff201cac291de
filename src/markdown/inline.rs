//! Inline transforms and HTML escaping.

use regex::Regex;
use std::sync::LazyLock;

regex!(CODE_SPAN, r"`([^`]+?)`");
regex!(BOLD_ITALIC, r"\*\*\*(.+?)\*\*\*");
regex!(BOLD, r"\*\*(.+?)\*\*");
regex!(ITALIC, r"\*(.+?)\*");
regex!(LINK, r"\[([^\]]+)\]\(([^)]+)\)");
regex!(STRIKETHROUGH, r"~~(.+?)~~");

/// Rules applied in order. Later rules see the output of earlier ones.
static RULES: LazyLock<[(&'static Regex, &'static str); 6]> = LazyLock::new(|| {
    [
        (&*CODE_SPAN, "<code>${1}</code>"),
        (&*BOLD_ITALIC, "<strong><em>${1}</em></strong>"),
        (&*BOLD, "<strong>${1}</strong>"),
        (&*ITALIC, "<em>${1}</em>"),
        (&*LINK, r#"<a href="${2}" target="_blank" rel="noopener">${1}</a>"#),
        (&*STRIKETHROUGH, "<del>${1}</del>"),
    ]
});

/// Escapes `&`, `<`, `>` and `"`.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escapes `text`, then applies code, emphasis, link and strikethrough rules.
pub fn render_inline(text: &str) -> String {
    RULES
        .iter()
        .fold(escape_html(text), |acc, (pattern, replacement)| {
            pattern.replace_all(&acc, *replacement).into_owned()
        })
}
