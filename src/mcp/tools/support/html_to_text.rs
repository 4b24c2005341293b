use once_cell::sync::Lazy;
use regex::Regex;

// Static regex patterns for rich-text fields (compiled once, reused many times)
static RE_BLOCK_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</p\s*>|<br\s*/?>").unwrap());
static RE_LI_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<li(\s[^>]*)?>").unwrap());
static RE_LI_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</li\s*>").unwrap());
static RE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static RE_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());

pub const BULLET: &str = "• ";

/// Convert the HTML stored in rich-text fields into plain text.
///
/// This is a fixed rule sequence, not an HTML parser: paragraph ends and line
/// breaks become newlines, list items become bullets, every other tag is
/// dropped and only `&nbsp;`, `&quot;`, `&lt;`, `&gt;` and `&amp;` are decoded.
/// Newline runs collapse to one; leading whitespace and trailing spaces are
/// trimmed, so at most one trailing newline remains.
pub fn html_to_text(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let text = RE_BLOCK_BREAK.replace_all(html, "\n");
    let text = RE_LI_OPEN.replace_all(&text, BULLET);
    let text = RE_LI_CLOSE.replace_all(&text, "\n");
    let text = RE_TAG.replace_all(&text, "");

    // &amp; last, so "&amp;lt;" stays a literal "&lt;"
    let text = text
        .replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");

    let text = RE_NEWLINES.replace_all(&text, "\n");

    text.trim_start()
        .trim_end_matches([' ', '\t', '\r'])
        .to_string()
}
