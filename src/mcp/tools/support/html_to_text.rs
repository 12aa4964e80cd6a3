use once_cell::sync::Lazy;
use regex::Regex;

// Compiled once, reused for every description
static RE_BLOCK_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)</?(div|p|br|ul|ol|li|table|tr|td|th|h[1-6])(\s[^>]*)?/?>").unwrap()
});
static RE_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r" +").unwrap());
static RE_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").unwrap());
static RE_LEADING_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ ]+").unwrap());
static RE_TRAILING_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ ]+\n").unwrap());
static RE_IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\[image\]").unwrap());

/// Whether `text` carries the block markup Azure DevOps stores rich text in.
///
/// Generic angle-bracket text such as `Vec<String>` is not markup.
pub fn looks_like_html(text: &str) -> bool {
    RE_BLOCK_TAG.is_match(text)
}

/// Render Azure DevOps rich-text (HTML) as compact plain text.
///
/// Returns `None` when the markup cannot be rendered, so callers can fall
/// back to the raw value.
pub fn html_to_text(html: &str) -> Option<String> {
    // Width doesn't matter, we never want wrapping
    let mut text = html2text::from_read(html.as_bytes(), usize::MAX).ok()?;

    text = text.replace('\r', "\n");
    text = text.replace('\t', " ");
    text = text.replace('─', "-");
    text = RE_SPACES.replace_all(&text, " ").to_string();
    text = RE_NEWLINES.replace_all(&text, "\n").to_string();
    text = RE_LEADING_WS.replace_all(&text, "\n").to_string();
    text = RE_TRAILING_WS.replace_all(&text, "\n").to_string();
    text = RE_IMAGE.replace_all(&text, "").to_string();

    Some(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_markup() {
        assert!(looks_like_html("<div>Fix the <b>login</b> page</div>"));
        assert!(looks_like_html("line<br/>break"));
        assert!(!looks_like_html("Plain description."));
        assert!(!looks_like_html("if a < b and c > d"));
        assert!(looks_like_html("<P class=\"x\">Hi</P>"));
        assert!(looks_like_html("one<br />two"));
    }

    #[test]
    fn test_generic_type_syntax_is_not_markup() {
        assert!(!looks_like_html("Return Vec<String> instead"));
        assert!(!looks_like_html("Option<u32> and <T>"));
        assert!(!looks_like_html("HashMap<String, Vec<u8>>"));
    }

    #[test]
    fn test_html_to_text_keeps_line_breaks_between_blocks() {
        let text = html_to_text("<div>First line</div><div>Second line</div>").unwrap();

        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("First line"));
        assert!(text.ends_with("Second line"));
    }

    #[test]
    fn test_html_to_text_strips_tags_and_collapses_whitespace() {
        let text = html_to_text("<div>Steps:</div><div>   </div><div>Open   the app</div>").unwrap();

        assert!(text.contains("Steps:"));
        assert!(text.contains("Open the app"));
        assert!(!text.contains('<'));
        assert!(!text.contains("\n\n"));
        assert!(!text.contains("  "));
    }
}
