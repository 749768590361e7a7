//! HTML entity escaping for untrusted free text.

use askama_escape::{Html, escape};

/// Escape `&`, `<`, `>` and quotes so the text renders literally
pub fn escape_html(raw: &str) -> String {
    escape(raw, Html).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_markup() {
        assert_eq!(
            escape_html("<script>alert(1)</script>"),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("\"quoted\""), "&quot;quoted&quot;");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(escape_html("just a comment"), "just a comment");
    }
}
