//! Minimal HTML helpers shared by the server-rendered pages.

use std::fmt::Write;

/// Escape text for use in element content and double-quoted attributes.
#[must_use]
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap `body` in a full document. `title` is escaped, `body` is not.
#[must_use]
pub fn document(title: &str, body: &str) -> String {
    let mut page = String::with_capacity(body.len() + 512);
    page.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    page.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    // Writing into a String cannot fail.
    let _ = write!(page, "<title>{} | StashBox</title>", escape(title));
    page.push_str("</head><body class=\"min-h-screen bg-white text-gray-900\">");
    page.push_str(body);
    page.push_str("</body></html>");
    page
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_special_characters() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn document_escapes_title_only() {
        let page = document("<Sign In>", "<main>ok</main>");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>&lt;Sign In&gt; | StashBox</title>"));
        assert!(page.contains("<main>ok</main>"));
    }
}
