//! Minimal HTML helpers shared by the error pages and the catalog views.

/// Replace characters with markup meaning by HTML entities.
///
/// Covers `& < > " ' / \` and backtick, so the result is safe both as
/// element content and inside quoted attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Wrap `body` (already markup) in a complete HTML document. `title` is
/// escaped.
pub fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape(r#"<script>alert('x' & "y")</script>"#),
            "&lt;script&gt;alert(&#x27;x&#x27; &amp; &quot;y&quot;)&lt;&#x2F;script&gt;"
        );
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(escape("Science Fiction"), "Science Fiction");
        assert_eq!(escape("Éloïse"), "Éloïse");
    }

    #[test]
    fn document_escapes_title_but_not_body() {
        let html = document("A & B", "<p>ok</p>");
        assert!(html.contains("<title>A &amp; B</title>"));
        assert!(html.contains("<p>ok</p>"));
    }
}
