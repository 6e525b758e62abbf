//! The rendered output and its wrapping into a standalone page.

use super::markup::escape_html;

/// Result of rendering one grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSheet {
    /// The `<table>` element
    pub markup: String,
    /// Base rules followed by one block per styled cell
    pub stylesheet: String,
    /// Suggested viewport width for the rasterizer, in pixels
    pub width_hint: u32,
    /// Set when the styled pipeline failed and the plain table was emitted
    pub fallback: bool,
    pub(crate) language: String,
}

impl RenderedSheet {
    /// Split into the `(markup, stylesheet)` pair.
    pub fn into_parts(self) -> (String, String) {
        (self.markup, self.stylesheet)
    }

    /// Wrap the markup and stylesheet into a self-contained HTML page.
    pub fn to_document(&self, title: &str) -> String {
        let title = escape_html(title);
        let mut doc = String::with_capacity(self.markup.len() + self.stylesheet.len() + 512);

        doc.push_str("<!DOCTYPE html>\n");
        doc.push_str(&format!("<html lang=\"{}\">\n", escape_html(&self.language)));
        doc.push_str("<head>\n<meta charset=\"UTF-8\">\n");
        doc.push_str(&format!("<title>Excel Sheet - {title}</title>\n"));
        doc.push_str("<style>\n");
        doc.push_str(PAGE_STYLE);
        doc.push_str(&self.stylesheet);
        doc.push_str("</style>\n</head>\n<body>\n");
        if self.fallback {
            doc.push_str(&format!("<h2>Excel Sheet: {title}</h2>\n"));
            doc.push_str("<p>Error occurred during rendering. Showing basic table.</p>\n");
        }
        doc.push_str("<div class=\"container\">\n");
        doc.push_str(&self.markup);
        doc.push_str("</div>\n</body>\n</html>\n");
        doc
    }
}

const PAGE_STYLE: &str = "body { margin: 20px; background-color: #ffffff; }\n\
.container { display: inline-block; }\n";

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(fallback: bool) -> RenderedSheet {
        RenderedSheet {
            markup: "<table></table>\n".into(),
            stylesheet: ".cell-0-0 { font-weight: bold; }\n".into(),
            width_hint: 800,
            fallback,
            language: "ko".into(),
        }
    }

    #[test]
    fn document_embeds_parts() {
        let doc = sheet(false).to_document("Q1 <draft>");
        assert!(doc.starts_with("<!DOCTYPE html>\n<html lang=\"ko\">"));
        assert!(doc.contains("<meta charset=\"UTF-8\">"));
        assert!(doc.contains("<title>Excel Sheet - Q1 &lt;draft&gt;</title>"));
        assert!(doc.contains(".cell-0-0 { font-weight: bold; }"));
        assert!(doc.contains("<div class=\"container\">\n<table></table>\n</div>"));
        assert!(!doc.contains("Error occurred"));
    }

    #[test]
    fn fallback_document_carries_notice() {
        let doc = sheet(true).to_document("Data");
        assert!(doc.contains("<h2>Excel Sheet: Data</h2>"));
        assert!(doc.contains("Error occurred during rendering"));
    }

    #[test]
    fn into_parts_returns_pair() {
        let (markup, stylesheet) = sheet(false).into_parts();
        assert_eq!(markup, "<table></table>\n");
        assert!(stylesheet.starts_with(".cell-0-0"));
    }
}
