//! Markdown content pages (about text, resources) rendered to HTML.

use pulldown_cmark::{Options, Parser, html};
use std::path::Path;

use crate::error::{ReportError, Result};

pub fn render_markdown(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(markdown, options);

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Reads `<content_dir>/<name>.md` and renders it.
///
/// # Errors
///
/// Returns [`ReportError::Content`] if `name` is not a plain page name
/// (letters, digits, `-`, `_`) or the file cannot be read.
pub fn load_page(content_dir: &Path, name: &str) -> Result<String> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(ReportError::Content(format!("invalid page name '{name}'")));
    }

    let path = content_dir.join(format!("{name}.md"));
    let markdown = std::fs::read_to_string(&path)
        .map_err(|e| ReportError::Content(format!("cannot read {}: {e}", path.display())))?;

    Ok(render_markdown(&markdown))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn test_render_markdown() {
        let html = render_markdown("# Resources\n\nSee [OpenAQ](https://openaq.org).");
        assert!(html.contains("<h1>Resources</h1>"));
        assert!(html.contains(r#"<a href="https://openaq.org">OpenAQ</a>"#));
    }

    #[test]
    fn test_load_page() {
        let dir = env::temp_dir().join("openaq_report_content_test");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("about.md"), "Some *emphasis*").unwrap();

        let html = load_page(&dir, "about").unwrap();
        assert!(html.contains("<em>emphasis</em>"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_page_rejects_traversal() {
        let err = load_page(Path::new("content"), "../secrets").unwrap_err();
        assert!(matches!(err, ReportError::Content(_)));
    }

    #[test]
    fn test_load_page_missing_file() {
        assert!(load_page(&env::temp_dir(), "definitely_not_a_page_xyz").is_err());
    }
}
