//! Legal pages rendered from Markdown sources
//!
//! Sources are read on every request, so edits show up without a restart.

use pulldown_cmark::{Parser, html};
use rust_embed::RustEmbed;
use std::path::PathBuf;

use crate::utils::{ApiError, ApiResult};

#[derive(RustEmbed)]
#[folder = "templates/"]
struct Templates;

/// Legal documents served as HTML pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegalPage {
    PrivacyPolicy,
    LegalNotice,
    Terms,
}

impl LegalPage {
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::PrivacyPolicy => "privacy_policy.md",
            Self::LegalNotice => "legal_notice.md",
            Self::Terms => "terms_conditions.md",
        }
    }
}

pub struct ContentService {
    dir: PathBuf,
}

impl ContentService {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Markdown source of `page` rendered to HTML, `None` when unreadable
    pub async fn render_markdown(&self, page: LegalPage) -> Option<String> {
        let path = self.dir.join(page.file_name());
        match tokio::fs::read_to_string(&path).await {
            Ok(markdown) => Some(markdown_to_html(&markdown)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("Legal page source missing: {}", path.display());
                None
            },
            Err(e) => {
                tracing::error!("Failed to read {}: {}", path.display(), e);
                None
            },
        }
    }

    /// Home page with the question form
    pub fn index_html(&self) -> ApiResult<String> {
        template("index.html")
    }

    /// Wrap rendered content in the legal page layout
    pub fn legal_page_html(&self, title: &str, content: &str) -> ApiResult<String> {
        let layout = template("legal_page.html")?;
        Ok(layout.replace("{{ title }}", title).replace("{{ content }}", content))
    }
}

pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

fn template(name: &str) -> ApiResult<String> {
    let file = Templates::get(name)
        .ok_or_else(|| ApiError::internal_error(format!("template {} not embedded", name)))?;
    String::from_utf8(file.data.into_owned())
        .map_err(|e| ApiError::internal_error(format!("template {} is not UTF-8: {}", name, e)).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_to_html() {
        let html = markdown_to_html("# Titre\n\nUn *paragraphe*.");
        assert!(html.contains("<h1>Titre</h1>"));
        assert!(html.contains("<em>paragraphe</em>"));
    }

    #[test]
    fn test_legal_page_layout() {
        let service = ContentService::new("content");
        let page = service.legal_page_html("Mentions Légales", "<p>Bonjour</p>").unwrap();
        assert!(page.contains("Mentions Légales"));
        assert!(page.contains("<p>Bonjour</p>"));
        assert!(!page.contains("{{ content }}"));
    }

    #[tokio::test]
    async fn test_missing_source_renders_nothing() {
        let service = ContentService::new("does-not-exist");
        assert_eq!(service.render_markdown(LegalPage::Terms).await, None);
    }

    #[tokio::test]
    async fn test_bundled_sources_render() {
        let service = ContentService::new("content");
        for page in [LegalPage::PrivacyPolicy, LegalPage::LegalNotice, LegalPage::Terms] {
            let html = service.render_markdown(page).await;
            assert!(html.is_some_and(|h| h.contains("<h1>")), "{} did not render", page.file_name());
        }
    }
}
