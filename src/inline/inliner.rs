// src/inline/inliner.rs
// =============================================================================
// Replaces local resource references in the entry document with their
// fetched content.
//
// Per parser event:
//   HeadOpen    -> emit <base target="_parent"> before the head line
//   Stylesheet  -> <style>fetched css</style> instead of the <link> line
//   Script      -> <script>fetched js</script> instead of the <script> line
//   Image       -> <img src="data:..." extra /> in place of the old tag
//   Title       -> remember the text, keep the line
//   Plain       -> keep the line
//
// Lines are handled strictly one after another: a reference (and any folder
// listings it needs) is fully resolved before the next line is looked at.
// The first failure aborts the whole document.
// =============================================================================

use super::image::data_uri;
use super::parser::{ImageTag, LineEvent, LineParser};
use crate::error::Result;
use crate::github::{ContentKind, Fetch, TreeFetcher};
use crate::resolve::Cursor;

/// Title used when the document has no usable <title>
pub const DEFAULT_TITLE: &str = "Pages";

const BASE_TARGET: &str = r#"<base target="_parent">"#;

/// A finished, self-contained document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inlined {
    pub html: String,
    pub title: String,
}

/// Resolves references against one folder of one repository
pub struct Inliner<'a, F> {
    tree: &'a TreeFetcher<F>,
    cursor: &'a Cursor,
    output: String,
    title: Option<String>,
}

impl<'a, F: Fetch> Inliner<'a, F> {
    pub fn new(tree: &'a TreeFetcher<F>, cursor: &'a Cursor) -> Self {
        Self {
            tree,
            cursor,
            output: String::new(),
            title: None,
        }
    }

    /// Runs the whole document through the inliner
    pub async fn inline(mut self, document: &str) -> Result<Inlined> {
        for event in LineParser::new(document) {
            self.handle(event).await?;
        }

        let title = self
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        Ok(Inlined {
            html: self.output,
            title,
        })
    }

    async fn handle(&mut self, event: LineEvent) -> Result<()> {
        match event {
            LineEvent::HeadOpen => self.push_line(BASE_TARGET),
            LineEvent::Plain(line) => self.push_line(&line),
            LineEvent::Title { text, line } => {
                log::debug!("title: {:?}", text);
                self.title = Some(text);
                self.push_line(&line);
            }
            LineEvent::Stylesheet { href } => {
                let css = self.fetch_text(&href).await?;
                self.push_line(&format!("<style>{}</style>", css));
            }
            LineEvent::Script { src } => {
                let js = self.fetch_text(&src).await?;
                self.push_line(&format!("<script>{}</script>", js));
            }
            LineEvent::Image(image) => {
                let tag = self.image_tag(&image).await?;
                self.push_line(&format!("{}{}{}", image.before, tag, image.after));
            }
        }
        Ok(())
    }

    fn push_line(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }

    async fn fetch_text(&self, reference: &str) -> Result<String> {
        let entry = self.tree.locate(reference, self.cursor).await?;
        log::debug!("inlining {} ({})", reference, entry.name);
        let content = self
            .tree
            .fetch_entry(&entry, reference, ContentKind::Text)
            .await?;
        Ok(content.into_text())
    }

    /// Images are always fetched from the repository, even http(s) ones
    async fn image_tag(&self, image: &ImageTag) -> Result<String> {
        let entry = self.tree.locate(&image.src, self.cursor).await?;
        log::debug!("inlining image {} ({})", image.src, entry.name);
        let bytes = self
            .tree
            .fetch_entry(&entry, &image.src, ContentKind::Binary)
            .await?
            .into_bytes();

        let handle = data_uri(&entry.name, &bytes);
        Ok(if image.extra.is_empty() {
            format!(r#"<img src="{}" />"#, handle)
        } else {
            format!(r#"<img src="{}" {} />"#, handle, image.extra)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PreviewError;
    use crate::github::memory::{MemoryFetch, API};
    use crate::github::RepoLocation;

    fn root_listing_url() -> String {
        format!("{}/repos/octo/site/contents", API)
    }

    async fn run(fetch: MemoryFetch, document: &str) -> Result<Inlined> {
        let repo = RepoLocation::parse("https://github.com/octo/site", API).unwrap();
        let tree = TreeFetcher::new(fetch, repo);
        let cursor = tree.open_folder().await?;
        Inliner::new(&tree, &cursor).inline(document).await
    }

    fn site() -> MemoryFetch {
        MemoryFetch::new()
            .with_listing(
                &root_listing_url(),
                &[
                    ("s.css", "https://raw/s.css"),
                    ("app.js", "https://raw/app.js"),
                    ("logo.png", "https://raw/logo.png"),
                ],
                &[],
            )
            .with_file("https://raw/s.css", "body{color:red}")
            .with_file("https://raw/app.js", "console.log(1)")
            .with("https://raw/logo.png", 200, b"GIF89a".to_vec())
    }

    #[tokio::test]
    async fn test_end_to_end_document() {
        let document = [
            "<html>",
            "<head>",
            "<title>Demo</title>",
            r#"<link rel="stylesheet" href="s.css">"#,
            "</head>",
            "<body>hi</body>",
            "</html>",
        ]
        .join("\n");

        let inlined = run(site(), &document).await.unwrap();

        assert_eq!(inlined.title, "Demo");
        assert_eq!(
            inlined.html,
            concat!(
                "<html>\n",
                "<base target=\"_parent\">\n",
                "<head>\n",
                "<title>Demo</title>\n",
                "<style>body{color:red}</style>\n",
                "</head>\n",
                "<body>hi</body>\n",
                "</html>\n",
            )
        );
    }

    #[tokio::test]
    async fn test_script_is_inlined() {
        let inlined = run(site(), r#"<script src="./app.js"></script>"#).await.unwrap();
        assert_eq!(inlined.html, "<script>console.log(1)</script>\n");
        assert!(!inlined.html.contains("src="));
    }

    #[tokio::test]
    async fn test_external_lines_are_kept_byte_for_byte() {
        let document = concat!(
            "    <link rel=\"stylesheet\" href=\"https://cdn.example.com/x.css\">\n",
            "<script src=\"https://cdn.example.com/x.js\"></script>"
        );
        let inlined = run(site(), document).await.unwrap();
        assert_eq!(inlined.html, format!("{}\n", document));
    }

    #[tokio::test]
    async fn test_image_becomes_data_uri() {
        let inlined = run(site(), r#"<img src="logo.png" alt="Logo" class="big">"#)
            .await
            .unwrap();
        assert_eq!(
            inlined.html,
            "<img src=\"data:image/png;base64,R0lGODlh\" alt=\"Logo\" class=\"big\" />\n"
        );
    }

    #[tokio::test]
    async fn test_default_title() {
        let inlined = run(site(), "<p>no title here</p>").await.unwrap();
        assert_eq!(inlined.title, DEFAULT_TITLE);

        let inlined = run(site(), "<title>  </title>").await.unwrap();
        assert_eq!(inlined.title, DEFAULT_TITLE);
        assert_eq!(inlined.html, "<title>  </title>\n");
    }

    #[tokio::test]
    async fn test_every_head_gets_a_base() {
        let inlined = run(site(), "<head>\n<p>x</p>\n<head data-x=\"1\">").await.unwrap();
        assert_eq!(inlined.html.matches(BASE_TARGET).count(), 2);
        assert!(inlined.html.starts_with("<base target=\"_parent\">\n<head>\n"));
    }

    #[tokio::test]
    async fn test_split_link_resolves_like_single_line() {
        let split = run(site(), "<link rel=\"stylesheet\"\nhref=\"s.css\">").await.unwrap();
        let single = run(site(), "<link rel=\"stylesheet\" href=\"s.css\">").await.unwrap();
        assert_eq!(split, single);
        assert_eq!(split.html, "<style>body{color:red}</style>\n");
    }

    #[tokio::test]
    async fn test_split_image_resolves_like_single_line() {
        let split = run(site(), "<img alt=\"Logo\"\nsrc=\"logo.png\">").await.unwrap();
        let single = run(site(), "<img alt=\"Logo\" src=\"logo.png\">").await.unwrap();
        assert_eq!(split, single);
        assert_eq!(
            split.html,
            "<img src=\"data:image/png;base64,R0lGODlh\" alt=\"Logo\" />\n"
        );
    }

    #[tokio::test]
    async fn test_missing_file_aborts() {
        let result = run(site(), "<p>a</p>\n<script src=\"missing.js\"></script>\n<p>b</p>").await;
        assert!(matches!(result, Err(PreviewError::FileNotFound(p)) if p == "missing.js"));
    }

    #[tokio::test]
    async fn test_remote_image_is_not_passed_through() {
        let result = run(site(), r#"<img src="https://example.com/a.png">"#).await;
        assert!(matches!(result, Err(PreviewError::FileNotFound(_))));
    }
}
