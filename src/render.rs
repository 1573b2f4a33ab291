// src/render.rs
// =============================================================================
// Where a finished page goes.
//
// The inliner produces a document and a title. Showing them is someone
// else's job: a RenderTarget. We ship one that writes to any io::Write in
// one of three formats:
//
//   Framed  a wrapper page titled with the document's title, holding the
//           document in a full-window <iframe srcdoc>. The <base
//           target="_parent"> we inject makes links inside the frame
//           navigate the wrapper.
//   Raw     just the inlined document
//   Json    {"title": ..., "html": ...}
// =============================================================================

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::inline::Inlined;

/// The document and title a run produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPage {
    pub title: String,
    pub html: String,
}

impl From<Inlined> for RenderedPage {
    fn from(inlined: Inlined) -> Self {
        Self {
            title: inlined.title,
            html: inlined.html,
        }
    }
}

/// Something that can show a rendered page
pub trait RenderTarget {
    fn render(&mut self, page: &RenderedPage) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFormat {
    Framed,
    Raw,
    Json,
}

/// Writes pages to a file, stdout, or any other writer
pub struct WriterTarget<W> {
    writer: W,
    format: PageFormat,
}

impl<W: Write> WriterTarget<W> {
    pub fn new(writer: W, format: PageFormat) -> Self {
        Self { writer, format }
    }
}

impl<W: Write> RenderTarget for WriterTarget<W> {
    fn render(&mut self, page: &RenderedPage) -> Result<()> {
        match self.format {
            PageFormat::Framed => self.writer.write_all(framed_document(page).as_bytes())?,
            PageFormat::Raw => self.writer.write_all(page.html.as_bytes())?,
            PageFormat::Json => {
                serde_json::to_writer_pretty(&mut self.writer, page)?;
                self.writer.write_all(b"\n")?;
            }
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Wraps a page in a document that shows it in a borderless full-window frame
pub fn framed_document(page: &RenderedPage) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html>\n",
            "<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<title>{}</title>\n",
            "<style>html,body{{margin:0;height:100%}}",
            "iframe{{position:absolute;top:0;left:0;width:100vw;height:100vh;border:none}}</style>\n",
            "</head>\n",
            "<body>\n",
            "<iframe srcdoc=\"{}\"></iframe>\n",
            "</body>\n",
            "</html>\n",
        ),
        escape_text(&page.title),
        escape_attribute(&page.html),
    )
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn page() -> RenderedPage {
        RenderedPage {
            title: "Tom & Jerry".to_string(),
            html: "<p class=\"x\">a &amp; b</p>\n".to_string(),
        }
    }

    #[test]
    fn test_framed_document_escapes() {
        let doc = framed_document(&page());
        assert!(doc.contains("<title>Tom &amp; Jerry</title>"));
        assert!(doc.contains(r#"srcdoc="<p class=&quot;x&quot;>a &amp;amp; b</p>"#));
    }

    #[test]
    fn test_raw_writes_document_only() {
        let mut out = Vec::new();
        WriterTarget::new(&mut out, PageFormat::Raw).render(&page()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), page().html);
    }

    #[test]
    fn test_json_output() {
        let mut out = Vec::new();
        WriterTarget::new(&mut out, PageFormat::Json).render(&page()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["title"], "Tom & Jerry");
        assert_eq!(value["html"], page().html);
    }

    #[test]
    fn test_framed_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preview.html");

        let file = fs::File::create(&path).unwrap();
        WriterTarget::new(file, PageFormat::Framed).render(&page()).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<!DOCTYPE html>"));
        assert!(written.contains("<iframe srcdoc="));
    }
}
