// src/preview.rs
// =============================================================================
// One preview run, from folder URL to finished page.
//
// Steps:
// 1. Parse the folder URL into owner/repo/branch/path
// 2. Fetch the folder's listing
// 3. Find and download the entry document (index.html by default)
// 4. Inline its stylesheets, scripts and images
//
// Any failure ends the run; nothing is half-rendered.
// =============================================================================

use crate::error::{PreviewError, Result};
use crate::github::{ContentKind, Fetch, RepoLocation, TreeFetcher};
use crate::inline::Inliner;
use crate::render::RenderedPage;

pub const DEFAULT_ENTRY: &str = "index.html";
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

#[derive(Debug, Clone)]
pub struct PreviewConfig {
    /// e.g. https://github.com/user/repo/tree/main/site
    pub folder_url: String,
    /// Path of the entry document, relative to the folder
    pub entry: String,
    /// Root of the GitHub REST API
    pub api_base: String,
}

impl PreviewConfig {
    pub fn new(folder_url: impl Into<String>) -> Self {
        Self {
            folder_url: folder_url.into(),
            entry: DEFAULT_ENTRY.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

pub async fn preview_folder<F: Fetch>(fetch: F, config: &PreviewConfig) -> Result<RenderedPage> {
    let repo = RepoLocation::parse(&config.folder_url, &config.api_base)?;
    let tree = TreeFetcher::new(fetch, repo);

    log::info!(
        "previewing {}/{} folder /{} (branch {})",
        tree.repo().owner,
        tree.repo().repo,
        tree.repo().path.join("/"),
        tree.repo().branch.as_deref().unwrap_or("default")
    );

    let cursor = tree.open_folder().await?;
    log::info!("folder has {} entries", cursor.listing.len());

    // The entry may sit in a subfolder; its references start from there
    let (entry, entry_folder) = tree.locate_with_folder(&config.entry, &cursor).await?;
    let document = tree
        .fetch_entry(&entry, &config.entry, ContentKind::Text)
        .await?
        .into_text();

    if document.is_empty() {
        return Err(PreviewError::EmptyDocument(config.entry.clone()));
    }

    let inlined = Inliner::new(&tree, &entry_folder).inline(&document).await?;
    log::info!("rendered \"{}\" ({} bytes)", inlined.title, inlined.html.len());

    Ok(inlined.into())
}
