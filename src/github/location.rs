// src/github/location.rs
// =============================================================================
// Turns a GitHub web URL into the pieces we need to talk to the contents API.
//
// Supported formats:
//   - https://github.com/owner/repo
//   - https://github.com/owner/repo/tree/branch
//   - https://github.com/owner/repo/tree/branch/some/folder
//
// The third segment ("tree", sometimes "blob") is ignored, the fourth is the
// branch and everything after it is the folder path inside the repository.
// =============================================================================

use percent_encoding::percent_decode_str;
use url::Url;

use crate::error::{PreviewError, Result};

/// Where a repository folder lives, and how to address anything else in the
/// same repository through the contents API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocation {
    pub owner: String,
    pub repo: String,
    pub branch: Option<String>,
    /// Folder inside the repository, one entry per segment (empty = root)
    pub path: Vec<String>,
    api_base: Url,
}

impl RepoLocation {
    /// Parses a folder URL such as "https://github.com/user/site/tree/main/docs"
    ///
    /// api_base is the API root, normally "https://api.github.com"
    pub fn parse(folder_url: &str, api_base: &str) -> Result<Self> {
        if !folder_url.trim().starts_with("https://github.com/") {
            return Err(PreviewError::InvalidUrl(folder_url.to_string()));
        }

        let url = Url::parse(folder_url.trim())
            .map_err(|_| PreviewError::InvalidUrl(folder_url.to_string()))?;

        if url.scheme() != "https" || url.host_str() != Some("github.com") {
            return Err(PreviewError::InvalidUrl(folder_url.to_string()));
        }

        let api_base = Url::parse(api_base)
            .ok()
            .filter(|base| !base.cannot_be_a_base())
            .ok_or_else(|| PreviewError::InvalidUrl(api_base.to_string()))?;

        // Decode each segment now; they get re-encoded when we build API URLs
        let parts: Vec<String> = url
            .path_segments()
            .map(|segments| {
                segments
                    .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();

        let owner = parts.first().cloned().unwrap_or_default();
        let repo = parts
            .get(1)
            .map(|r| r.trim_end_matches(".git").to_string())
            .unwrap_or_default();

        if owner.is_empty() || repo.is_empty() {
            return Err(PreviewError::RepoNotFound(folder_url.to_string()));
        }

        let branch = parts.get(3).filter(|b| !b.is_empty()).cloned();

        let path = parts
            .iter()
            .skip(4)
            .filter(|s| !s.is_empty())
            .cloned()
            .collect();

        Ok(Self {
            owner,
            repo,
            branch,
            path,
            api_base,
        })
    }

    /// Contents API URL for a path inside the repository
    ///
    /// Example (branch "main"):
    ///   ["assets", "app.js"] -> https://api.github.com/repos/o/r/contents/assets/app.js?ref=main
    pub fn contents_url(&self, segments: &[String]) -> String {
        let mut url = self.api_base.clone();

        // parse() already rejected bases that cannot take path segments
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(["repos", self.owner.as_str(), self.repo.as_str(), "contents"])
                .extend(segments);
        }

        if let Some(branch) = &self.branch {
            url.query_pairs_mut().append_pair("ref", branch);
        }

        url.to_string()
    }

    /// Contents API URL of the folder the user pointed us at
    pub fn folder_url(&self) -> String {
        self.contents_url(&self.path)
    }
}
