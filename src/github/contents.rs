// src/github/contents.rs
// =============================================================================
// The shapes the GitHub contents API hands back.
//
// GET /repos/{owner}/{repo}/contents/{path} answers with:
//   - an array of entries when {path} is a folder
//   - a single entry object when {path} is a file
//
// We only keep the four fields we actually use.
// =============================================================================

use serde::Deserialize;

/// What kind of thing a listing entry is
///
/// GitHub also reports "symlink" and "submodule". Those land in Other so the
/// resolver can refuse them by name instead of silently skipping them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum EntryKind {
    File,
    Dir,
    Other(String),
}

impl From<String> for EntryKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "file" => EntryKind::File,
            "dir" => EntryKind::Dir,
            _ => EntryKind::Other(kind),
        }
    }
}

/// One named child of a remote folder
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Entry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Raw file URL, null for folders
    #[serde(default)]
    pub download_url: Option<String>,
    /// Contents API URL for this entry; for folders this is its listing
    pub url: String,
}

/// The children of one remote folder, in API order
pub type Listing = Vec<Entry>;

/// Either response shape of the contents endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Contents {
    Listing(Listing),
    Single(Entry),
}
