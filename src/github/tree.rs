// src/github/tree.rs
// =============================================================================
// Lazily walks a repository through the contents API.
//
// Nothing is fetched up front. A folder's listing is only requested when a
// reference actually needs to look inside it, and file bodies are only
// downloaded once a reference has been resolved to them.
//
// Two kinds of address are used:
//   - Known: a URL an entry already told us (its listing or download URL)
//   - Repo:  a path from the repository root, turned into a contents API URL
//            with the base address and branch from RepoLocation
// =============================================================================

use super::contents::{Contents, Entry, EntryKind, Listing};
use super::fetch::{Fetch, FetchResponse};
use super::location::RepoLocation;
use crate::error::{PreviewError, Result};
use crate::resolve::{Cursor, FolderContext, Resolution};

/// Where to fetch something from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    Known(String),
    Repo(Vec<String>),
}

/// How a downloaded body should be handed back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// HTML, CSS and JS source
    Text,
    /// Images and anything else we only pass along
    Binary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Binary(Vec<u8>),
}

impl Content {
    pub fn into_text(self) -> String {
        match self {
            Content::Text(text) => text,
            Content::Binary(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Content::Text(text) => text.into_bytes(),
            Content::Binary(bytes) => bytes,
        }
    }
}

/// Which folder a located entry sits in
enum Holder {
    /// The folder of the cursor we started from
    Given,
    /// A folder whose listing was fetched on the way down
    Opened(Cursor),
    /// A folder reached by escaping; its listing was never fetched
    Unlisted(FolderContext),
}

/// Fetches listings and files of one repository
pub struct TreeFetcher<F> {
    fetch: F,
    repo: RepoLocation,
}

impl<F: Fetch> TreeFetcher<F> {
    pub fn new(fetch: F, repo: RepoLocation) -> Self {
        Self { fetch, repo }
    }

    pub fn repo(&self) -> &RepoLocation {
        &self.repo
    }

    fn address_url(&self, address: &Address) -> String {
        match address {
            Address::Known(url) => url.clone(),
            Address::Repo(path) => self.repo.contents_url(path),
        }
    }

    async fn get_contents(&self, url: &str) -> Result<(FetchResponse, Option<Contents>)> {
        let response = self.fetch.get(url).await?;
        if !response.is_success() {
            return Ok((response, None));
        }

        let contents = serde_json::from_slice(&response.body).map_err(|source| {
            PreviewError::MalformedListing {
                url: url.to_string(),
                source,
            }
        })?;

        Ok((response, Some(contents)))
    }

    /// Fetches the children of a folder
    pub async fn fetch_listing(&self, address: &Address) -> Result<Listing> {
        let url = self.address_url(address);
        log::debug!("listing {}", url);

        match self.get_contents(&url).await? {
            (_, Some(Contents::Listing(listing))) => Ok(listing),
            (_, Some(Contents::Single(_))) => Err(PreviewError::NotAFolder(url)),
            (response, None) => Err(PreviewError::InvalidRepository {
                repo: self.repo.repo.clone(),
                url,
                status: response.status,
            }),
        }
    }

    /// Downloads a file body
    ///
    /// `path` is only used to name the file in errors.
    pub async fn fetch_content(
        &self,
        address: &Address,
        path: &str,
        kind: ContentKind,
    ) -> Result<Content> {
        let url = self.address_url(address);
        let response = self.fetch.get(&url).await?;

        if !response.is_success() {
            return Err(PreviewError::HttpError {
                path: path.to_string(),
                status: response.status,
            });
        }

        Ok(match kind {
            ContentKind::Text => Content::Text(String::from_utf8_lossy(&response.body).into_owned()),
            ContentKind::Binary => Content::Binary(response.body),
        })
    }

    /// Downloads the file a resolved entry points at
    pub async fn fetch_entry(&self, entry: &Entry, path: &str, kind: ContentKind) -> Result<Content> {
        let download = entry
            .download_url
            .clone()
            .ok_or_else(|| PreviewError::FileNotFound(path.to_string()))?;
        self.fetch_content(&Address::Known(download), path, kind).await
    }

    /// Opens the folder the user pointed us at
    pub async fn open_folder(&self) -> Result<Cursor> {
        let listing = self.fetch_listing(&Address::Known(self.repo.folder_url())).await?;
        Ok(Cursor {
            folder: FolderContext::new(self.repo.path.clone()),
            listing,
        })
    }

    /// Resolves a reference seen from `cursor` to a file entry
    ///
    /// Folder listings below the cursor are fetched as the path descends
    /// into them and dropped once the reference is resolved.
    pub async fn locate(&self, reference: &str, cursor: &Cursor) -> Result<Entry> {
        let (entry, _) = self.walk(reference, cursor).await?;
        Ok(entry)
    }

    /// Resolves a reference like `locate`, and also returns a cursor on the
    /// folder that holds the entry
    ///
    /// References inside the entry's document are relative to that folder.
    pub async fn locate_with_folder(&self, reference: &str, cursor: &Cursor) -> Result<(Entry, Cursor)> {
        let (entry, holder) = self.walk(reference, cursor).await?;
        let folder = match holder {
            Holder::Given => cursor.clone(),
            Holder::Opened(folder) => folder,
            Holder::Unlisted(folder) => {
                let listing = self.fetch_listing(&Address::Repo(folder.path.clone())).await?;
                Cursor { folder, listing }
            }
        };
        Ok((entry, folder))
    }

    async fn walk(&self, reference: &str, cursor: &Cursor) -> Result<(Entry, Holder)> {
        let mut state = Resolution::start(reference, &cursor.folder)?;
        let mut opened: Option<Cursor> = None;

        loop {
            state = match state {
                Resolution::Found(entry) => {
                    let holder = opened.map_or(Holder::Given, Holder::Opened);
                    return Ok((entry, holder));
                }
                Resolution::Descending { folder, remaining } => {
                    let listing = opened.as_ref().map_or(&cursor.listing[..], |c| &c.listing[..]);
                    Resolution::descend(reference, folder, remaining, listing)?
                }
                Resolution::NeedsListing {
                    url,
                    folder,
                    remaining,
                } => {
                    let listing = self.fetch_listing(&Address::Known(url)).await?;
                    opened = Some(Cursor {
                        folder: folder.clone(),
                        listing,
                    });
                    Resolution::Descending { folder, remaining }
                }
                Resolution::EscapedToRoot { path } => {
                    let entry = self.lookup_from_root(reference, &path).await?;
                    let parent = path
                        .split_last()
                        .map(|(_, parent)| parent.to_vec())
                        .unwrap_or_default();
                    return Ok((entry, Holder::Unlisted(FolderContext::new(parent))));
                }
            };
        }
    }

    /// Looks a path up directly from the repository root
    async fn lookup_from_root(&self, reference: &str, path: &[String]) -> Result<Entry> {
        let url = self.repo.contents_url(path);
        log::debug!("resolve {}: escaped to root, looking up {}", reference, url);

        let not_found = || PreviewError::FileNotFound(reference.to_string());

        match self.get_contents(&url).await? {
            (_, Some(Contents::Single(entry))) => match &entry.kind {
                EntryKind::File => Ok(entry),
                EntryKind::Dir => Err(not_found()),
                EntryKind::Other(kind) => Err(PreviewError::UnknownEntryType {
                    name: entry.name.clone(),
                    kind: kind.clone(),
                }),
            },
            // The path names a folder
            (_, Some(Contents::Listing(_))) => Err(not_found()),
            (response, None) if response.status == 404 => Err(not_found()),
            (response, None) => Err(PreviewError::InvalidRepository {
                repo: self.repo.repo.clone(),
                url,
                status: response.status,
            }),
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is TreeFetcher generic over F?
//    - In production F is HttpFetch (real network)
//    - In tests F is MemoryFetch (a HashMap of canned answers)
//    - The code in this file doesn't know or care which one it has
//
// 2. What does `state = match state { ... }` do?
//    - Each arm consumes the old state and produces the next one
//    - Found and EscapedToRoot `return` instead, which ends the loop
//    - The compiler makes sure every state is handled
// -----------------------------------------------------------------------------
