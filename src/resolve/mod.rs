// src/resolve/mod.rs
// =============================================================================
// Works out which remote file a reference points at.
//
// The remote tree is only partially known: we hold the listing of one folder
// (the cursor) and nothing about its parents or siblings. Resolving a path is
// a small state machine:
//
//   Descending     match the next segment against a listing we hold
//   NeedsListing   the segment was a folder; fetch its listing, keep going
//   EscapedToRoot  the path leaves the cursor's subtree; look it up directly
//                  from the repository root
//   Found          the path ended on a file
//
// Any failure ends the machine with an Err.
//
// This module never does I/O. The driver that fetches listings lives in
// github::tree and feeds them back in.
// =============================================================================

mod path;

pub use path::{normalize, LocationRef};

use crate::error::{PreviewError, Result};
use crate::github::{Entry, EntryKind, Listing};

/// Folder name of the repository root; never equal to a real segment
pub const ROOT: &str = "/";

/// The folder a listing belongs to, as a path from the repository root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderContext {
    pub path: Vec<String>,
}

impl FolderContext {
    pub fn new(path: Vec<String>) -> Self {
        Self { path }
    }

    /// Name of this folder, or ROOT at the top of the repository
    pub fn name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or(ROOT)
    }

    pub fn child(&self, name: &str) -> Self {
        let mut path = self.path.clone();
        path.push(name.to_string());
        Self { path }
    }
}

/// A folder whose children we already hold
#[derive(Debug, Clone)]
pub struct Cursor {
    pub folder: FolderContext,
    pub listing: Listing,
}

/// Where resolution of one reference stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Descending {
        folder: FolderContext,
        remaining: Vec<String>,
    },
    NeedsListing {
        url: String,
        folder: FolderContext,
        remaining: Vec<String>,
    },
    EscapedToRoot {
        path: Vec<String>,
    },
    Found(Entry),
}

impl Resolution {
    /// Picks the starting state for `reference`, seen from `folder`
    ///
    /// An absolute path that re-states the current folder name skips that
    /// segment and descends from here. Any other absolute path, and any path
    /// with "..", escapes to the repository root.
    pub fn start(reference: &str, folder: &FolderContext) -> Result<Self> {
        let location = LocationRef::parse(reference);

        if location.segments.is_empty() {
            return Err(PreviewError::FileNotFound(reference.to_string()));
        }

        if location.climbs() {
            let base: &[String] = if location.absolute { &[] } else { &folder.path };
            let path = normalize(base, &location.segments)
                .filter(|p| !p.is_empty())
                .ok_or_else(|| PreviewError::FileNotFound(reference.to_string()))?;
            return Ok(Resolution::EscapedToRoot { path });
        }

        if !location.absolute {
            return Ok(Resolution::Descending {
                folder: folder.clone(),
                remaining: location.segments,
            });
        }

        match location.segments.split_first() {
            Some((first, rest)) if first == folder.name() => Ok(Resolution::Descending {
                folder: folder.clone(),
                remaining: rest.to_vec(),
            }),
            _ => Ok(Resolution::EscapedToRoot {
                path: location.segments,
            }),
        }
    }

    /// Matches the next segment of a Descending state against `listing`,
    /// which must be the listing of `folder`
    pub fn descend(
        reference: &str,
        folder: FolderContext,
        remaining: Vec<String>,
        listing: &[Entry],
    ) -> Result<Self> {
        let not_found = || PreviewError::FileNotFound(reference.to_string());

        let (next, rest) = remaining.split_first().ok_or_else(not_found)?;

        let entry = listing
            .iter()
            .find(|entry| entry.name == *next)
            .ok_or_else(not_found)?;

        log::debug!(
            "resolve {}: matched {:?} in /{}",
            reference,
            entry.name,
            folder.path.join("/")
        );

        match &entry.kind {
            EntryKind::File if rest.is_empty() => Ok(Resolution::Found(entry.clone())),
            EntryKind::Dir if !rest.is_empty() => Ok(Resolution::NeedsListing {
                url: entry.url.clone(),
                folder: folder.child(&entry.name),
                remaining: rest.to_vec(),
            }),
            // A file in the middle of a path, or a path ending on a folder
            EntryKind::File | EntryKind::Dir => Err(not_found()),
            EntryKind::Other(kind) => Err(PreviewError::UnknownEntryType {
                name: entry.name.clone(),
                kind: kind.clone(),
            }),
        }
    }
}
