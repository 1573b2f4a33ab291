// src/github/mod.rs
// =============================================================================
// This module handles everything that talks to GitHub.
//
// Submodules:
// - location: Parsing folder URLs into owner/repo/branch/path
// - contents: The JSON shapes of the contents API
// - fetch: The raw GET primitive (reqwest in production)
// - tree: Lazy folder listing, path lookup and file downloads
// =============================================================================

mod contents;
mod fetch;
mod tree;
mod location;

#[cfg(test)]
pub mod memory;

pub use contents::{Entry, EntryKind, Listing};
pub use fetch::{Fetch, HttpFetch};
pub use tree::{ContentKind, TreeFetcher};
pub use location::RepoLocation;
