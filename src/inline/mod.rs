// src/inline/mod.rs
// =============================================================================
// This module turns an entry document into one self-contained page.
//
// Submodules:
// - parser: Splits the document into line events (joins wrapped tags)
// - inliner: Fetches what the events reference and writes the output
// - image: data: URIs for fetched images
// =============================================================================

mod image;
mod inliner;
mod parser;

pub use inliner::{Inlined, Inliner};
