// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// All configuration comes from here. The two settings you'd normally keep
// out of shell history (--token) or set once per machine (--api-base) can
// also come from environment variables.
// =============================================================================

use std::path::PathBuf;

use clap::Parser;

use crate::preview::{DEFAULT_API_BASE, DEFAULT_ENTRY};

// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "repo-preview",
    version,
    about = "Preview a static site stored in a GitHub repository folder",
    long_about = "repo-preview fetches a folder of a GitHub repository, inlines the local \
                  stylesheets, scripts and images of its entry document, and writes one \
                  self-contained page you can open in a browser."
)]
pub struct Cli {
    /// GitHub folder URL (e.g., https://github.com/user/repo/tree/main/site)
    ///
    /// This is a positional argument (required, no flag needed)
    pub folder_url: String,

    /// Entry document inside the folder
    #[arg(long, default_value = DEFAULT_ENTRY)]
    pub entry: String,

    /// Write the page here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write only the inlined document, without the full-window frame around it
    #[arg(long, conflicts_with = "json")]
    pub raw: bool,

    /// Write the title and document as JSON
    #[arg(long)]
    pub json: bool,

    /// Root of the GitHub REST API (for GitHub Enterprise)
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Token for authenticated requests (higher rate limit, private repos)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}
