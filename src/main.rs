// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Run one preview: fetch the folder, inline its entry document
// 3. Hand the finished page to a render target (file or stdout)
// 4. Exit with proper code (0 = success, 2 = error)
//
// Progress goes to stderr so stdout only ever carries the page itself.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod error; // src/error.rs - every way a run can fail
mod github; // src/github/ - GitHub contents API access
mod inline; // src/inline/ - entry document parsing and inlining
mod preview; // src/preview.rs - one run from URL to page
mod render; // src/render.rs - where the page ends up
mod resolve; // src/resolve/ - path resolution over the remote tree

use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;

use cli::Cli;
use github::HttpFetch;
use preview::PreviewConfig;
use render::{PageFormat, RenderTarget, WriterTarget};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Every failure is reported once, here, and ends the run
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    eprintln!("🔍 Previewing GitHub folder: {}", cli.folder_url);

    let config = PreviewConfig {
        entry: cli.entry.clone(),
        api_base: cli.api_base.clone(),
        ..PreviewConfig::new(cli.folder_url.clone())
    };

    let fetch = HttpFetch::new(cli.token.as_deref()).context("could not build HTTP client")?;
    let page = preview::preview_folder(fetch, &config).await?;

    eprintln!("📄 Rendered \"{}\"", page.title);

    let format = if cli.json {
        PageFormat::Json
    } else if cli.raw {
        PageFormat::Raw
    } else {
        PageFormat::Framed
    };

    let writer: Box<dyn Write> = match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("could not create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    WriterTarget::new(writer, format).render(&page)?;

    if let Some(path) = &cli.output {
        eprintln!("✅ Wrote {}", path.display());
    }

    Ok(())
}
