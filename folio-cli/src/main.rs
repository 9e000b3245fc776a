mod cli;
mod document;
mod logging;

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use folio_render::RecordingRenderer;

use crate::cli::{Args, Output};
use crate::document::{load_document, probe_image_size};
use crate::logging::setup_logging;

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let page = args.page_setup();
    let mut doc = load_document(&args.document)?;
    tracing::info!(page = ?page.size, "laying out {}", args.document.display());

    let json = match args.output {
        Output::Rects => serde_json::to_string_pretty(&doc.rects(&page)?)?,
        Output::DisplayList => {
            let mut renderer = RecordingRenderer::new(page);
            let base_dir = args.document.parent().unwrap_or(Path::new("."));
            for source in doc.image_sources() {
                if let Some(size) = probe_image_size(base_dir, source) {
                    renderer.set_image_size(source, size);
                }
            }
            // Explicit sizes override probed ones.
            for (source, size) in &args.image_sizes {
                renderer.set_image_size(source.clone(), *size);
            }
            serde_json::to_string_pretty(&doc.display_list(renderer)?)?
        }
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}").context("failed to write output")?;
    Ok(())
}
