//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use folio_layout::Size;
use folio_render::page::{DEFAULT_MARGIN, Margins, PageSetup};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PageSize {
    A4,
    Letter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Output {
    /// Resolved rectangle of every node.
    Rects,
    /// Draw calls in paint order.
    DisplayList,
}

/// Lay out a JSON document description and print its geometry as JSON.
#[derive(Debug, Parser)]
#[command(name = "folio", version, about)]
pub struct Args {
    /// Path to the document description.
    pub document: PathBuf,

    /// Page size preset.
    #[arg(long, value_enum, default_value_t = PageSize::A4)]
    pub page: PageSize,

    /// Uniform page margin in points.
    #[arg(long, default_value_t = DEFAULT_MARGIN)]
    pub margin: f32,

    /// What to print.
    #[arg(long, value_enum, default_value_t = Output::Rects)]
    pub output: Output,

    /// Intrinsic image size, as `SOURCE=WIDTHxHEIGHT`. Repeatable.
    #[arg(long = "image-size", value_parser = parse_image_size)]
    pub image_sizes: Vec<(String, Size)>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn page_setup(&self) -> PageSetup {
        let page = match self.page {
            PageSize::A4 => PageSetup::a4(),
            PageSize::Letter => PageSetup::letter(),
        };
        page.margins(Margins::all(self.margin))
    }
}

fn parse_image_size(arg: &str) -> Result<(String, Size), String> {
    let (source, dims) = arg
        .rsplit_once('=')
        .ok_or_else(|| format!("expected SOURCE=WIDTHxHEIGHT, got {arg:?}"))?;
    let (width, height) = dims
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {dims:?}"))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<f32>()
            .map_err(|e| format!("invalid dimension {s:?}: {e}"))
    };
    Ok((source.to_string(), Size::new(parse(width)?, parse(height)?)))
}
