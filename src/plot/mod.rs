//! SVG figures rendered with [`plotters`].
//!
//! Only the SVG backend is compiled in, so rendering needs no system fonts
//! and works headless.

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::{fmt::Display, fs, path::Path};
use thiserror::Error;

pub mod bars;
pub mod table;
pub mod venn;

pub use bars::{draw_ranked_bars, draw_stacked_percentages, RankedBar, StackedBar};
pub use table::draw_table;
pub use venn::{draw_venn, VennCounts};

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to draw figure: {0}")]
    Drawing(String),

    #[error("Failed to prepare output location: {0}")]
    Output(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = core::result::Result<T, PlotError>;

pub const FONT: &str = "sans-serif";

pub const RED: RGBColor = RGBColor(0xd6, 0x27, 0x28);
pub const BLUE: RGBColor = RGBColor(0x1f, 0x77, 0xb4);
pub const GREEN: RGBColor = RGBColor(0x2c, 0xa0, 0x2c);
pub const GREY: RGBColor = RGBColor(0x80, 0x80, 0x80);
pub const HEADER_BLUE: RGBColor = RGBColor(0x44, 0x72, 0xc4);
pub const STRIPE_BLUE: RGBColor = RGBColor(0xd9, 0xe2, 0xf3);

/// Colours cycled through for categorical series.
pub const PALETTE: [RGBColor; 4] = [RED, BLUE, GREEN, GREY];

pub(crate) fn drawing<E: Display>(err: E) -> PlotError {
    PlotError::Drawing(err.to_string())
}

pub(crate) fn centered(size: u32) -> TextStyle<'static> {
    TextStyle::from((FONT, size).into_font()).pos(Pos::new(HPos::Center, VPos::Center))
}

/// Creates the parent directory of `output` if needed.
pub(crate) fn ensure_parent(output: &Path) -> Result<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
