use plotters::prelude::*;
use std::path::Path;

use crate::data::EnrichmentTerm;
use crate::plot::{
    draw_ranked_bars, drawing, PlotError, RankedBar, Result, FONT, PALETTE,
};

/// Significance marker on the p-value panel.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Library colours in first-seen order.
pub fn library_colors(terms: &[EnrichmentTerm]) -> Vec<(String, RGBColor)> {
    let mut colors: Vec<(String, RGBColor)> = Vec::new();
    for term in terms {
        if !colors.iter().any(|(library, _)| *library == term.library) {
            let color = PALETTE[colors.len() % PALETTE.len()];
            colors.push((term.library.clone(), color));
        }
    }
    colors
}

/// Terms ordered by ascending combined score, so the strongest ends up on top.
pub fn sorted_by_score(terms: &[EnrichmentTerm]) -> Vec<&EnrichmentTerm> {
    let mut sorted: Vec<&EnrichmentTerm> = terms.iter().collect();
    sorted.sort_by(|a, b| a.combined_score.total_cmp(&b.combined_score));
    sorted
}

/// Two panels side by side: combined score and `-log10(padj)`.
pub fn draw_enrichment_figure(terms: &[EnrichmentTerm], title: &str, output: &Path) -> Result<()> {
    if terms.is_empty() {
        return Err(PlotError::InvalidData("No enrichment terms".to_string()));
    }
    crate::plot::ensure_parent(output)?;

    let colors = library_colors(terms);
    let color_of = |library: &str| {
        colors
            .iter()
            .find(|(name, _)| name == library)
            .map(|(_, color)| *color)
            .unwrap_or(BLACK)
    };

    let sorted = sorted_by_score(terms);
    let score_bars: Vec<RankedBar> = sorted
        .iter()
        .map(|term| RankedBar {
            label: term.term.clone(),
            value: term.combined_score,
            color: color_of(&term.library),
        })
        .collect();
    let significance_bars: Vec<RankedBar> = sorted
        .iter()
        .map(|term| RankedBar {
            label: term.term.clone(),
            value: term.neg_log10_padj(),
            color: color_of(&term.library),
        })
        .collect();

    let height = 200 + 40 * terms.len() as u32;
    let root = SVGBackend::new(output, (1800, height)).into_drawing_area();
    root.fill(&WHITE).map_err(drawing)?;
    let root = root.titled(title, (FONT, 28)).map_err(drawing)?;

    let (legend, panels) = root.split_vertically(50);
    for (idx, (library, color)) in colors.iter().enumerate() {
        let x = 40 + idx as i32 * 260;
        legend
            .draw(&Rectangle::new([(x, 15), (x + 24, 35)], color.mix(0.75).filled()))
            .map_err(drawing)?;
        legend
            .draw(&Text::new(library.as_str(), (x + 32, 18), (FONT, 18).into_font()))
            .map_err(drawing)?;
    }

    let (left, right) = panels.split_horizontally(900);
    draw_ranked_bars(
        &left,
        &score_bars,
        "Enrichment Strength",
        "Combined Score",
        None,
    )?;
    draw_ranked_bars(
        &right,
        &significance_bars,
        "Statistical Significance",
        "-log10(Adjusted P-value)",
        Some((-SIGNIFICANCE_LEVEL.log10(), "p = 0.05")),
    )?;

    root.present().map_err(drawing)?;
    Ok(())
}
