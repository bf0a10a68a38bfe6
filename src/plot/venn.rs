use plotters::prelude::*;
use std::path::Path;

use super::{centered, drawing, ensure_parent, Result, BLUE, FONT, RED};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VennCounts {
    pub left_only: usize,
    pub right_only: usize,
    pub both: usize,
}

/// Draws a two-set overlap diagram. Circle sizes are fixed; only the region
/// counts carry information.
pub fn draw_venn(
    counts: &VennCounts,
    set_labels: (&str, &str),
    title: &str,
    notes: &[String],
    output: &Path,
) -> Result<()> {
    ensure_parent(output)?;

    let root = SVGBackend::new(output, (1000, 800)).into_drawing_area();
    root.fill(&WHITE).map_err(drawing)?;
    let area = root.titled(title, (FONT, 28)).map_err(drawing)?;

    let radius = 230;
    let (left_x, right_x, center_y) = (370, 630, 360);

    for (x, color) in [(left_x, RED), (right_x, BLUE)] {
        area.draw(&Circle::new((x, center_y), radius, color.mix(0.55).filled()))
            .map_err(drawing)?;
        area.draw(&Circle::new((x, center_y), radius, BLACK.stroke_width(1)))
            .map_err(drawing)?;
    }

    let regions = [
        (counts.left_only, left_x - radius / 2),
        (counts.both, (left_x + right_x) / 2),
        (counts.right_only, right_x + radius / 2),
    ];
    for (count, x) in regions {
        area.draw(&Text::new(format_count(count), (x, center_y), centered(24)))
            .map_err(drawing)?;
    }

    let label_y = center_y + radius + 30;
    area.draw(&Text::new(set_labels.0, (left_x, label_y), centered(22)))
        .map_err(drawing)?;
    area.draw(&Text::new(set_labels.1, (right_x, label_y), centered(22)))
        .map_err(drawing)?;

    let notes_top = label_y + 40;
    for (idx, line) in notes.iter().enumerate() {
        area.draw(&Text::new(
            line.as_str(),
            (20, notes_top + idx as i32 * 20),
            (FONT, 15).into_font(),
        ))
        .map_err(drawing)?;
    }

    root.present().map_err(drawing)?;
    Ok(())
}

fn format_count(count: usize) -> String {
    crate::utils::format_thousands(count as u64)
}
