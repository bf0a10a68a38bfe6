use plotters::prelude::*;
use std::path::Path;

use super::{centered, drawing, ensure_parent, PlotError, Result, FONT, GREY, RED};

/// One column of a two-part percentage bar.
#[derive(Debug, Clone)]
pub struct StackedBar {
    pub label: String,
    pub lower: usize,
    pub upper: usize,
}

impl StackedBar {
    pub fn new(label: &str, lower: usize, upper: usize) -> Self {
        Self {
            label: label.to_string(),
            lower,
            upper,
        }
    }

    fn total(&self) -> usize {
        self.lower + self.upper
    }

    pub fn lower_pct(&self) -> f64 {
        chipseq::percentage(self.lower, self.total())
    }

    pub fn upper_pct(&self) -> f64 {
        chipseq::percentage(self.upper, self.total())
    }
}

/// Draws 100% stacked bars with the raw counts written inside each part.
pub fn draw_stacked_percentages(
    bars: &[StackedBar],
    series_labels: (&str, &str),
    title: &str,
    output: &Path,
) -> Result<()> {
    if bars.is_empty() {
        return Err(PlotError::InvalidData("No bars to draw".to_string()));
    }
    ensure_parent(output)?;

    let root = SVGBackend::new(output, (1000, 700)).into_drawing_area();
    root.fill(&WHITE).map_err(drawing)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 26))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d((0..bars.len()).into_segmented(), 0f64..105f64)
        .map_err(drawing)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("Percentage of Genes")
        .x_labels(bars.len())
        .x_label_formatter(&|value| match value {
            SegmentValue::CenterOf(idx) => bars
                .get(*idx)
                .map(|bar| bar.label.clone())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .draw()
        .map_err(drawing)?;

    chart
        .draw_series(bars.iter().enumerate().map(|(idx, bar)| {
            let mut rect = Rectangle::new(
                [
                    (SegmentValue::Exact(idx), 0.0),
                    (SegmentValue::Exact(idx + 1), bar.lower_pct()),
                ],
                RED.filled(),
            );
            rect.set_margin(0, 0, 20, 20);
            rect
        }))
        .map_err(drawing)?
        .label(series_labels.0)
        .legend(|(x, y)| Rectangle::new([(x, y - 6), (x + 12, y + 6)], RED.filled()));

    chart
        .draw_series(bars.iter().enumerate().map(|(idx, bar)| {
            let lower = bar.lower_pct();
            let mut rect = Rectangle::new(
                [
                    (SegmentValue::Exact(idx), lower),
                    (SegmentValue::Exact(idx + 1), lower + bar.upper_pct()),
                ],
                GREY.filled(),
            );
            rect.set_margin(0, 0, 20, 20);
            rect
        }))
        .map_err(drawing)?
        .label(series_labels.1)
        .legend(|(x, y)| Rectangle::new([(x, y - 6), (x + 12, y + 6)], GREY.filled()));

    chart
        .draw_series(bars.iter().enumerate().flat_map(|(idx, bar)| {
            let lower = bar.lower_pct();
            let upper = bar.upper_pct();
            [
                Text::new(
                    bar.lower.to_string(),
                    (SegmentValue::CenterOf(idx), lower / 2.0),
                    centered(16),
                ),
                Text::new(
                    bar.upper.to_string(),
                    (SegmentValue::CenterOf(idx), lower + upper / 2.0),
                    centered(16),
                ),
            ]
        }))
        .map_err(drawing)?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.9))
        .border_style(BLACK)
        .draw()
        .map_err(drawing)?;

    root.present().map_err(drawing)?;
    Ok(())
}

/// A labelled horizontal bar, coloured by its group.
#[derive(Debug, Clone)]
pub struct RankedBar {
    pub label: String,
    pub value: f64,
    pub color: RGBColor,
}

/// Draws horizontal bars in the given order (first bar at the bottom),
/// optionally with a vertical reference line.
pub fn draw_ranked_bars<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    bars: &[RankedBar],
    title: &str,
    x_desc: &str,
    reference: Option<(f64, &str)>,
) -> Result<()> {
    if bars.is_empty() {
        return Err(PlotError::InvalidData("No bars to draw".to_string()));
    }

    let max_value = bars
        .iter()
        .map(|bar| bar.value)
        .chain(reference.map(|(x, _)| x))
        .fold(0.0f64, f64::max);
    let x_max = if max_value > 0.0 { max_value * 1.15 } else { 1.0 };

    let mut chart = ChartBuilder::on(area)
        .caption(title, (FONT, 22))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(300)
        .build_cartesian_2d(0f64..x_max, (0..bars.len()).into_segmented())
        .map_err(drawing)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc(x_desc)
        .y_labels(bars.len())
        .y_label_formatter(&|value| match value {
            SegmentValue::CenterOf(idx) => bars
                .get(*idx)
                .map(|bar| bar.label.clone())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .draw()
        .map_err(drawing)?;

    chart
        .draw_series(bars.iter().enumerate().map(|(idx, bar)| {
            let mut rect = Rectangle::new(
                [
                    (0.0, SegmentValue::Exact(idx)),
                    (bar.value, SegmentValue::Exact(idx + 1)),
                ],
                bar.color.mix(0.75).filled(),
            );
            rect.set_margin(4, 4, 0, 0);
            rect
        }))
        .map_err(drawing)?;

    chart
        .draw_series(bars.iter().enumerate().map(|(idx, bar)| {
            Text::new(
                format!("{:.1}", bar.value),
                (bar.value + x_max * 0.01, SegmentValue::CenterOf(idx)),
                (FONT, 13).into_font(),
            )
        }))
        .map_err(drawing)?;

    if let Some((x, label)) = reference {
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![
                    (x, SegmentValue::Exact(0)),
                    (x, SegmentValue::Exact(bars.len())),
                ],
                RED.stroke_width(2),
            )))
            .map_err(drawing)?
            .label(label)
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], RED.stroke_width(2)));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerRight)
            .background_style(WHITE.mix(0.9))
            .border_style(BLACK)
            .draw()
            .map_err(drawing)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_stacked_bar_percentages() {
        let bar = StackedBar::new("Up", 3, 1);
        assert_eq!(bar.lower_pct(), 75.0);
        assert_eq!(bar.upper_pct(), 25.0);

        let empty = StackedBar::new("Down", 0, 0);
        assert_eq!(empty.lower_pct(), 0.0);
        assert_eq!(empty.upper_pct(), 0.0);
    }

    #[test]
    fn test_draw_stacked_percentages_writes_svg() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let output = dir.path().join("figures").join("bars.svg");

        let bars = vec![
            StackedBar::new("Up TSS", 3, 7),
            StackedBar::new("Down TSS", 0, 0),
        ];
        draw_stacked_percentages(&bars, ("Bound", "Not Bound"), "Binding", &output)?;

        let svg = std::fs::read_to_string(&output)?;
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Binding"));
        Ok(())
    }

    #[test]
    fn test_empty_bars_rejected() {
        let dir = tempdir().unwrap();
        let result = draw_stacked_percentages(&[], ("a", "b"), "t", &dir.path().join("x.svg"));
        assert!(matches!(result, Err(PlotError::InvalidData(_))));
    }
}
