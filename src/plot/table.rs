use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontStyle;
use std::path::Path;

use super::{centered, drawing, ensure_parent, PlotError, Result, FONT, HEADER_BLUE, STRIPE_BLUE};

const ROW_HEIGHT: i32 = 44;
const COLUMN_WIDTH: i32 = 240;
const MARGIN: i32 = 30;
const TITLE_HEIGHT: i32 = 60;

/// Renders a table as an image: a filled header row and striped body rows.
pub fn draw_table(headers: &[&str], rows: &[Vec<String>], title: &str, output: &Path) -> Result<()> {
    if headers.is_empty() {
        return Err(PlotError::InvalidData("Table has no columns".to_string()));
    }
    if let Some(row) = rows.iter().find(|row| row.len() != headers.len()) {
        return Err(PlotError::InvalidData(format!(
            "Row has {} cells but the table has {} columns",
            row.len(),
            headers.len()
        )));
    }
    ensure_parent(output)?;

    let columns = headers.len() as i32;
    let width = (2 * MARGIN + columns * COLUMN_WIDTH) as u32;
    let height = (2 * MARGIN + TITLE_HEIGHT + (rows.len() as i32 + 1) * ROW_HEIGHT) as u32;

    let root = SVGBackend::new(output, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(drawing)?;

    root.draw(&Text::new(
        title,
        (width as i32 / 2, MARGIN + TITLE_HEIGHT / 2),
        centered(22),
    ))
    .map_err(drawing)?;

    let top = MARGIN + TITLE_HEIGHT;
    let header_text = (FONT, 16)
        .into_font()
        .style(FontStyle::Bold)
        .color(&WHITE)
        .pos(Pos::new(HPos::Center, VPos::Center));

    for (col, header) in headers.iter().enumerate() {
        let x0 = MARGIN + col as i32 * COLUMN_WIDTH;
        draw_cell(&root, x0, top, HEADER_BLUE.filled())?;
        root.draw(&Text::new(
            *header,
            (x0 + COLUMN_WIDTH / 2, top + ROW_HEIGHT / 2),
            header_text.clone(),
        ))
        .map_err(drawing)?;
    }

    for (row_idx, row) in rows.iter().enumerate() {
        let y0 = top + (row_idx as i32 + 1) * ROW_HEIGHT;
        let fill = if (row_idx + 1) % 2 == 0 {
            STRIPE_BLUE.filled()
        } else {
            WHITE.filled()
        };

        for (col, cell) in row.iter().enumerate() {
            let x0 = MARGIN + col as i32 * COLUMN_WIDTH;
            draw_cell(&root, x0, y0, fill)?;
            root.draw(&Text::new(
                cell.as_str(),
                (x0 + COLUMN_WIDTH / 2, y0 + ROW_HEIGHT / 2),
                centered(15),
            ))
            .map_err(drawing)?;
        }
    }

    root.present().map_err(drawing)?;
    Ok(())
}

fn draw_cell<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    x0: i32,
    y0: i32,
    fill: ShapeStyle,
) -> Result<()> {
    let corners = [(x0, y0), (x0 + COLUMN_WIDTH, y0 + ROW_HEIGHT)];
    area.draw(&Rectangle::new(corners, fill)).map_err(drawing)?;
    area.draw(&Rectangle::new(corners, BLACK.stroke_width(1)))
        .map_err(drawing)?;
    Ok(())
}
