//! Markup emitter: combines the grid with the resolved column widths, merge
//! layout and style declarations into a table plus stylesheet.

use std::collections::BTreeMap;

use super::document::RenderedSheet;
use super::markup::{cell_text_html, escape_html};
use super::style_map::{
    resolve_styles, sanitize_class_name, sanitize_css_value, StyleDeclaration, WRAP_DECLARATION,
};
use crate::config::RenderConfig;
use crate::error::{Result, XlmarkupError};
use crate::layout::{
    char_width_to_px, resolve_column_widths, resolve_merges, table_width_hint, ColumnWidthMap,
    MergeLayout, MergeWidth,
};
use crate::types::{Cell, Grid, RenderCoord};

/// Render a grid with the default configuration.
pub fn render(grid: &Grid) -> RenderedSheet {
    render_with(grid, &RenderConfig::default())
}

/// Render a grid. Never fails: any fault in the styled pipeline is logged
/// and the plain fallback table is returned instead.
pub fn render_with(grid: &Grid, config: &RenderConfig) -> RenderedSheet {
    match render_styled(grid, config) {
        Ok(sheet) => sheet,
        Err(e) => {
            log::error!(
                "Rendering sheet '{}' failed, emitting plain table: {e}",
                grid.sheet_name()
            );
            render_fallback(grid, config)
        }
    }
}

fn render_styled(grid: &Grid, config: &RenderConfig) -> Result<RenderedSheet> {
    grid.validate()
        .map_err(|e| XlmarkupError::Layout(e.to_string()))?;

    let column_widths = resolve_column_widths(grid, &config.text_width);
    let merges = resolve_merges(grid, &config.text_width);
    let styles = resolve_styles(grid)?;

    emit(grid, &column_widths, &merges, &styles, config)
}

/// Compose the final table and stylesheet from the resolver outputs.
///
/// # Errors
/// Returns [`XlmarkupError::Layout`] when a cell cannot be placed in
/// render-space.
pub fn emit(
    grid: &Grid,
    column_widths: &ColumnWidthMap,
    merges: &MergeLayout,
    styles: &BTreeMap<RenderCoord, StyleDeclaration>,
    config: &RenderConfig,
) -> Result<RenderedSheet> {
    let bounds = grid.bounds();
    let min_width = config.text_width.min_width_px;
    let mut markup = format!("<table class=\"{}\">\n", table_class(config));
    let mut emitted_cells = 0usize;
    let rows = ordered_rows(grid);

    for (row, cells) in &rows {
        match grid.row_height(*row).filter(|h| h.is_finite() && *h > 0.0) {
            Some(height) => markup.push_str(&format!("<tr style=\"height: {height}px;\">\n")),
            None => markup.push_str("<tr>\n"),
        }

        for cell in cells {
            let coord = bounds.to_render(cell.address()).ok_or_else(|| {
                XlmarkupError::Layout(format!("cell {} outside {bounds}", cell.address()))
            })?;
            if merges.is_suppressed(coord) {
                continue;
            }

            let column_px = column_px(grid, column_widths, cell.col, min_width);
            let mut attrs = format!("class=\"cell-{}-{}\"", coord.row, coord.col);
            let width = match merges.span_at(coord) {
                Some(span) => {
                    if span.col_span > 1 {
                        attrs.push_str(&format!(" colspan=\"{}\"", span.col_span));
                    }
                    if span.row_span > 1 {
                        attrs.push_str(&format!(" rowspan=\"{}\"", span.row_span));
                    }
                    span.width.unwrap_or_else(|| single_width(column_px))
                }
                None => single_width(column_px),
            };

            markup.push_str(&format!(
                "<td {attrs} style=\"min-width: {}px; max-width: {}px;\">{}</td>\n",
                width.min_px,
                width.max_px,
                cell_text_html(&cell.formatted_text())
            ));
            emitted_cells += 1;
        }

        markup.push_str("</tr>\n");
    }
    markup.push_str("</table>\n");

    let mut stylesheet = base_stylesheet(config);
    for (coord, decl) in styles {
        if merges.is_suppressed(*coord) {
            continue;
        }
        stylesheet.push_str(&format!(
            ".cell-{}-{} {{ {} }}\n",
            coord.row,
            coord.col,
            decl.to_css()
        ));
    }

    log::debug!(
        "Rendered sheet '{}': {} rows, {} cells, {} merges, {} styled cells",
        grid.sheet_name(),
        rows.len(),
        emitted_cells,
        merges.spans().count(),
        styles.len()
    );

    Ok(RenderedSheet {
        markup,
        stylesheet,
        width_hint: table_width_hint(grid),
        fallback: false,
        language: config.language.clone(),
    })
}

/// Minimal table of raw display values, without styles, spans or widths.
pub fn render_fallback(grid: &Grid, config: &RenderConfig) -> RenderedSheet {
    let mut markup = String::from("<table>\n");
    for row in grid.rows() {
        markup.push_str("<tr>");
        for cell in row {
            markup.push_str("<td>");
            markup.push_str(&escape_html(&cell.display_text()));
            markup.push_str("</td>");
        }
        markup.push_str("</tr>\n");
    }
    markup.push_str("</table>\n");

    RenderedSheet {
        markup,
        stylesheet: FALLBACK_STYLESHEET.to_string(),
        width_hint: table_width_hint(grid),
        fallback: true,
        language: config.language.clone(),
    }
}

const FALLBACK_STYLESHEET: &str = "table { border-collapse: collapse; }\n\
td { border: 1px solid #ccc; padding: 8px; }\n";

/// Configured table class reduced to identifier characters.
fn table_class(config: &RenderConfig) -> String {
    let class = sanitize_class_name(&config.table_class);
    if class.is_empty() {
        RenderConfig::default().table_class
    } else {
        class
    }
}

fn base_stylesheet(config: &RenderConfig) -> String {
    let class = table_class(config);
    format!(
        ".{class} {{ border-collapse: collapse; font-family: {}; font-size: {}px; \
         width: auto; table-layout: auto; }}\n\
         .{class} td {{ border: 1px solid {}; padding: {}; vertical-align: top; \
         {WRAP_DECLARATION} word-break: break-word; }}\n",
        sanitize_css_value(&config.font_family),
        config.font_size_px,
        sanitize_css_value(&config.grid_line_color),
        sanitize_css_value(&config.cell_padding),
    )
}

/// Explicit column width when the grid declares one, else the estimate,
/// never below the general minimum.
fn column_px(grid: &Grid, column_widths: &ColumnWidthMap, col: u32, min_width: u32) -> u32 {
    grid.column_width(col)
        .map(char_width_to_px)
        .or_else(|| column_widths.get(col))
        .unwrap_or(min_width)
        .max(min_width)
}

fn single_width(px: u32) -> MergeWidth {
    MergeWidth {
        min_px: px,
        max_px: px.saturating_mul(2),
    }
}

/// Cells grouped by row, rows ascending and cells left to right.
fn ordered_rows(grid: &Grid) -> Vec<(u32, Vec<&Cell>)> {
    let mut cells: Vec<&Cell> = grid.cells().collect();
    cells.sort_by_key(|c| (c.row, c.col));

    let mut rows: Vec<(u32, Vec<&Cell>)> = Vec::new();
    for cell in cells {
        match rows.last_mut() {
            Some((row, group)) if *row == cell.row => group.push(cell),
            _ => rows.push((cell.row, vec![cell])),
        }
    }
    rows
}
