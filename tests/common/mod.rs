//! Common test utilities and assertion helpers for rendered sheets.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::cast_lossless
)]

use xlmarkup::RenderedSheet;

// ============================================================================
// Markup Lookup
// ============================================================================

/// The `<td ...>...</td>` element carrying `class="cell-{row}-{col}"`.
pub fn find_td(markup: &str, row: u32, col: u32) -> Option<&str> {
    let needle = format!("class=\"cell-{row}-{col}\"");
    let at = markup.find(&needle)?;
    let start = markup[..at].rfind("<td")?;
    let end = markup[at..].find("</td>")? + at + "</td>".len();
    Some(&markup[start..end])
}

/// Inner content of a cell element.
pub fn td_text(markup: &str, row: u32, col: u32) -> Option<&str> {
    let td = find_td(markup, row, col)?;
    let open_end = td.find('>')? + 1;
    let close = td.rfind("</td>")?;
    Some(&td[open_end..close])
}

/// Declaration body of the `.cell-{row}-{col}` rule.
pub fn css_rule(stylesheet: &str, row: u32, col: u32) -> Option<&str> {
    let selector = format!(".cell-{row}-{col} {{ ");
    let start = stylesheet.find(&selector)? + selector.len();
    let end = stylesheet[start..].find(" }")? + start;
    Some(&stylesheet[start..end])
}

/// Number of emitted cell elements.
pub fn td_count(markup: &str) -> usize {
    markup.matches("<td").count()
}

// ============================================================================
// Assertions
// ============================================================================

pub fn assert_cell_text(sheet: &RenderedSheet, row: u32, col: u32, expected: &str) {
    let text = td_text(&sheet.markup, row, col)
        .unwrap_or_else(|| panic!("Cell at row={row}, col={col} not emitted"));
    assert_eq!(text, expected, "Cell text mismatch at row={row}, col={col}");
}

pub fn assert_cell_width(sheet: &RenderedSheet, row: u32, col: u32, min_px: u32, max_px: u32) {
    let td = find_td(&sheet.markup, row, col)
        .unwrap_or_else(|| panic!("Cell at row={row}, col={col} not emitted"));
    let expected = format!("min-width: {min_px}px; max-width: {max_px}px;");
    assert!(
        td.contains(&expected),
        "Cell at row={row}, col={col} expected `{expected}` in {td}"
    );
}

pub fn assert_rule_contains(sheet: &RenderedSheet, row: u32, col: u32, declaration: &str) {
    let rule = css_rule(&sheet.stylesheet, row, col)
        .unwrap_or_else(|| panic!("No rule for cell at row={row}, col={col}"));
    assert!(
        rule.contains(declaration),
        "Rule for row={row}, col={col} lacks `{declaration}`: {rule}"
    );
}

pub fn assert_not_emitted(sheet: &RenderedSheet, row: u32, col: u32) {
    assert!(
        find_td(&sheet.markup, row, col).is_none(),
        "Cell at row={row}, col={col} should be suppressed"
    );
}
