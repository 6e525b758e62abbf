//! Maps source cell styles to CSS declarations.

use std::collections::BTreeMap;

use crate::color::{resolve_color, resolve_color_or_fallback};
use crate::error::{Result, XlmarkupError};
use crate::types::{BorderSide, BorderStyle, Grid, HAlign, RenderCoord, Style, VAlign};

/// Text wrapping is always on; it is emitted with every declaration block.
pub const WRAP_DECLARATION: &str = "white-space: normal; word-wrap: break-word;";

/// Text orientation derived from Excel's rotation attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    /// CSS `rotate()` angle, positive is clockwise
    Degrees(i32),
    /// One glyph per line, top to bottom (Excel's 255)
    Stacked,
}

impl Rotation {
    /// Excel: 1-90 counter-clockwise, 91-180 clockwise by `n - 90`, 255 stacked.
    pub fn from_excel(value: u32) -> Option<Self> {
        match value {
            1..=90 => i32::try_from(value).ok().map(|deg| Self::Degrees(-deg)),
            91..=180 => i32::try_from(value - 90).ok().map(Self::Degrees),
            255 => Some(Self::Stacked),
            _ => None,
        }
    }

    fn css(self) -> String {
        match self {
            Self::Degrees(deg) => format!("transform: rotate({deg}deg);"),
            Self::Stacked => "writing-mode: vertical-rl; text-orientation: upright;".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BorderEdge {
    Left,
    Right,
    Top,
    Bottom,
}

impl BorderEdge {
    fn css_name(self) -> &'static str {
        match self {
            Self::Left => "border-left",
            Self::Right => "border-right",
            Self::Top => "border-top",
            Self::Bottom => "border-bottom",
        }
    }
}

/// One-pixel border on a single edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorderDeclaration {
    pub edge: BorderEdge,
    /// CSS border-style keyword
    pub kind: &'static str,
    pub color: String,
}

/// Resolved, renderable form of a cell style.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleDeclaration {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub font_size_px: Option<f64>,
    pub font_family: Option<String>,
    pub color: Option<String>,
    pub background: Option<String>,
    pub text_align: Option<&'static str>,
    pub vertical_align: Option<&'static str>,
    pub rotation: Option<Rotation>,
    /// Left, right, top, bottom order; absent sides are omitted
    pub borders: Vec<BorderDeclaration>,
}

impl StyleDeclaration {
    /// True when nothing differs from the document default.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// The declaration block body, e.g. `font-weight: bold; ...`.
    pub fn to_css(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if self.bold {
            parts.push("font-weight: bold;".to_string());
        }
        if self.italic {
            parts.push("font-style: italic;".to_string());
        }
        if self.underline {
            parts.push("text-decoration: underline;".to_string());
        }
        if let Some(size) = self.font_size_px {
            parts.push(format!("font-size: {size}px;"));
        }
        if let Some(family) = &self.font_family {
            parts.push(format!("font-family: '{family}', sans-serif;"));
        }
        if let Some(color) = &self.color {
            parts.push(format!("color: {color};"));
        }
        if let Some(background) = &self.background {
            parts.push(format!("background-color: {background};"));
        }
        if let Some(align) = self.text_align {
            parts.push(format!("text-align: {align};"));
        }
        if let Some(align) = self.vertical_align {
            parts.push(format!("vertical-align: {align};"));
        }
        if let Some(rotation) = self.rotation {
            parts.push(rotation.css());
        }
        parts.push(WRAP_DECLARATION.to_string());
        for border in &self.borders {
            parts.push(format!(
                "{}: 1px {} {};",
                border.edge.css_name(),
                border.kind,
                border.color
            ));
        }
        parts.join(" ")
    }
}

/// Convert a source style into its declaration.
pub fn resolve_style(style: &Style) -> StyleDeclaration {
    let mut decl = StyleDeclaration::default();

    if let Some(font) = &style.font {
        decl.bold = font.bold.unwrap_or(false);
        decl.italic = font.italic.unwrap_or(false);
        decl.underline = font.underline.unwrap_or(false);
        decl.font_size_px = font.size.filter(|s| s.is_finite() && *s > 0.0);
        decl.font_family = font
            .name
            .as_deref()
            .map(sanitize_font_family)
            .filter(|name| !name.is_empty());
        decl.color = font.color.as_ref().map(resolve_color);
    }

    if let Some(fill) = &style.fill {
        decl.background = fill.color.as_ref().map(resolve_color);
    }

    if let Some(alignment) = &style.alignment {
        decl.text_align = alignment.horizontal.and_then(horizontal_css);
        decl.vertical_align = alignment.vertical.map(vertical_css);
        decl.rotation = alignment.rotation.and_then(Rotation::from_excel);
    }

    if let Some(border) = &style.border {
        let sides = [
            (BorderEdge::Left, &border.left),
            (BorderEdge::Right, &border.right),
            (BorderEdge::Top, &border.top),
            (BorderEdge::Bottom, &border.bottom),
        ];
        decl.borders = sides
            .into_iter()
            .filter_map(|(edge, side)| border_declaration(edge, side.as_ref()?))
            .collect();
    }

    decl
}

/// Declarations for every styled cell, keyed by render-space position.
/// Cells whose style maps to the defaults are left out.
///
/// # Errors
/// Returns [`XlmarkupError::Layout`] when a cell lies outside the grid bounds.
pub fn resolve_styles(grid: &Grid) -> Result<BTreeMap<RenderCoord, StyleDeclaration>> {
    let bounds = grid.bounds();
    let mut styles = BTreeMap::new();

    for cell in grid.cells() {
        let Some(style) = &cell.style else {
            continue;
        };
        let coord = bounds.to_render(cell.address()).ok_or_else(|| {
            XlmarkupError::Layout(format!("cell {} outside {bounds}", cell.address()))
        })?;
        let decl = resolve_style(style);
        if !decl.is_default() {
            styles.insert(coord, decl);
        }
    }

    Ok(styles)
}

fn border_declaration(edge: BorderEdge, side: &BorderSide) -> Option<BorderDeclaration> {
    let kind = border_kind(side.style?)?;
    Some(BorderDeclaration {
        edge,
        kind,
        color: resolve_color_or_fallback(side.color.as_ref()),
    })
}

fn border_kind(style: BorderStyle) -> Option<&'static str> {
    match style {
        BorderStyle::None => None,
        BorderStyle::Thin | BorderStyle::Medium | BorderStyle::Thick => Some("solid"),
        BorderStyle::Dotted | BorderStyle::Hair => Some("dotted"),
        BorderStyle::Double => Some("double"),
        BorderStyle::Dashed
        | BorderStyle::MediumDashed
        | BorderStyle::DashDot
        | BorderStyle::MediumDashDot
        | BorderStyle::DashDotDot
        | BorderStyle::MediumDashDotDot
        | BorderStyle::SlantDashDot => Some("dashed"),
    }
}

fn horizontal_css(align: HAlign) -> Option<&'static str> {
    match align {
        HAlign::General => None,
        HAlign::Left | HAlign::Fill => Some("left"),
        HAlign::Center | HAlign::CenterContinuous => Some("center"),
        HAlign::Right => Some("right"),
        HAlign::Justify | HAlign::Distributed => Some("justify"),
    }
}

fn vertical_css(align: VAlign) -> &'static str {
    match align {
        VAlign::Top => "top",
        VAlign::Center | VAlign::Justify | VAlign::Distributed => "middle",
        VAlign::Bottom => "bottom",
    }
}

/// Strip characters that would end a declaration or rule.
pub(crate) fn sanitize_css_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '<' | '>' | '\\'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Keep only characters valid in a plain CSS class name.
pub(crate) fn sanitize_class_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        .collect()
}

/// Strip characters that would break out of the quoted CSS string.
fn sanitize_font_family(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '\'' | '"' | ';' | '{' | '}' | '<' | '>' | '\\'))
        .collect::<String>()
        .trim()
        .to_string()
}
