//! Rendering: style mapping, markup emission and document assembly.
//!
//! This module provides:
//! - [`resolve_styles`]: per-cell CSS declarations
//! - [`emit`]: table markup plus stylesheet from resolved layout parts
//! - [`render`] / [`render_with`]: the infallible end-to-end entry points
//! - [`RenderedSheet`]: the output, with standalone-page assembly

mod document;
mod emitter;
mod markup;
mod style_map;

pub use document::RenderedSheet;
pub use emitter::{emit, render, render_fallback, render_with};
pub use markup::{cell_text_html, escape_html};
pub use style_map::{
    resolve_style, resolve_styles, BorderDeclaration, BorderEdge, Rotation, StyleDeclaration,
    WRAP_DECLARATION,
};
