//! Directive-aware markdown rendering for print-ready documents.
//!
//! A render pass runs in four stages:
//!
//! 1. [`Preprocessor`] rewrites page-break tokens and column tables in the raw text.
//! 2. pulldown-cmark parses the result into events.
//! 3. [`Enricher`] builds a [`Document`] tree, resolving heading and image
//!    directives and computing every node style.
//! 4. [`HtmlRenderer`] serializes the tree for the screen or for print, using the
//!    [`LayoutParams`](marktex_layout::LayoutParams) computed from the settings.
//!
//! # Example
//!
//! ```
//! use marktex_layout::Settings;
//! use marktex_renderer::{Pipeline, RenderTarget};
//!
//! let mut pipeline = Pipeline::new();
//! let pass = pipeline.run("# Title {bg:#fde68a}\n\nBody", &Settings::default());
//! let html = pass.to_html(RenderTarget::Screen);
//!
//! assert!(html.contains("background-color:#fde68a"));
//! assert!(!html.contains("{bg:"));
//! ```

pub mod directive;
mod enrich;
mod html;
pub mod node;
mod pipeline;
mod preprocess;
mod state;
mod style;
mod util;

pub use enrich::{EnrichResult, Enricher, enrich_markdown, parser_options};
pub use html::{HtmlRenderer, RenderTarget};
pub use node::Document;
pub use pipeline::{PassId, PassSequencer, Pipeline, RenderPass, render_pass};
pub use preprocess::{
    COLUMN_MARKERS, PAGE_BREAK_MARKER, PAGE_BREAK_TOKENS, Preprocessor, preprocess,
};
pub use style::{ImageStyle, TableStyle};
pub use util::{escape_html, slugify};
