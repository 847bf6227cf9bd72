//! Render passes: text and settings in, enriched tree and layout out.

use std::fmt;

use marktex_layout::{LayoutParams, Settings, compute_layout};

use crate::enrich::enrich_markdown;
use crate::html::{HtmlRenderer, RenderTarget};
use crate::node::Document;
use crate::preprocess::Preprocessor;

/// Monotonically increasing render pass identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PassId(u64);

impl fmt::Display for PassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Output of one render pass.
#[derive(Clone, Debug)]
pub struct RenderPass {
    pub id: PassId,
    pub document: Document,
    pub layout: LayoutParams,
    /// Non-fatal problems found in the source.
    pub warnings: Vec<String>,
}

impl RenderPass {
    /// Complete HTML document for `target`.
    #[must_use]
    pub fn to_html(&self, target: RenderTarget) -> String {
        HtmlRenderer::new(target).render_standalone(&self.document, &self.layout)
    }
}

/// Run the full transformation for one input.
///
/// Pure apart from logging: equal `text` and `settings` always give an equal
/// tree and layout.
#[must_use]
pub fn render_pass(id: PassId, text: &str, settings: &Settings) -> RenderPass {
    let mut preprocessor = Preprocessor::new();
    let normalized = preprocessor.process(text);
    let enriched = enrich_markdown(&normalized);
    let layout = compute_layout(settings);

    let mut warnings = preprocessor.warnings().to_vec();
    warnings.extend(enriched.warnings);
    for warning in &warnings {
        tracing::warn!(pass = %id, "{warning}");
    }
    tracing::debug!(
        pass = %id,
        page_breaks = preprocessor.page_breaks(),
        column_blocks = preprocessor.column_blocks(),
        blocks = enriched.document.blocks.len(),
        "Render pass complete"
    );

    RenderPass {
        id,
        document: enriched.document,
        layout,
        warnings,
    }
}

/// Orders render passes so a stale result never replaces a newer one.
#[derive(Debug, Default)]
pub struct PassSequencer {
    issued: u64,
    applied: Option<PassId>,
}

impl PassSequencer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the id for the next pass.
    pub fn issue(&mut self) -> PassId {
        self.issued += 1;
        PassId(self.issued)
    }

    /// Record `id` as applied if it is newer than the last applied pass.
    ///
    /// Returns `false` for superseded passes, which must be discarded.
    pub fn accept(&mut self, id: PassId) -> bool {
        if self.applied.is_some_and(|applied| id <= applied) {
            tracing::warn!(pass = %id, applied = ?self.applied, "Discarding superseded render pass");
            return false;
        }
        self.applied = Some(id);
        true
    }

    /// Most recently applied pass.
    #[must_use]
    pub fn applied(&self) -> Option<PassId> {
        self.applied
    }
}

/// Issues and applies render passes in input order.
///
/// # Example
///
/// ```
/// use marktex_layout::Settings;
/// use marktex_renderer::Pipeline;
///
/// let mut pipeline = Pipeline::new();
/// let older = pipeline.run("# Draft", &Settings::default());
/// let newer = pipeline.run("# Final", &Settings::default());
///
/// assert!(pipeline.apply(newer).is_some());
/// assert!(pipeline.apply(older).is_none());
/// ```
#[derive(Debug, Default)]
pub struct Pipeline {
    sequencer: PassSequencer,
}

impl Pipeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `text` with `settings` as a new pass.
    pub fn run(&mut self, text: &str, settings: &Settings) -> RenderPass {
        let id = self.sequencer.issue();
        render_pass(id, text, settings)
    }

    /// Return the pass if it is the newest so far, or `None` if it was superseded.
    pub fn apply(&mut self, pass: RenderPass) -> Option<RenderPass> {
        self.sequencer.accept(pass.id).then_some(pass)
    }

    #[must_use]
    pub fn sequencer(&self) -> &PassSequencer {
        &self.sequencer
    }
}
