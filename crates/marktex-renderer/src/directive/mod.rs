//! Inline `{...}` directives embedded in headings and image text.
//!
//! Directives are written in braces inside otherwise ordinary markdown:
//!
//! - `# Title {bg:#fde68a}` gives a heading a background color.
//! - `![logo {300x200}](logo.png "{float=right}")` sizes and floats an image.
//!
//! A brace group that does not parse as a directive is kept as literal text.

mod heading;
mod image;

pub use heading::{ColorExpr, HeadingDirective, resolve_heading};
pub use image::{FloatSide, ImageDirectives, ImageSize, ResolvedImage, resolve_image};

/// A `{...}` group found in text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BraceGroup<'a> {
    /// Byte offset of the opening brace.
    pub(crate) start: usize,
    /// Byte offset just past the closing brace.
    pub(crate) end: usize,
    /// Text between the braces.
    pub(crate) body: &'a str,
}

/// Find non-nested brace groups in order of appearance.
///
/// An opening brace with another `{` before its `}` is skipped, so `{{x}` yields
/// the inner `{x}`.
pub(crate) fn brace_groups(text: &str) -> Vec<BraceGroup<'_>> {
    let mut groups = Vec::new();
    let mut open = None;

    for (i, c) in text.char_indices() {
        match c {
            '{' => open = Some(i),
            '}' => {
                if let Some(start) = open.take() {
                    groups.push(BraceGroup {
                        start,
                        end: i + 1,
                        body: &text[start + 1..i],
                    });
                }
            }
            _ => {}
        }
    }

    groups
}

/// Remove the given groups from `text` and normalize the whitespace left behind.
///
/// Returns `text` unchanged when there is nothing to remove.
pub(crate) fn strip_groups(text: &str, groups: &[BraceGroup<'_>]) -> String {
    if groups.is_empty() {
        return text.to_owned();
    }

    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    for group in groups {
        out.push_str(&text[pos..group.start]);
        out.push(' ');
        pos = group.end;
    }
    out.push_str(&text[pos..]);

    crate::util::collapse_whitespace(&out)
}
