//! Image sizing, scaling and float directives.
//!
//! Recognized tokens, case-insensitive, inside any `{...}` group of the alt text
//! or title:
//!
//! | Token | Meaning |
//! |---|---|
//! | `width=N`, `w=N` | width in pixels (`px` suffix optional) |
//! | `height=N`, `h=N` | height in pixels |
//! | `NxM` | width and height |
//! | `scale=F`, bare `F` | visual scale factor |
//! | `float=left`, `align=right` | float with text wrap |
//!
//! Several tokens may share one group (`{w=200 float=right}`). A group with any
//! unrecognized token is not a directive and stays in the text.

use super::{BraceGroup, brace_groups, strip_groups};

/// Side an image floats to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloatSide {
    Left,
    Right,
}

impl FloatSide {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FloatSide::Left => "left",
            FloatSide::Right => "right",
        }
    }
}

/// Explicit image dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageSize {
    /// Both bounds given; the image keeps its aspect ratio inside them.
    Both { width: u32, height: u32 },
    Width(u32),
    Height(u32),
}

/// Resolved image directives.
///
/// At most one size applies. Precedence: a group with both named width and
/// height, then an `NxM` pair, then width alone, then height alone. Scale is
/// dropped whenever a size is present.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ImageDirectives {
    pub size: Option<ImageSize>,
    pub scale: Option<f32>,
    pub float: Option<FloatSide>,
}

impl ImageDirectives {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size.is_none() && self.scale.is_none() && self.float.is_none()
    }
}

/// Image text with directives removed.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedImage {
    pub alt: String,
    pub title: String,
    pub directives: ImageDirectives,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Token {
    Width(u32),
    Height(u32),
    Pair(u32, u32),
    Scale(f32),
    Float(FloatSide),
}

/// Extract image directives from alt text and title.
///
/// The title is scanned before the alt text; within each category the first
/// match wins.
///
/// # Example
///
/// ```
/// use marktex_renderer::directive::{FloatSide, ImageSize, resolve_image};
///
/// let image = resolve_image("Team {300x200}", "{float=right}");
/// assert_eq!(image.alt, "Team");
/// assert_eq!(image.title, "");
/// assert_eq!(
///     image.directives.size,
///     Some(ImageSize::Both { width: 300, height: 200 })
/// );
/// assert_eq!(image.directives.float, Some(FloatSide::Right));
/// ```
#[must_use]
pub fn resolve_image(alt: &str, title: &str) -> ResolvedImage {
    let title_groups = directive_groups(title);
    let alt_groups = directive_groups(alt);

    let mut named_pair = None;
    let mut bare_pair = None;
    let mut width = None;
    let mut height = None;
    let mut scale = None;
    let mut float = None;

    for (_, tokens) in title_groups.iter().chain(&alt_groups) {
        let mut group_width = None;
        let mut group_height = None;
        for token in tokens {
            match *token {
                Token::Width(w) => {
                    group_width.get_or_insert(w);
                }
                Token::Height(h) => {
                    group_height.get_or_insert(h);
                }
                Token::Pair(w, h) => {
                    bare_pair.get_or_insert((w, h));
                }
                Token::Scale(f) => {
                    scale.get_or_insert(f);
                }
                Token::Float(side) => {
                    float.get_or_insert(side);
                }
            }
        }
        match (group_width, group_height) {
            (Some(w), Some(h)) => {
                named_pair.get_or_insert((w, h));
            }
            (Some(w), None) => {
                width.get_or_insert(w);
            }
            (None, Some(h)) => {
                height.get_or_insert(h);
            }
            (None, None) => {}
        }
    }

    let size = named_pair
        .or(bare_pair)
        .map(|(width, height)| ImageSize::Both { width, height })
        .or(width.map(ImageSize::Width))
        .or(height.map(ImageSize::Height));

    ResolvedImage {
        alt: strip_directives(alt, &alt_groups),
        title: strip_directives(title, &title_groups),
        directives: ImageDirectives {
            size,
            scale: scale.filter(|_| size.is_none()),
            float,
        },
    }
}

/// Brace groups made entirely of recognized tokens.
fn directive_groups(text: &str) -> Vec<(BraceGroup<'_>, Vec<Token>)> {
    brace_groups(text)
        .into_iter()
        .filter_map(|group| {
            let tokens = group
                .body
                .split_whitespace()
                .map(parse_token)
                .collect::<Option<Vec<_>>>()?;
            (!tokens.is_empty()).then_some((group, tokens))
        })
        .collect()
}

fn strip_directives(text: &str, groups: &[(BraceGroup<'_>, Vec<Token>)]) -> String {
    let groups: Vec<_> = groups.iter().map(|(group, _)| *group).collect();
    strip_groups(text, &groups)
}

fn parse_token(word: &str) -> Option<Token> {
    if let Some((key, value)) = word.split_once('=') {
        return match key.to_ascii_lowercase().as_str() {
            "width" | "w" => parse_px(value).map(Token::Width),
            "height" | "h" => parse_px(value).map(Token::Height),
            "scale" => parse_scale(value).map(Token::Scale),
            "float" | "align" => parse_side(value).map(Token::Float),
            _ => None,
        };
    }

    if let Some((w, h)) = word.split_once(['x', 'X']) {
        return Some(Token::Pair(parse_px(w)?, parse_px(h)?));
    }

    parse_scale(word).map(Token::Scale)
}

fn parse_px(value: &str) -> Option<u32> {
    let digits = value
        .strip_suffix("px")
        .or_else(|| value.strip_suffix("PX"))
        .unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().filter(|&n| n > 0)
}

fn parse_scale(value: &str) -> Option<f32> {
    if !value.bytes().any(|b| b.is_ascii_digit())
        || !value.bytes().all(|b| b.is_ascii_digit() || b == b'.')
    {
        return None;
    }
    value
        .parse::<f32>()
        .ok()
        .filter(|f| f.is_finite() && *f > 0.0)
}

fn parse_side(value: &str) -> Option<FloatSide> {
    match value.to_ascii_lowercase().as_str() {
        "left" => Some(FloatSide::Left),
        "right" => Some(FloatSide::Right),
        _ => None,
    }
}
