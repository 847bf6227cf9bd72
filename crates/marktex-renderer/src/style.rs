//! Inline styles for enriched nodes.
//!
//! Every style is computed once while the document tree is built; rendering
//! only serializes it.

use marktex_layout::{Declarations, Length};
use pulldown_cmark::Alignment;

use crate::directive::{ColorExpr, FloatSide, ImageDirectives, ImageSize};

const BORDER: &str = "1px solid #d1d5db";
const HEAD_BACKGROUND: &str = "#f3f4f6";

/// Heading padding (vertical, horizontal) in rem, by level.
const HEADING_PADDING: [(f32, f32); 6] = [
    (0.5, 1.0),
    (0.4, 0.875),
    (0.35, 0.75),
    (0.3, 0.625),
    (0.25, 0.5),
    (0.25, 0.5),
];

/// Highlight style for a heading with a background directive.
pub(crate) fn heading(level: u8, background: &ColorExpr) -> Declarations {
    let idx = usize::from(level.clamp(1, 6) - 1);
    let (vertical, horizontal) = HEADING_PADDING[idx];

    let mut style = Declarations::new();
    style
        .set("background-color", background.as_str())
        .set(
            "padding",
            format!("{} {}", Length::Rem(vertical), Length::Rem(horizontal)),
        )
        .set("display", "inline-block")
        .set("border-radius", "0.25rem");
    style
}

/// Styles for an image and its optional float wrapper.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageStyle {
    pub image: Declarations,
    /// Present when the image floats.
    pub wrapper: Option<Declarations>,
}

/// Compute image styles.
///
/// The image always stays inside its container and keeps its aspect ratio.
pub(crate) fn image(directives: &ImageDirectives) -> ImageStyle {
    let mut image = Declarations::new();
    image
        .set("max-width", "100%")
        .set("height", "auto")
        .set("object-fit", "contain");

    match directives.size {
        Some(ImageSize::Both { width, height }) => {
            image
                .set("max-width", format!("min(100%, {width}px)"))
                .set("max-height", Length::Px(f32_from(height)));
        }
        Some(ImageSize::Width(width)) => {
            image.set("width", Length::Px(f32_from(width)));
        }
        Some(ImageSize::Height(height)) => {
            image
                .set("width", "auto")
                .set("height", Length::Px(f32_from(height)));
        }
        None => {}
    }

    if let Some(scale) = directives.scale {
        image
            .set("transform", format!("scale({scale})"))
            .set("transform-origin", "top left");
    }

    let wrapper = directives.float.map(|side| {
        let mut wrapper = Declarations::new();
        wrapper
            .set("float", side.as_str())
            .set("max-width", "50%")
            .set(
                "margin",
                match side {
                    FloatSide::Right => "0.25rem 0 0.5rem 2rem",
                    FloatSide::Left => "0.25rem 2rem 0.5rem 0",
                },
            );
        wrapper
    });

    ImageStyle { image, wrapper }
}

#[allow(clippy::cast_precision_loss)]
fn f32_from(px: u32) -> f32 {
    px as f32
}

/// Styles for a table and its cells.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableStyle {
    pub table: Declarations,
    pub head_cell: Declarations,
    pub cell: Declarations,
}

pub(crate) fn table(borderless: bool) -> TableStyle {
    let mut table = Declarations::new();
    table
        .set("border-collapse", "collapse")
        .set("width", "100%")
        .set("margin", "1.5rem 0");

    let mut head_cell = Declarations::new();
    let mut cell = Declarations::new();
    if borderless {
        table.set("border", "none");
        head_cell
            .set("border", "none")
            .set("background-color", "transparent")
            .set("padding", "0.25rem 0.5rem")
            .set("font-weight", "600")
            .set("text-align", "left");
        cell.set("border", "none")
            .set("background-color", "transparent")
            .set("padding", "0.25rem 0.5rem");
    } else {
        head_cell
            .set("border", BORDER)
            .set("background-color", HEAD_BACKGROUND)
            .set("padding", "0.5rem 1rem")
            .set("font-weight", "600")
            .set("text-align", "left");
        cell.set("border", BORDER).set("padding", "0.5rem 1rem");
    }

    TableStyle {
        table,
        head_cell,
        cell,
    }
}

/// Cell style with the column alignment applied.
pub(crate) fn aligned(base: &Declarations, alignment: Alignment) -> Declarations {
    let mut style = base.clone();
    match alignment {
        Alignment::Left => {
            style.set("text-align", "left");
        }
        Alignment::Center => {
            style.set("text-align", "center");
        }
        Alignment::Right => {
            style.set("text-align", "right");
        }
        Alignment::None => {}
    }
    style
}

pub(crate) fn columns() -> Declarations {
    let mut style = Declarations::new();
    style
        .set("display", "flex")
        .set("gap", "1.5rem")
        .set("align-items", "flex-start")
        .set("margin", "1rem 0");
    style
}

pub(crate) fn column() -> Declarations {
    let mut style = Declarations::new();
    style.set("flex", "1").set("min-width", "0");
    style
}

/// On-screen page-break indicator.
pub(crate) fn page_break_indicator() -> Declarations {
    let mut style = Declarations::new();
    style
        .set("border-top", "2px dashed #d1d5db")
        .set("margin", "2rem 0")
        .set("text-align", "center")
        .set("color", "#9ca3af")
        .set("font-size", "0.75rem");
    style
}
