//! Page-layout engine.

use std::fmt::Write;

use serde::Serialize;

use crate::css::{Declarations, Length};
use crate::settings::{IndicatorPosition, PageNumberFormat, PageSize, Settings, ViewMode};

/// Height of the bottom margin band reserved for the page number, in rem.
pub const PAGE_NUMBER_BAND_REM: f32 = 3.75;

/// Gap between simulated pages in paged view, in rem.
const COLUMN_GAP_REM: f32 = 4.0;

/// Dashed separator drawn between simulated pages.
const COLUMN_RULE: &str = "1px dashed #e5e7eb";

/// Layout parameters derived from one [`Settings`] snapshot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayoutParams {
    /// Physical page box.
    pub page: PageBox,
    /// On-screen flow of the root container.
    pub flow: Flow,
    /// On-screen padding of the root container.
    pub margins: Margins,
    /// `@page` margins for print output, including the page-number band.
    pub print_margins: Margins,
    /// Page-number rule, present only when the indicator is enabled.
    pub page_number: Option<PageNumberRule>,
    pub typography: Typography,
}

/// Physical page dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PageBox {
    pub size: PageSize,
    pub width: Length,
    pub height: Length,
}

/// On-screen flow of the document container.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Flow {
    /// Single box of page width; height grows with content.
    Continuous { width: Length, min_height: Length },
    /// Fixed page height with content flowed into page-width columns.
    ///
    /// Approximates discrete pages; column boundaries are not real page breaks.
    Paged {
        height: Length,
        column_width: Length,
        column_gap: Length,
        column_rule: &'static str,
    },
}

/// Box margins, clockwise from the top.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Margins {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl Margins {
    #[must_use]
    pub fn uniform(length: Length) -> Self {
        Self {
            top: length,
            right: length,
            bottom: length,
            left: length,
        }
    }

    /// CSS `margin` shorthand.
    #[must_use]
    pub fn to_css(&self) -> String {
        if self.top == self.right && self.top == self.bottom && self.top == self.left {
            return self.top.to_string();
        }
        format!("{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

/// Placement and content of the printed page number.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageNumberRule {
    pub position: IndicatorPosition,
    pub format: PageNumberFormat,
    pub font_family: String,
    pub font_size: &'static str,
    pub color: &'static str,
}

impl PageNumberRule {
    /// Name of the `@page` margin box, e.g. `bottom-center`.
    #[must_use]
    pub fn margin_box(&self) -> String {
        format!("bottom-{}", self.position.as_str())
    }

    /// Declarations for the margin box.
    #[must_use]
    pub fn declarations(&self) -> Declarations {
        let mut style = Declarations::new();
        style
            .set("content", self.format.css_content())
            .set("font-family", &self.font_family)
            .set("font-size", self.font_size)
            .set("color", self.color);
        style
    }
}

/// Base typography of the root container.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Typography {
    pub font_family: String,
    pub font_size: Length,
    pub line_height: f32,
}

/// Compute layout parameters for a settings snapshot.
///
/// Pure function of `settings`; inputs are assumed to be within the bounds
/// enforced at the settings boundary.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute_layout(settings: &Settings) -> LayoutParams {
    let (width_mm, height_mm) = settings.page_size.dimensions_mm();
    let page = PageBox {
        size: settings.page_size,
        width: Length::Mm(width_mm),
        height: Length::Mm(height_mm),
    };

    let flow = match settings.view_mode {
        ViewMode::Continuous => Flow::Continuous {
            width: page.width,
            min_height: page.height,
        },
        ViewMode::Paged => Flow::Paged {
            height: page.height,
            column_width: page.width,
            column_gap: Length::Rem(COLUMN_GAP_REM),
            column_rule: COLUMN_RULE,
        },
    };

    let base = Length::Rem(settings.margins);
    let indicator = settings.page_indicator;

    let print_margins = if indicator.enabled {
        Margins {
            bottom: Length::Rem(settings.margins + PAGE_NUMBER_BAND_REM),
            ..Margins::uniform(base)
        }
    } else {
        Margins::uniform(base)
    };

    let page_number = indicator.enabled.then(|| PageNumberRule {
        position: indicator.position,
        format: indicator.format,
        font_family: settings.font_family.clone(),
        font_size: "10pt",
        color: "#666",
    });

    LayoutParams {
        page,
        flow,
        margins: Margins::uniform(base),
        print_margins,
        page_number,
        typography: Typography {
            font_family: settings.font_family.clone(),
            font_size: Length::Px(settings.font_size as f32),
            line_height: settings.line_height,
        },
    }
}

impl LayoutParams {
    /// Inline style of the on-screen root container.
    #[must_use]
    pub fn container_style(&self) -> Declarations {
        let mut style = Declarations::new();
        match &self.flow {
            Flow::Continuous { width, min_height } => {
                style.set("width", width).set("min-height", min_height);
            }
            Flow::Paged {
                height,
                column_width,
                column_gap,
                column_rule,
            } => {
                style
                    .set("height", height)
                    .set("column-width", column_width)
                    .set("column-gap", column_gap)
                    .set("column-fill", "auto")
                    .set("column-rule", column_rule)
                    .set("width", "max-content");
            }
        }
        style
            .set("padding", self.margins.to_css())
            .set("font-family", &self.typography.font_family)
            .set("font-size", self.typography.font_size)
            .set("line-height", self.typography.line_height);
        style
    }

    /// Stylesheet applied when the document is printed.
    ///
    /// Fixes the physical page box and margins, binds the page number to the
    /// bottom band, collapses the on-screen flow into a single flow and turns
    /// page-break nodes into hard page boundaries.
    #[must_use]
    pub fn print_stylesheet(&self) -> String {
        let mut css = String::from("@media print {\n");

        let mut page = Declarations::new();
        page.set("size", self.page.size.css_name())
            .set("margin", self.print_margins.to_css());
        write!(css, "  @page {{\n{}  }}\n", page.to_block("    ")).unwrap();

        if let Some(rule) = &self.page_number {
            write!(
                css,
                "  @page {{\n    @{} {{\n{}    }}\n  }}\n",
                rule.margin_box(),
                rule.declarations().to_block("      ")
            )
            .unwrap();
        }

        css.push_str(PRINT_OVERRIDES);
        css.push_str("}\n");
        css
    }
}

/// Print overrides that do not depend on settings.
const PRINT_OVERRIDES: &str = "  .no-print { display: none !important; }
  html, body { height: auto !important; overflow: visible !important; background: white !important; }
  .preview-wrapper { height: auto !important; overflow: visible !important; display: block !important; padding: 0 !important; background: white !important; }
  .print-container { box-shadow: none !important; margin: 0 !important; width: 100% !important; max-width: none !important; min-height: auto !important; height: auto !important; column-width: auto !important; column-count: auto !important; column-gap: 0 !important; column-rule: none !important; padding: 0 !important; }
  ::-webkit-scrollbar { display: none; }
  .page-break { break-after: page; page-break-after: always; height: 0; display: block; visibility: hidden; border: none; margin: 0; }
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::PageIndicator;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_layout_is_deterministic() {
        let settings = Settings {
            view_mode: ViewMode::Paged,
            ..Settings::default()
        };
        assert_eq!(compute_layout(&settings), compute_layout(&settings));
    }

    #[test]
    fn test_a4_page_box() {
        let layout = compute_layout(&Settings::default());
        assert_eq!(layout.page.width, Length::Mm(210.0));
        assert_eq!(layout.page.height, Length::Mm(297.0));
    }

    #[test]
    fn test_letter_page_box() {
        let settings = Settings {
            page_size: PageSize::Letter,
            ..Settings::default()
        };
        let layout = compute_layout(&settings);
        assert_eq!(layout.page.width, Length::Mm(215.9));
        assert_eq!(layout.page.height, Length::Mm(279.4));
    }

    #[test]
    fn test_continuous_flow() {
        let layout = compute_layout(&Settings::default());
        assert_eq!(
            layout.flow,
            Flow::Continuous {
                width: Length::Mm(210.0),
                min_height: Length::Mm(297.0),
            }
        );
        assert_eq!(layout.margins, Margins::uniform(Length::Rem(2.5)));
    }

    #[test]
    fn test_paged_flow() {
        let settings = Settings {
            page_size: PageSize::Letter,
            view_mode: ViewMode::Paged,
            ..Settings::default()
        };
        let layout = compute_layout(&settings);
        assert_eq!(
            layout.flow,
            Flow::Paged {
                height: Length::Mm(279.4),
                column_width: Length::Mm(215.9),
                column_gap: Length::Rem(4.0),
                column_rule: "1px dashed #e5e7eb",
            }
        );
    }

    #[test]
    fn test_indicator_disabled_uses_base_margin() {
        let settings = Settings {
            margins: 1.5,
            page_indicator: PageIndicator {
                enabled: false,
                ..PageIndicator::default()
            },
            ..Settings::default()
        };
        let layout = compute_layout(&settings);
        assert_eq!(layout.print_margins, Margins::uniform(Length::Rem(1.5)));
        assert!(layout.page_number.is_none());
    }

    #[test]
    fn test_indicator_enabled_reserves_band() {
        let settings = Settings {
            margins: 1.5,
            ..Settings::default()
        };
        let layout = compute_layout(&settings);
        assert_eq!(layout.print_margins.top, Length::Rem(1.5));
        assert_eq!(layout.print_margins.bottom, Length::Rem(5.25));
        let rule = layout.page_number.unwrap();
        assert_eq!(rule.margin_box(), "bottom-center");
        assert_eq!(rule.format, PageNumberFormat::NumberTotal);
    }

    #[test]
    fn test_zero_margins() {
        let settings = Settings {
            margins: 0.0,
            page_indicator: PageIndicator {
                enabled: false,
                ..PageIndicator::default()
            },
            ..Settings::default()
        };
        let layout = compute_layout(&settings);
        assert_eq!(layout.print_margins.to_css(), "0rem");
    }

    #[test]
    fn test_margins_to_css() {
        let margins = Margins {
            bottom: Length::Rem(6.25),
            ..Margins::uniform(Length::Rem(2.5))
        };
        assert_eq!(margins.to_css(), "2.5rem 2.5rem 6.25rem 2.5rem");
        assert_eq!(Margins::uniform(Length::Rem(2.5)).to_css(), "2.5rem");
    }

    #[test]
    fn test_container_style_continuous() {
        let layout = compute_layout(&Settings::default());
        assert_eq!(
            layout.container_style().to_inline(),
            "width:210mm;min-height:297mm;padding:2.5rem;\
             font-family:ui-sans-serif, system-ui, sans-serif;font-size:16px;line-height:1.5"
        );
    }

    #[test]
    fn test_container_style_paged() {
        let settings = Settings {
            view_mode: ViewMode::Paged,
            ..Settings::default()
        };
        let style = compute_layout(&settings).container_style();
        assert_eq!(style.get("height"), Some("297mm"));
        assert_eq!(style.get("column-width"), Some("210mm"));
        assert_eq!(style.get("column-gap"), Some("4rem"));
        assert_eq!(style.get("column-rule"), Some("1px dashed #e5e7eb"));
        assert_eq!(style.get("min-height"), None);
    }

    #[test]
    fn test_print_stylesheet_with_page_number() {
        let settings = Settings {
            page_indicator: PageIndicator {
                enabled: true,
                position: IndicatorPosition::Right,
                format: PageNumberFormat::PageNumber,
            },
            ..Settings::default()
        };
        let css = compute_layout(&settings).print_stylesheet();
        assert!(css.starts_with("@media print {"));
        assert!(css.contains("size: A4;"));
        assert!(css.contains("margin: 2.5rem 2.5rem 6.25rem 2.5rem;"));
        assert!(css.contains("@bottom-right {"));
        assert!(css.contains(r#"content: "Page " counter(page);"#));
        assert!(css.contains("page-break-after: always"));
    }

    #[test]
    fn test_print_stylesheet_without_page_number() {
        let settings = Settings {
            page_size: PageSize::Letter,
            page_indicator: PageIndicator {
                enabled: false,
                ..PageIndicator::default()
            },
            ..Settings::default()
        };
        let css = compute_layout(&settings).print_stylesheet();
        assert!(css.contains("size: letter;"));
        assert!(css.contains("margin: 2.5rem;"));
        assert!(!css.contains("@bottom-"));
    }
}
