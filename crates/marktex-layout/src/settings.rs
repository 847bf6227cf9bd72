//! Document settings snapshot.
//!
//! A [`Settings`] value is produced by the settings input boundary (config file,
//! CLI flags) and consumed read-only by one render pass.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Accepted base font sizes in pixels.
pub const FONT_SIZE_RANGE: RangeInclusive<u32> = 10..=24;

/// Accepted line-height multipliers.
pub const LINE_HEIGHT_RANGE: RangeInclusive<f32> = 1.0..=2.5;

/// Accepted page margins in rem.
pub const MARGINS_RANGE: RangeInclusive<f32> = 0.0..=4.0;

/// Settings for one render pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base font size in pixels.
    pub font_size: u32,
    /// CSS font-family stack.
    pub font_family: String,
    /// Unitless line-height multiplier.
    pub line_height: f32,
    /// Physical paper size.
    pub page_size: PageSize,
    /// Page margins in rem, applied on all sides.
    pub margins: f32,
    /// On-screen view mode.
    pub view_mode: ViewMode,
    /// Page-number indicator for print output.
    pub page_indicator: PageIndicator,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_size: 16,
            font_family: "ui-sans-serif, system-ui, sans-serif".to_owned(),
            line_height: 1.5,
            page_size: PageSize::A4,
            margins: 2.5,
            view_mode: ViewMode::Continuous,
            page_indicator: PageIndicator::default(),
        }
    }
}

/// Physical paper size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// Page width and height in millimetres.
    #[must_use]
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::Letter => (215.9, 279.4),
        }
    }

    /// Name used by the CSS `@page { size }` descriptor.
    #[must_use]
    pub fn css_name(self) -> &'static str {
        match self {
            PageSize::A4 => "A4",
            PageSize::Letter => "letter",
        }
    }
}

impl std::str::FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::Letter),
            _ => Err(format!("unknown page size: {s}")),
        }
    }
}

/// How the document is flowed on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// One box of page width that grows with the content.
    #[default]
    Continuous,
    /// Fixed-height columns of page width, one per simulated page.
    Paged,
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "continuous" => Ok(ViewMode::Continuous),
            "paged" => Ok(ViewMode::Paged),
            _ => Err(format!("unknown view mode: {s}")),
        }
    }
}

/// Page-number indicator settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PageIndicator {
    pub enabled: bool,
    pub position: IndicatorPosition,
    pub format: PageNumberFormat,
}

impl Default for PageIndicator {
    fn default() -> Self {
        Self {
            enabled: true,
            position: IndicatorPosition::Center,
            format: PageNumberFormat::NumberTotal,
        }
    }
}

/// Horizontal placement of the page number in the bottom margin band.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorPosition {
    Left,
    #[default]
    Center,
    Right,
}

impl IndicatorPosition {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            IndicatorPosition::Left => "left",
            IndicatorPosition::Center => "center",
            IndicatorPosition::Right => "right",
        }
    }
}

/// Text shown by the page-number indicator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageNumberFormat {
    /// `3`
    Number,
    /// `3/12`
    #[default]
    NumberTotal,
    /// `Page 3`
    PageNumber,
    /// `Page 3 of 12`
    PageNumberOfTotal,
}

impl PageNumberFormat {
    /// CSS generated-content expression for the `@page` margin box.
    #[must_use]
    pub fn css_content(self) -> &'static str {
        match self {
            PageNumberFormat::Number => "counter(page)",
            PageNumberFormat::NumberTotal => r#"counter(page) "/" counter(pages)"#,
            PageNumberFormat::PageNumber => r#""Page " counter(page)"#,
            PageNumberFormat::PageNumberOfTotal => r#""Page " counter(page) " of " counter(pages)"#,
        }
    }
}
