//! Document settings and page-layout computation.
//!
//! [`compute_layout`] maps a [`Settings`] snapshot to declarative
//! [`LayoutParams`]: the physical page box, the on-screen flow (a single
//! continuous box or fixed-height columns simulating pages), the print margins
//! and the page-number rule. No content is measured here; final pagination is
//! left to the host rendering engine.
//!
//! # Example
//!
//! ```
//! use marktex_layout::{Flow, PageSize, Settings, ViewMode, compute_layout};
//!
//! let settings = Settings {
//!     page_size: PageSize::Letter,
//!     view_mode: ViewMode::Paged,
//!     ..Settings::default()
//! };
//! let layout = compute_layout(&settings);
//!
//! assert_eq!(layout.page.width.to_string(), "215.9mm");
//! assert!(matches!(layout.flow, Flow::Paged { .. }));
//! ```

pub mod css;
mod layout;
mod settings;

pub use css::{Declarations, Length};
pub use layout::{Flow, LayoutParams, Margins, PageBox, PageNumberRule, Typography, compute_layout};
pub use settings::{
    FONT_SIZE_RANGE, IndicatorPosition, LINE_HEIGHT_RANGE, MARGINS_RANGE, PageIndicator,
    PageNumberFormat, PageSize, Settings, ViewMode,
};
