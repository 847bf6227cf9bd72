//! CSS-equivalent values shared by layout and node styling.

use std::fmt;

use serde::Serialize;

/// A CSS length.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "unit", content = "value", rename_all = "lowercase")]
pub enum Length {
    Mm(f32),
    Rem(f32),
    Px(f32),
    Percent(f32),
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Mm(v) => write!(f, "{v}mm"),
            Length::Rem(v) => write!(f, "{v}rem"),
            Length::Px(v) => write!(f, "{v}px"),
            Length::Percent(v) => write!(f, "{v}%"),
        }
    }
}

/// Ordered list of CSS declarations.
///
/// Declarations keep insertion order; setting a property twice replaces the
/// earlier value in place, so the rendered string is deterministic.
///
/// ```
/// use marktex_layout::{Declarations, Length};
///
/// let mut style = Declarations::new();
/// style.set("max-width", "100%");
/// style.set("height", "auto");
/// style.set("max-width", Length::Px(300.0));
/// assert_eq!(style.to_inline(), "max-width:300px;height:auto");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Declarations(Vec<(&'static str, String)>);

impl Declarations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, replacing any previous value.
    pub fn set(&mut self, property: &'static str, value: impl ToString) -> &mut Self {
        let value = value.to_string();
        if let Some(entry) = self.0.iter_mut().find(|(p, _)| *p == property) {
            entry.1 = value;
        } else {
            self.0.push((property, value));
        }
        self
    }

    /// Get the value of a property.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render as a `style` attribute value.
    #[must_use]
    pub fn to_inline(&self) -> String {
        self.0
            .iter()
            .map(|(p, v)| format!("{p}:{v}"))
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Render as the body of a stylesheet rule, one declaration per line.
    #[must_use]
    pub fn to_block(&self, indent: &str) -> String {
        let mut out = String::new();
        for (p, v) in &self.0 {
            out.push_str(indent);
            out.push_str(p);
            out.push_str(": ");
            out.push_str(v);
            out.push_str(";\n");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_length_display() {
        assert_eq!(Length::Mm(215.9).to_string(), "215.9mm");
        assert_eq!(Length::Rem(2.5).to_string(), "2.5rem");
        assert_eq!(Length::Px(300.0).to_string(), "300px");
        assert_eq!(Length::Percent(50.0).to_string(), "50%");
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut style = Declarations::new();
        style.set("float", "right").set("width", "auto");
        style.set("float", "left");
        assert_eq!(style.to_inline(), "float:left;width:auto");
        assert_eq!(style.get("float"), Some("left"));
        assert_eq!(style.get("height"), None);
    }

    #[test]
    fn test_to_block() {
        let mut style = Declarations::new();
        style.set("margin", "0").set("color", "#666");
        assert_eq!(style.to_block("  "), "  margin: 0;\n  color: #666;\n");
    }

    #[test]
    fn test_empty() {
        assert!(Declarations::new().is_empty());
        assert_eq!(Declarations::new().to_inline(), "");
    }
}
