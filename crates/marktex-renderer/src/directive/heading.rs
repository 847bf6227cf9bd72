//! Heading background directive: `## Section {bg:#e0f2fe}`.

/// A CSS color accepted by the `bg:` directive.
///
/// Hex colors (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`), named colors and
/// `rgb()`/`rgba()`/`hsl()`/`hsla()` functions are accepted. Anything else
/// could inject arbitrary CSS and is rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorExpr(String);

impl ColorExpr {
    #[must_use]
    pub fn parse(expr: &str) -> Option<Self> {
        let expr = expr.trim();

        if let Some(hex) = expr.strip_prefix('#') {
            let valid = matches!(hex.len(), 3 | 4 | 6 | 8)
                && hex.bytes().all(|b| b.is_ascii_hexdigit());
            return valid.then(|| Self(expr.to_owned()));
        }

        if expr.bytes().all(|b| b.is_ascii_alphabetic()) && !expr.is_empty() {
            return Some(Self(expr.to_ascii_lowercase()));
        }

        let lower = expr.to_ascii_lowercase();
        let args = ["rgb(", "rgba(", "hsl(", "hsla("]
            .iter()
            .find_map(|func| lower.strip_prefix(func))
            .and_then(|rest| rest.strip_suffix(')'))?;
        let valid = !args.trim().is_empty()
            && args
                .bytes()
                .all(|b| b.is_ascii_digit() || matches!(b, b' ' | b',' | b'.' | b'%' | b'/'));
        valid.then_some(Self(lower))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A heading's trailing background directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadingDirective {
    /// Heading text before the directive, trailing whitespace removed.
    pub text: String,
    pub background: ColorExpr,
}

/// Split a trailing `{bg:color}` off heading text.
///
/// Only the end of the text is examined, optionally followed by whitespace.
/// Returns `None` when there is no directive or the color is not valid.
///
/// # Example
///
/// ```
/// use marktex_renderer::directive::resolve_heading;
///
/// let directive = resolve_heading("Summary {bg:#fef3c7}").unwrap();
/// assert_eq!(directive.text, "Summary");
/// assert_eq!(directive.background.as_str(), "#fef3c7");
///
/// assert!(resolve_heading("Sets {a, b}").is_none());
/// ```
#[must_use]
pub fn resolve_heading(text: &str) -> Option<HeadingDirective> {
    let trimmed = text.trim_end();
    let inner = trimmed.strip_suffix('}')?;
    let open = inner.rfind('{')?;
    let color = inner[open + 1..].strip_prefix("bg:")?;

    Some(HeadingDirective {
        text: inner[..open].trim_end().to_owned(),
        background: ColorExpr::parse(color)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn color(expr: &str) -> Option<String> {
        ColorExpr::parse(expr).map(|c| c.as_str().to_owned())
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(color("#fff"), Some("#fff".to_owned()));
        assert_eq!(color("#FF000080"), Some("#FF000080".to_owned()));
        assert_eq!(color("#ff00"), Some("#ff00".to_owned()));
        assert_eq!(color("#ff000"), None);
        assert_eq!(color("#ggg"), None);
    }

    #[test]
    fn test_color_named_and_functions() {
        assert_eq!(color("LightBlue"), Some("lightblue".to_owned()));
        assert_eq!(
            color("rgb(224, 242, 254)"),
            Some("rgb(224, 242, 254)".to_owned())
        );
        assert_eq!(
            color("RGBA(0,0,0,0.5)"),
            Some("rgba(0,0,0,0.5)".to_owned())
        );
        assert_eq!(color("hsl(200 50% 90%)"), Some("hsl(200 50% 90%)".to_owned()));
    }

    #[test]
    fn test_color_rejects_injection() {
        assert_eq!(color("red;position:fixed"), None);
        assert_eq!(color("url(x)"), None);
        assert_eq!(color("rgb(1,2,3);x"), None);
        assert_eq!(color("rgb()"), None);
        assert_eq!(color(""), None);
    }

    #[test]
    fn test_resolve_heading() {
        let directive = resolve_heading("Quarterly Report {bg:rgb(224, 242, 254)}  ").unwrap();
        assert_eq!(directive.text, "Quarterly Report");
        assert_eq!(directive.background.as_str(), "rgb(224, 242, 254)");
    }

    #[test]
    fn test_directive_must_be_trailing() {
        assert_eq!(resolve_heading("{bg:red} Title"), None);
        assert_eq!(resolve_heading("Title {bg:red} again"), None);
    }

    #[test]
    fn test_invalid_color_is_not_a_directive() {
        assert_eq!(resolve_heading("Title {bg:not a color}"), None);
        assert_eq!(resolve_heading("Title {background:red}"), None);
    }

    #[test]
    fn test_directive_only_heading() {
        let directive = resolve_heading("{bg:red}").unwrap();
        assert_eq!(directive.text, "");
    }
}
