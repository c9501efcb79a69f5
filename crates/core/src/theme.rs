//! Design tokens and style settings consumed by the components.
//!
//! Both tables are optional in `site.toml`; every token has a default so a
//! site without a `[theme]` section still renders sensible output.

use serde::{Deserialize, Serialize};

/// Spacing and width tokens, looked up by components and never mutated
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub space: Space,
    pub text: Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Space {
    /// Base spacing unit, used inside `calc()` expressions
    pub default: String,
    pub inset: Inset,
}

impl Default for Space {
    fn default() -> Self {
        Self {
            default: "16px".to_string(),
            inset: Inset::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inset {
    pub default: String,
}

impl Default for Inset {
    fn default() -> Self {
        Self {
            default: "16px".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Text {
    pub max_width: MaxWidth,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaxWidth {
    pub tablet: String,
    pub desktop: String,
}

impl Default for MaxWidth {
    fn default() -> Self {
        Self {
            tablet: "600px".to_string(),
            desktop: "700px".to_string(),
        }
    }
}

/// Viewport thresholds at which responsive rules change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Breakpoint {
    Tablet,
    Desktop,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 2] = [Breakpoint::Tablet, Breakpoint::Desktop];
}

/// Breakpoint widths in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    pub tablet: u32,
    pub desktop: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            tablet: 600,
            desktop: 1024,
        }
    }
}

impl Breakpoints {
    pub fn min_width(&self, breakpoint: Breakpoint) -> u32 {
        match breakpoint {
            Breakpoint::Tablet => self.tablet,
            Breakpoint::Desktop => self.desktop,
        }
    }
}

/// Stylesheet settings shared by every page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub breakpoints: Breakpoints,
    pub font_family: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            breakpoints: Breakpoints::default(),
            font_family: "Open Sans".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_theme_keeps_defaults() {
        let theme: Theme = toml::from_str(
            r#"
[space]
default = "2rem"

[text.max_width]
desktop = "1024px"
"#,
        )
        .unwrap();

        assert_eq!(theme.space.default, "2rem");
        assert_eq!(theme.space.inset.default, "16px");
        assert_eq!(theme.text.max_width.tablet, "600px");
        assert_eq!(theme.text.max_width.desktop, "1024px");
    }

    #[test]
    fn test_breakpoint_widths() {
        let breakpoints = Breakpoints::default();
        assert_eq!(breakpoints.min_width(Breakpoint::Tablet), 600);
        assert_eq!(breakpoints.min_width(Breakpoint::Desktop), 1024);
    }
}
