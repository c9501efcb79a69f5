//! Typed style sheets for the components.
//!
//! Components never interpolate tokens into CSS text by hand. They look up
//! theme values through [`Token`] and assemble [`Rule`]s, which are printed
//! with plain `@media (min-width: ..)` blocks for each [`Breakpoint`].

use blog_kit_core::{Breakpoint, Breakpoints, StyleConfig, Theme};
use std::fmt;

pub const ARTICLE_SELECTOR: &str = ".article";
pub const AD_SLOT_SELECTOR: &str = "#codefund";

/// Space reserved for the ad before the script fills it
pub const AD_SLOT_MIN_HEIGHT: &str = "100px";

/// Height of the fixed site header the desktop article clears
pub const HEADER_OFFSET: &str = "90px";

/// Theme token references
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// `space.default`
    Space,
    /// `space.inset.default`
    Inset,
    /// `text.max_width.{tablet,desktop}`
    MaxWidth(Breakpoint),
}

impl Token {
    pub fn resolve(self, theme: &Theme) -> &str {
        match self {
            Token::Space => &theme.space.default,
            Token::Inset => &theme.space.inset.default,
            Token::MaxWidth(Breakpoint::Tablet) => &theme.text.max_width.tablet,
            Token::MaxWidth(Breakpoint::Desktop) => &theme.text.max_width.desktop,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub selector: &'static str,
    pub declarations: Vec<Declaration>,
}

impl Rule {
    pub fn new(selector: &'static str) -> Self {
        Self {
            selector,
            declarations: Vec::new(),
        }
    }

    pub fn decl(mut self, property: &'static str, value: impl Into<String>) -> Self {
        self.declarations.push(Declaration {
            property,
            value: value.into(),
        });
        self
    }

    /// Value of the last declaration for `property`
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .rev()
            .find(|d| d.property == property)
            .map(|d| d.value.as_str())
    }

    fn write(&self, f: &mut fmt::Formatter<'_>, indent: &str) -> fmt::Result {
        writeln!(f, "{indent}{} {{", self.selector)?;
        for decl in &self.declarations {
            writeln!(f, "{indent}  {}: {};", decl.property, decl.value)?;
        }
        writeln!(f, "{indent}}}")
    }
}

/// Base rules followed by one media block per breakpoint, in breakpoint order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSheet {
    breakpoints: Breakpoints,
    base: Vec<Rule>,
    responsive: Vec<(Breakpoint, Rule)>,
}

impl StyleSheet {
    pub fn new(breakpoints: Breakpoints) -> Self {
        Self {
            breakpoints,
            base: Vec::new(),
            responsive: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.base.push(rule);
        self
    }

    pub fn from_width(mut self, breakpoint: Breakpoint, rule: Rule) -> Self {
        self.responsive.push((breakpoint, rule));
        self
    }

    pub fn base_rules(&self) -> &[Rule] {
        &self.base
    }

    pub fn rules_at(&self, breakpoint: Breakpoint) -> impl Iterator<Item = &Rule> {
        self.responsive
            .iter()
            .filter(move |(bp, _)| *bp == breakpoint)
            .map(|(_, rule)| rule)
    }
}

impl fmt::Display for StyleSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.base {
            rule.write(f, "")?;
        }
        for breakpoint in Breakpoint::ALL {
            let mut rules = self.rules_at(breakpoint).peekable();
            if rules.peek().is_none() {
                continue;
            }
            writeln!(
                f,
                "@media (min-width: {}px) {{",
                self.breakpoints.min_width(breakpoint)
            )?;
            for rule in rules {
                rule.write(f, "  ")?;
            }
            writeln!(f, "}}")?;
        }
        Ok(())
    }
}

fn calc(expr: impl fmt::Display) -> String {
    format!("calc({expr})")
}

fn doubled(space: &str) -> String {
    calc(format!("{space} * 2"))
}

/// Responsive padding and width of the article container
pub fn article_style(theme: &Theme, breakpoints: Breakpoints) -> StyleSheet {
    let space = Token::Space.resolve(theme);

    StyleSheet::new(breakpoints)
        .rule(
            Rule::new(ARTICLE_SELECTOR)
                .decl("padding", Token::Inset.resolve(theme))
                .decl("margin", "0 auto"),
        )
        .from_width(
            Breakpoint::Tablet,
            Rule::new(ARTICLE_SELECTOR)
                .decl("max-width", Token::MaxWidth(Breakpoint::Tablet).resolve(theme))
                .decl("padding", format!("{} {}", calc(space), doubled(space))),
        )
        .from_width(
            Breakpoint::Desktop,
            Rule::new(ARTICLE_SELECTOR)
                .decl("max-width", Token::MaxWidth(Breakpoint::Desktop).resolve(theme))
                .decl(
                    "padding",
                    format!(
                        "{} 0 {}",
                        calc(format!("{space} * 2 + {HEADER_OFFSET}")),
                        doubled(space)
                    ),
                ),
        )
}

/// Ad placeholder sized like the article, always visible
pub fn ad_slot_style(theme: &Theme, breakpoints: Breakpoints) -> StyleSheet {
    let space = Token::Space.resolve(theme);

    StyleSheet::new(breakpoints)
        .rule(
            Rule::new(AD_SLOT_SELECTOR)
                .decl("min-height", AD_SLOT_MIN_HEIGHT)
                .decl("display", "block !important")
                .decl("visibility", "visible !important")
                .decl("padding", Token::Inset.resolve(theme))
                .decl("margin", "0 auto"),
        )
        .from_width(
            Breakpoint::Tablet,
            Rule::new(AD_SLOT_SELECTOR)
                .decl("max-width", Token::MaxWidth(Breakpoint::Tablet).resolve(theme))
                .decl("padding", format!("0 {}", doubled(space))),
        )
        .from_width(
            Breakpoint::Desktop,
            Rule::new(AD_SLOT_SELECTOR)
                .decl("max-width", Token::MaxWidth(Breakpoint::Desktop).resolve(theme))
                .decl("padding", "0"),
        )
}

/// Document-wide rules
pub fn page_style(style: &StyleConfig) -> StyleSheet {
    StyleSheet::new(style.breakpoints).rule(
        Rule::new("body")
            .decl("margin", "0")
            .decl("font-family", format!("\"{}\", sans-serif", style.font_family)),
    )
}
