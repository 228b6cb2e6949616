//! Selector type definitions.

use std::fmt;

use crate::Result;

/// A complete CSS-like selector (e.g., "section.feature-fashion > #row").
///
/// A selector consists of one or more selector parts connected by combinators.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    /// Chain of selector parts with their connecting combinators.
    pub parts: Vec<SelectorPart>,
    /// Combinators between parts (length = parts.len() - 1).
    pub combinators: Vec<Combinator>,
}

impl Selector {
    /// Parse a selector from its CSS text.
    pub fn parse(source: &str) -> Result<Self> {
        super::parser::parse_selector(source)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                match &self.combinators[i - 1] {
                    Combinator::Descendant => write!(f, " ")?,
                    Combinator::Child => write!(f, " > ")?,
                }
            }
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}

/// A single compound selector segment (e.g., "div#row.col-12").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SelectorPart {
    /// Type selector (tag name or universal).
    pub type_selector: Option<TypeSelector>,
    /// ID selector (#id).
    pub id: Option<String>,
    /// Class selectors (.class).
    pub classes: Vec<String>,
}

impl SelectorPart {
    /// Check if the part carries no constraint at all.
    pub fn is_empty(&self) -> bool {
        self.type_selector.is_none() && self.id.is_none() && self.classes.is_empty()
    }
}

impl fmt::Display for SelectorPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.type_selector {
            Some(TypeSelector::Universal) => write!(f, "*")?,
            Some(TypeSelector::Type(t)) => write!(f, "{}", t)?,
            None => {}
        }

        if let Some(id) = &self.id {
            write!(f, "#{}", id)?;
        }

        for class in &self.classes {
            write!(f, ".{}", class)?;
        }

        Ok(())
    }
}

/// Type selector - matches an element's tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSelector {
    /// Universal selector (*) - matches any element.
    Universal,
    /// Named tag (e.g., "div", "section").
    Type(String),
}

/// Combinator between selector parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Descendant combinator (space): matches any descendant.
    Descendant,
    /// Child combinator (>): matches direct child only.
    Child,
}
