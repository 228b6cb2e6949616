//! Selector matching algorithm.

use super::{Combinator, Selector, SelectorPart, TypeSelector};

/// Element attributes visible to selector matching.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchContext<'a> {
    /// Element tag name (e.g., "div", "section").
    pub tag: &'a str,
    /// Element id (for #id selectors).
    pub id: Option<&'a str>,
    /// Element's CSS classes.
    pub classes: &'a [String],
}

/// Selector matching engine.
pub struct SelectorMatcher;

impl SelectorMatcher {
    /// Check if a selector part matches the element.
    pub fn part_matches(part: &SelectorPart, context: &MatchContext<'_>) -> bool {
        if let Some(TypeSelector::Type(name)) = &part.type_selector {
            if !name.eq_ignore_ascii_case(context.tag) {
                return false;
            }
        }

        if let Some(id) = &part.id {
            match context.id {
                Some(name) if name == id => {}
                _ => return false,
            }
        }

        // All classes must be present
        part.classes
            .iter()
            .all(|class| context.classes.iter().any(|c| c == class))
    }

    /// Match a full selector against an ancestor chain.
    ///
    /// `chain` runs from the outermost ancestor to the element being tested,
    /// which must be the last entry.
    pub fn matches_chain(selector: &Selector, chain: &[MatchContext<'_>]) -> bool {
        if selector.parts.is_empty() || chain.is_empty() {
            return false;
        }
        Self::match_from(selector, selector.parts.len() - 1, chain)
    }

    fn match_from(selector: &Selector, index: usize, chain: &[MatchContext<'_>]) -> bool {
        let Some((element, ancestors)) = chain.split_last() else {
            return false;
        };

        if !Self::part_matches(&selector.parts[index], element) {
            return false;
        }
        if index == 0 {
            return true;
        }

        match selector.combinators[index - 1] {
            Combinator::Child => Self::match_from(selector, index - 1, ancestors),
            Combinator::Descendant => (1..=ancestors.len())
                .rev()
                .any(|end| Self::match_from(selector, index - 1, &ancestors[..end])),
        }
    }
}
