//! Selector parsing using the `cssparser` tokenizer.
//!
//! Only the subset of selector syntax that widget registration needs is
//! accepted: type, universal, `#id` and `.class` parts joined by descendant
//! or child combinators. Anything else is rejected with
//! [`Error::InvalidSelector`].

use cssparser::{Parser, ParserInput, Token};

use super::{Combinator, Selector, SelectorPart, TypeSelector};
use crate::{Error, Result};

/// Parse a selector string such as `".feature-fashion"` or `"main > #row"`.
pub(crate) fn parse_selector(source: &str) -> Result<Selector> {
    let mut input = ParserInput::new(source);
    let mut parser = Parser::new(&mut input);

    let mut parts = vec![];
    let mut combinators = vec![];
    let mut current = SelectorPart::default();
    let mut pending: Option<Combinator> = None;

    loop {
        let token = match parser.next_including_whitespace() {
            Ok(t) => t.clone(),
            Err(_) => break,
        };

        match &token {
            Token::WhiteSpace(_) => {
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                    pending = Some(Combinator::Descendant);
                }
            }

            Token::Delim('>') => {
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                    pending = Some(Combinator::Child);
                } else if pending.is_some() {
                    // "a > b" tokenizes as part, whitespace, '>', whitespace, part
                    pending = Some(Combinator::Child);
                } else {
                    return Err(Error::invalid_selector(source, "Unexpected '>'"));
                }
            }

            Token::Ident(name) => {
                if !current.is_empty() {
                    return Err(Error::invalid_selector(source, "Unexpected identifier"));
                }
                begin_part(&parts, &mut combinators, &mut pending);
                current.type_selector = Some(TypeSelector::Type(name.to_string()));
            }

            Token::Delim('*') => {
                if !current.is_empty() {
                    return Err(Error::invalid_selector(source, "Unexpected '*'"));
                }
                begin_part(&parts, &mut combinators, &mut pending);
                current.type_selector = Some(TypeSelector::Universal);
            }

            Token::Delim('.') => {
                // The class name must follow the dot directly
                let class = match parser.next_including_whitespace() {
                    Ok(Token::Ident(name)) => name.to_string(),
                    _ => {
                        return Err(Error::invalid_selector(
                            source,
                            "Expected class name after '.'",
                        ));
                    }
                };
                if current.is_empty() {
                    begin_part(&parts, &mut combinators, &mut pending);
                }
                current.classes.push(class);
            }

            Token::IDHash(id) | Token::Hash(id) => {
                if current.id.is_some() {
                    return Err(Error::invalid_selector(source, "Duplicate id"));
                }
                if current.is_empty() {
                    begin_part(&parts, &mut combinators, &mut pending);
                }
                current.id = Some(id.to_string());
            }

            other => {
                return Err(Error::invalid_selector(
                    source,
                    format!("Unsupported token {:?}", other),
                ));
            }
        }
    }

    if !current.is_empty() {
        parts.push(current);
    } else if pending == Some(Combinator::Child) {
        return Err(Error::invalid_selector(source, "Dangling '>'"));
    }

    if parts.is_empty() {
        return Err(Error::invalid_selector(source, "Empty selector"));
    }

    debug_assert_eq!(combinators.len() + 1, parts.len());
    Ok(Selector { parts, combinators })
}

/// Record the combinator that joins the previous part to the one starting now.
fn begin_part(
    parts: &[SelectorPart],
    combinators: &mut Vec<Combinator>,
    pending: &mut Option<Combinator>,
) {
    if !parts.is_empty() {
        combinators.push(pending.take().unwrap_or(Combinator::Descendant));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_class_selector() {
        let sel = parse_selector(".categories-snippet").unwrap();
        assert_eq!(sel.parts.len(), 1);
        assert_eq!(sel.parts[0].classes, vec!["categories-snippet"]);
        assert!(sel.parts[0].type_selector.is_none());
    }

    #[test]
    fn parses_id_selector() {
        let sel = parse_selector("#latest-products-row").unwrap();
        assert_eq!(sel.parts.len(), 1);
        assert_eq!(sel.parts[0].id.as_deref(), Some("latest-products-row"));
    }

    #[test]
    fn parses_compound_part() {
        let sel = parse_selector("section#hero.feature-fashion.dark").unwrap();
        assert_eq!(sel.parts.len(), 1);
        let part = &sel.parts[0];
        assert_eq!(part.type_selector, Some(TypeSelector::Type("section".into())));
        assert_eq!(part.id.as_deref(), Some("hero"));
        assert_eq!(part.classes, vec!["feature-fashion", "dark"]);
    }

    #[test]
    fn parses_combinators() {
        let sel = parse_selector("main .snippet > #row").unwrap();
        assert_eq!(sel.parts.len(), 3);
        assert_eq!(sel.combinators, vec![Combinator::Descendant, Combinator::Child]);

        let sel = parse_selector("main>#row").unwrap();
        assert_eq!(sel.combinators, vec![Combinator::Child]);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let sel = parse_selector("  .feature-fashion  ").unwrap();
        assert_eq!(sel, parse_selector(".feature-fashion").unwrap());
        assert!(sel.combinators.is_empty());
    }

    #[test]
    fn display_round_trips_text() {
        let sel = parse_selector("div.a > span#b .c").unwrap();
        assert_eq!(sel.to_string(), "div.a > span#b .c");
    }

    #[test]
    fn rejects_invalid_input() {
        assert!(parse_selector("").is_err());
        assert!(parse_selector("   ").is_err());
        assert!(parse_selector("> .x").is_err());
        assert!(parse_selector(".x >").is_err());
        assert!(parse_selector(".").is_err());
        assert!(parse_selector("a:hover").is_err());
        assert!(parse_selector("#a#b").is_err());
    }

    #[test]
    fn class_name_must_follow_dot() {
        assert!(parse_selector(". x").is_err());
        assert!(parse_selector(".a . b").is_err());
        assert!(parse_selector("div .\tx").is_err());
        assert!(parse_selector(".a .b").is_ok());
    }

    #[test]
    fn error_names_the_selector() {
        let err = parse_selector("a:hover").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidSelector { ref selector, .. } if selector == "a:hover"
        ));
    }
}
