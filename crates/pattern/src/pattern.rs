//! Parsing and evaluation of path patterns against exact ancestor paths.

use crate::element::{LiteralElement, PatternElement};
use crate::error::PatternError;
use devour_qname::{ExactPath, NamespaceContext, QualifiedName};
use nom::{
    IResult, Parser,
    bytes::complete::take_while1,
    character::complete::char,
    combinator::{all_consuming, map, opt},
    sequence::{pair, terminated},
};
use std::fmt;

/// A compiled path pattern: an ordered element sequence plus the derived
/// flag selecting the matching strategy. Equality and hashing go over the
/// element sequence, so patterns can key registration maps.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathPattern {
    elements: Vec<PatternElement>,
    pure_literal: bool,
}

impl PathPattern {
    pub fn new(elements: Vec<PatternElement>) -> Self {
        let pure_literal = elements
            .iter()
            .all(|element| matches!(element, PatternElement::Literal(_)));
        Self {
            elements,
            pure_literal,
        }
    }

    /// Parses the pattern grammar `'/' segment ('/' segment)*` where a
    /// segment is `**` or `[prefix ':'] (localName | '*')` and the prefix
    /// may itself be `*`. Empty segments from leading, trailing or doubled
    /// slashes are ignored.
    pub fn parse(input: &str) -> Result<Self, PatternError> {
        let elements = input
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                parse_segment(segment)
                    .map_err(|reason| PatternError::Parse(input.to_string(), reason))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(elements))
    }

    pub fn elements(&self) -> &[PatternElement] {
        &self.elements
    }

    /// True when no segment is a `**` global wildcard.
    pub fn is_pure_literal(&self) -> bool {
        self.pure_literal
    }

    /// Matches this pattern against an exact ancestor path.
    pub fn matches(&self, path: &ExactPath, context: &NamespaceContext) -> bool {
        let names = path.names();
        if self.pure_literal {
            return self.elements.len() == names.len()
                && self
                    .elements
                    .iter()
                    .zip(names)
                    .all(|(element, name)| match element {
                        PatternElement::Literal(literal) => literal.matches(name, context),
                        PatternElement::Global => false,
                    });
        }
        match_from(&self.elements, names, context)
    }
}

/// Backtracking matcher for patterns containing global wildcards.
///
/// Recursion only ever re-enters past a `**`, so its depth is bounded by
/// the number of wildcards in the pattern, not by the document.
fn match_from(
    mut elements: &[PatternElement],
    mut names: &[QualifiedName],
    context: &NamespaceContext,
) -> bool {
    // Consume literals in lock-step; any mismatch fails immediately.
    loop {
        match elements.first() {
            Some(PatternElement::Literal(literal)) => match names.first() {
                Some(name) if literal.matches(name, context) => {
                    elements = &elements[1..];
                    names = &names[1..];
                }
                _ => return false,
            },
            Some(PatternElement::Global) => break,
            // Both exhausted is a match; leftover names are not.
            None => return names.is_empty(),
        }
    }

    // A trailing global wildcard absorbs the remaining suffix, empty included.
    if elements.len() == 1 {
        return true;
    }

    // Try every split point for the wildcard; the first structurally
    // successful split wins.
    let rest = &elements[1..];
    (0..=names.len()).any(|split| match_from(rest, &names[split..], context))
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.elements.is_empty() {
            return write!(f, "/");
        }
        for element in &self.elements {
            write!(f, "/{}", element)?;
        }
        Ok(())
    }
}

// --- Parser ---

fn parse_segment(segment: &str) -> Result<PatternElement, String> {
    if segment == "**" {
        return Ok(PatternElement::Global);
    }
    match all_consuming(literal_element).parse(segment) {
        Ok((_, element)) => Ok(element),
        Err(e) => Err(format!("bad segment '{}': {}", segment, e)),
    }
}

fn token(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c != ':' && c != '/').parse(input)
}

fn literal_element(input: &str) -> IResult<&str, PatternElement> {
    map(
        pair(opt(terminated(token, char(':'))), token),
        |(prefix, name)| {
            PatternElement::Literal(LiteralElement::new(name, prefix.map(str::to_string)))
        },
    )
    .parse(input)
}
