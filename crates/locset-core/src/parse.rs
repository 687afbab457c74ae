use std::str::FromStr;

use log::debug;
use nom::{
  IResult, Parser,
  branch::alt,
  bytes::complete::take_while1,
  character::complete::{char, space0},
  combinator::{all_consuming, map, opt, rest, value},
  multi::separated_list1,
  sequence::{delimited, preceded},
};
use thiserror::Error;

use crate::locator::Locator;
use crate::locator_set::LocatorSet;
use crate::token::Token;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseLocatorError {
  /// `line` is 1-based
  #[error("invalid locator on line {line}: {text:?}")]
  InvalidLocator { line: usize, text: String },
}

fn is_name_char(c: char) -> bool {
  c != '/' && c != '#' && !c.is_whitespace()
}

/// A single element name, e.g. `primvars`
fn parse_name(input: &str) -> IResult<&str, Token> {
  map(take_while1(is_name_char), Token::new).parse(input)
}

/// Parse a `/`-separated locator
/// Examples:
/// - `primvars/color`
/// - `/primvars/color` (the leading `/` is optional)
/// - `/` (the empty locator)
pub fn parse_locator(input: &str) -> IResult<&str, Locator> {
  alt((
    map(
      preceded(opt(char('/')), separated_list1(char('/'), parse_name)),
      |tokens: Vec<Token>| tokens.into_iter().collect::<Locator>(),
    ),
    value(Locator::<Token>::EMPTY, char('/')),
  ))
  .parse(input)
}

/// Parse one line of a locator list, which may be blank or hold just a
/// `#` comment.
/// e.g.
/// `  primvars/color   # the display color`
fn parse_line(input: &str) -> IResult<&str, Option<Locator>> {
  delimited(
    space0,
    opt(parse_locator),
    (space0, opt(preceded(char('#'), rest))),
  )
  .parse(input)
}

/// Parses a locator list, one locator per line, returning them in file
/// order.
/// e.g.
/// ```text
/// # dirtied by the deformer
/// points
/// primvars/normals
/// ```
pub fn parse_locator_list(input: &str) -> Result<Vec<Locator>, ParseLocatorError> {
  let mut locators = Vec::new();
  let mut line_count = 0;
  for (i, line) in input.lines().enumerate() {
    line_count += 1;
    let (_, locator) =
      all_consuming(parse_line)
        .parse(line)
        .map_err(|_| ParseLocatorError::InvalidLocator {
          line: i + 1,
          text: line.trim().to_string(),
        })?;
    if let Some(locator) = locator {
      locators.push(locator);
    }
  }
  debug!(
    "parsed {} locators from {line_count} lines",
    locators.len()
  );
  Ok(locators)
}

/// Parses a locator list straight into a minimal [`LocatorSet`].
pub fn parse_locator_set(input: &str) -> Result<LocatorSet, ParseLocatorError> {
  parse_locator_list(input).map(LocatorSet::from_iter)
}

/// The inverse of `Display`: an empty string is the empty locator.
impl FromStr for Locator<Token> {
  type Err = ParseLocatorError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
      return Ok(Self::EMPTY);
    }
    all_consuming(parse_locator)
      .parse(trimmed)
      .map(|(_, locator)| locator)
      .map_err(|_| ParseLocatorError::InvalidLocator {
        line: 1,
        text: trimmed.to_string(),
      })
  }
}
