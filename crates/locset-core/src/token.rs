use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// A single name in a locator, e.g. `primvars` or `points`.
///
/// Tokens are immutable and cheap to clone (a shared `str`), and compare,
/// order and hash by their text. The default token is the empty token, which
/// is what `Locator::first_element` / `Locator::last_element` hand back for an
/// empty locator.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token(Arc<str>);

impl Token {
  pub fn new(name: &str) -> Self {
    Self(Arc::from(name))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Whether this is the empty token.
  ///
  /// Note this is unrelated to a locator being empty, a locator can hold
  /// empty tokens as ordinary elements.
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl Default for Token {
  fn default() -> Self {
    Self(Arc::from(""))
  }
}

impl From<&str> for Token {
  fn from(name: &str) -> Self {
    Self::new(name)
  }
}

impl From<String> for Token {
  fn from(name: String) -> Self {
    Self(Arc::from(name))
  }
}

impl From<&Token> for Token {
  fn from(token: &Token) -> Self {
    token.clone()
  }
}

impl AsRef<str> for Token {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl Borrow<str> for Token {
  fn borrow(&self) -> &str {
    &self.0
  }
}

impl PartialEq<str> for Token {
  fn eq(&self, other: &str) -> bool {
    &*self.0 == other
  }
}

impl PartialEq<&str> for Token {
  fn eq(&self, other: &&str) -> bool {
    &*self.0 == *other
  }
}

impl fmt::Display for Token {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl fmt::Debug for Token {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Debug::fmt(&*self.0, f)
  }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Token {
  fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.0)
  }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Token {
  fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    String::deserialize(deserializer).map(Self::from)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_token_is_empty() {
    assert!(Token::default().is_empty());
    assert_eq!(Token::default(), Token::new(""));
    assert!(!Token::new("points").is_empty());
  }

  #[test]
  fn test_token_orders_by_text() {
    assert!(Token::new("points") < Token::new("primvars"));
    assert!(Token::new("") < Token::new("a"));
    assert_eq!(Token::from("x".to_string()), "x");
  }

  #[test]
  fn test_token_display_and_debug() {
    let token = Token::new("primvars");
    assert_eq!(token.to_string(), "primvars");
    assert_eq!(format!("{token:?}"), "\"primvars\"");
  }
}
