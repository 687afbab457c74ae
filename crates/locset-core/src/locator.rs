use std::fmt;
use std::ops::Index;

use smallvec::SmallVec;

use crate::token::Token;

/// Locators are expected to be short, so this many tokens are stored inline
/// before spilling to the heap.
const INLINE_TOKENS: usize = 6;

type Elements<T> = SmallVec<[T; INLINE_TOKENS]>;

/// Identifies a location in a named hierarchy as the list of names leading
/// to it from the root, e.g. `primvars/color`.
///
/// A locator stands for the whole subtree rooted at that location, so the
/// empty locator stands for the entire hierarchy and is a prefix of every
/// other locator.
///
/// Locators are values: every operation that "modifies" one returns a new
/// locator and leaves `self` untouched.
///
/// Ordering is lexicographic over the tokens, with a locator sorting directly
/// before any locator it is a prefix of.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
  feature = "serde",
  derive(serde::Serialize, serde::Deserialize),
  serde(transparent)
)]
pub struct Locator<T = Token> {
  elements: Elements<T>,
}

/// Builds a [`Locator`] of [`Token`]s from any number of names.
///
/// ```
/// use locset_core::{Locator, locator};
///
/// let color = locator!["primvars", "color"];
/// assert_eq!(color.element_count(), 2);
/// assert!(color.has_prefix(&locator!["primvars"]));
/// assert_eq!(locator![], Locator::EMPTY);
/// ```
#[macro_export]
macro_rules! locator {
  () => {
    <$crate::Locator>::new()
  };
  ($($token:expr),+ $(,)?) => {
    <$crate::Locator>::from_tokens(&[$($crate::Token::from($token)),+])
  };
}

impl<T> Locator<T> {
  /// The empty locator, i.e. the root of the hierarchy.
  pub const EMPTY: Self = Self {
    elements: SmallVec::new_const(),
  };

  pub const fn new() -> Self {
    Self::EMPTY
  }

  pub const fn empty() -> Self {
    Self::EMPTY
  }

  pub fn element_count(&self) -> usize {
    self.elements.len()
  }

  pub fn is_empty(&self) -> bool {
    self.elements.is_empty()
  }

  /// Returns the element at `i`.
  ///
  /// # Panics
  ///
  /// Panics if `i` is not less than [`Locator::element_count`].
  pub fn element(&self, i: usize) -> &T {
    &self.elements[i]
  }

  pub fn get(&self, i: usize) -> Option<&T> {
    self.elements.get(i)
  }

  pub fn elements(&self) -> &[T] {
    &self.elements
  }

  pub fn iter(&self) -> std::slice::Iter<'_, T> {
    self.elements.iter()
  }
}

impl<T: Clone> Locator<T> {
  pub fn from_tokens(tokens: &[T]) -> Self {
    Self {
      elements: tokens.into(),
    }
  }

  /// Returns the first element, or the empty token if there are none.
  pub fn first_element(&self) -> T
  where
    T: Default,
  {
    self.elements.first().cloned().unwrap_or_default()
  }

  /// Returns the last element, or the empty token if there are none.
  pub fn last_element(&self) -> T
  where
    T: Default,
  {
    self.elements.last().cloned().unwrap_or_default()
  }

  /// Returns a copy with the last element replaced by `token`.
  /// The empty locator is returned unchanged.
  #[must_use]
  pub fn replace_last_element(&self, token: impl Into<T>) -> Self {
    let mut elements = self.elements.clone();
    if let Some(last) = elements.last_mut() {
      *last = token.into();
    }
    Self { elements }
  }

  #[must_use]
  pub fn remove_last_element(&self) -> Self {
    let len = self.elements.len().saturating_sub(1);
    Self::from_tokens(&self.elements[..len])
  }

  #[must_use]
  pub fn remove_first_element(&self) -> Self {
    Self::from_tokens(self.elements.get(1..).unwrap_or_default())
  }

  #[must_use]
  pub fn append(&self, token: impl Into<T>) -> Self {
    let mut elements = self.elements.clone();
    elements.push(token.into());
    Self { elements }
  }

  /// Appends every element of `locator` after the elements of `self`.
  #[must_use]
  pub fn append_locator(&self, locator: &Self) -> Self {
    self.concat(locator)
  }

  #[must_use]
  pub fn prepend(&self, token: impl Into<T>) -> Self {
    let mut elements: Elements<T> = Elements::with_capacity(self.elements.len() + 1);
    elements.push(token.into());
    elements.extend(self.elements.iter().cloned());
    Self { elements }
  }

  /// Prepends every element of `locator` before the elements of `self`.
  #[must_use]
  pub fn prepend_locator(&self, locator: &Self) -> Self {
    locator.concat(self)
  }

  fn concat(&self, tail: &Self) -> Self {
    if self.is_empty() {
      return tail.clone();
    }
    let mut elements: Elements<T> =
      Elements::with_capacity(self.elements.len() + tail.elements.len());
    elements.extend(self.elements.iter().cloned());
    elements.extend(tail.elements.iter().cloned());
    Self { elements }
  }
}

impl<T: PartialEq> Locator<T> {
  /// Returns `true` if the leading elements of `self` are exactly the
  /// elements of `prefix`.
  ///
  /// Every locator has itself and the empty locator as a prefix. In terms of
  /// subtrees, the subtree at `prefix` contains the subtree at `self`.
  pub fn has_prefix(&self, prefix: &Self) -> bool {
    self.elements.starts_with(&prefix.elements)
  }

  /// Returns `true` if either locator is a prefix of the other, meaning their
  /// subtrees overlap.
  pub fn intersects(&self, other: &Self) -> bool {
    self.has_prefix(other) || other.has_prefix(self)
  }

  /// The longest locator that is a prefix of both `self` and `other`.
  #[must_use]
  pub fn common_prefix(&self, other: &Self) -> Self
  where
    T: Clone,
  {
    let len = self
      .elements
      .iter()
      .zip(other.elements.iter())
      .take_while(|(a, b)| a == b)
      .count();
    Self::from_tokens(&self.elements[..len])
  }

  /// Returns a copy with `old_prefix` swapped for `new_prefix`.
  ///
  /// If `self` does not have `old_prefix` as a prefix it is returned
  /// unchanged.
  #[must_use]
  pub fn replace_prefix(&self, old_prefix: &Self, new_prefix: &Self) -> Self
  where
    T: Clone,
  {
    if !self.has_prefix(old_prefix) {
      return self.clone();
    }
    let rest = &self.elements[old_prefix.elements.len()..];
    let mut elements: Elements<T> =
      Elements::with_capacity(new_prefix.elements.len() + rest.len());
    elements.extend(new_prefix.elements.iter().cloned());
    elements.extend(rest.iter().cloned());
    Self { elements }
  }
}

impl<T: fmt::Display> Locator<T> {
  /// Renders the elements joined by `delimiter`. The empty locator renders
  /// as an empty string.
  pub fn to_delimited_string(&self, delimiter: &str) -> String {
    let mut out = String::new();
    for (i, token) in self.elements.iter().enumerate() {
      if i > 0 {
        out.push_str(delimiter);
      }
      out.push_str(&token.to_string());
    }
    out
  }
}

impl<T> Default for Locator<T> {
  fn default() -> Self {
    Self::EMPTY
  }
}

impl<T> Index<usize> for Locator<T> {
  type Output = T;

  fn index(&self, i: usize) -> &T {
    self.element(i)
  }
}

impl<T> FromIterator<T> for Locator<T> {
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    Self {
      elements: iter.into_iter().collect(),
    }
  }
}

impl<T, const N: usize> From<[T; N]> for Locator<T> {
  fn from(tokens: [T; N]) -> Self {
    tokens.into_iter().collect()
  }
}

impl<'a, T> IntoIterator for &'a Locator<T> {
  type Item = &'a T;
  type IntoIter = std::slice::Iter<'a, T>;

  fn into_iter(self) -> Self::IntoIter {
    self.elements.iter()
  }
}

impl<T: fmt::Display> fmt::Display for Locator<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, token) in self.elements.iter().enumerate() {
      if i > 0 {
        f.write_str("/")?;
      }
      write!(f, "{token}")?;
    }
    Ok(())
  }
}

impl<T: fmt::Debug> fmt::Debug for Locator<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Locator")?;
    f.debug_list().entries(self.elements.iter()).finish()
  }
}
