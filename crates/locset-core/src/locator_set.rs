use std::fmt;

use log::trace;
use smallvec::SmallVec;

use crate::locator::Locator;
use crate::token::Token;

const INLINE_LOCATORS: usize = 8;

type Members<T> = SmallVec<[Locator<T>; INLINE_LOCATORS]>;

/// A set of locators describing the union of the subtrees rooted at each
/// member, e.g. "everything that changed" on a prim.
///
/// The set is kept minimal: no member is a prefix of another, since the
/// longer one would already be covered. Inserting `points/x` into
/// `{points}` is a no-op, and inserting `points` into `{points/x, points/y}`
/// replaces both. Members are kept sorted, which is also the iteration order.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct LocatorSet<T = Token> {
  locators: Members<T>,
}

impl<T> LocatorSet<T> {
  pub const fn new() -> Self {
    Self {
      locators: SmallVec::new_const(),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.locators.is_empty()
  }

  pub fn len(&self) -> usize {
    self.locators.len()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Locator<T>> {
    self.locators.iter()
  }

  pub fn as_slice(&self) -> &[Locator<T>] {
    &self.locators
  }
}

impl<T: Clone + Ord> LocatorSet<T> {
  /// Adds `locator`, unless a member already covers it. Members that
  /// `locator` covers are dropped.
  pub fn insert(&mut self, locator: Locator<T>) {
    // A member covering `locator` sorts directly before it, and the members
    // it covers form a run directly after it.
    let pos = match self.locators.binary_search(&locator) {
      Ok(_) => return,
      Err(pos) => pos,
    };
    if pos > 0 && locator.has_prefix(&self.locators[pos - 1]) {
      return;
    }

    let covered = self.locators[pos..]
      .iter()
      .take_while(|member| member.has_prefix(&locator))
      .count();
    if covered == 0 {
      self.locators.insert(pos, locator);
    } else {
      self.locators[pos] = locator;
      self.locators.drain(pos + 1..pos + covered);
    }
  }

  /// Inserts every member of `other`. The result does not depend on the
  /// order in which sets are combined.
  pub fn insert_set(&mut self, other: &Self) {
    if other.is_empty() {
      return;
    }
    if self.is_empty() {
      self.locators.clone_from(&other.locators);
      return;
    }
    self.locators.extend(other.locators.iter().cloned());
    self.flatten();
  }

  /// Returns a new set holding the members of both `self` and `other`.
  #[must_use]
  pub fn union(&self, other: &Self) -> Self {
    let mut result = self.clone();
    result.insert_set(other);
    result
  }

  /// Returns `true` if `locator` overlaps any member, i.e. is a prefix of
  /// one or has one as a prefix.
  pub fn intersects(&self, locator: &Locator<T>) -> bool {
    match self.locators.binary_search(locator) {
      Ok(_) => true,
      Err(pos) => {
        (pos > 0 && locator.has_prefix(&self.locators[pos - 1]))
          || self
            .locators
            .get(pos)
            .is_some_and(|member| member.has_prefix(locator))
      }
    }
  }

  /// Returns `true` if any member of `self` overlaps any member of `other`.
  pub fn intersects_set(&self, other: &Self) -> bool {
    let (small, large) = if self.len() <= other.len() {
      (self, other)
    } else {
      (other, self)
    };
    small.iter().any(|locator| large.intersects(locator))
  }

  /// Returns `true` if the whole subtree at `locator` is covered by a
  /// member.
  pub fn contains(&self, locator: &Locator<T>) -> bool {
    match self.locators.binary_search(locator) {
      Ok(_) => true,
      Err(pos) => pos > 0 && locator.has_prefix(&self.locators[pos - 1]),
    }
  }

  /// Restricts the set to the subtree at `locator`.
  ///
  /// If a member covers `locator` the result is just `{locator}`, otherwise
  /// it holds the members lying under `locator`.
  #[must_use]
  pub fn intersection(&self, locator: &Locator<T>) -> Self {
    let pos = match self.locators.binary_search(locator) {
      Ok(_) => return Self::from(locator.clone()),
      Err(pos) => pos,
    };
    if pos > 0 && locator.has_prefix(&self.locators[pos - 1]) {
      return Self::from(locator.clone());
    }
    let locators = self.locators[pos..]
      .iter()
      .take_while(|member| member.has_prefix(locator))
      .cloned()
      .collect();
    Self { locators }
  }

  /// Rebases every member under `old_prefix` onto `new_prefix`. Members
  /// outside `old_prefix` are kept as they are.
  #[must_use]
  pub fn replace_prefix(&self, old_prefix: &Locator<T>, new_prefix: &Locator<T>) -> Self {
    self
      .iter()
      .map(|locator| locator.replace_prefix(old_prefix, new_prefix))
      .collect()
  }

  /// Sorts the members and drops every member covered by the one kept
  /// before it.
  fn flatten(&mut self) {
    let before = self.locators.len();
    self.locators.sort_unstable();
    self
      .locators
      .dedup_by(|candidate, kept| candidate.has_prefix(kept));
    trace!(
      "flattened locator set from {before} to {} members",
      self.locators.len()
    );
  }
}

impl<T> Default for LocatorSet<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> From<Locator<T>> for LocatorSet<T> {
  fn from(locator: Locator<T>) -> Self {
    let mut locators = Members::new();
    locators.push(locator);
    Self { locators }
  }
}

impl<T: Clone + Ord, const N: usize> From<[Locator<T>; N]> for LocatorSet<T> {
  fn from(locators: [Locator<T>; N]) -> Self {
    locators.into_iter().collect()
  }
}

impl<T: Clone + Ord> FromIterator<Locator<T>> for LocatorSet<T> {
  fn from_iter<I: IntoIterator<Item = Locator<T>>>(iter: I) -> Self {
    let mut set = Self {
      locators: iter.into_iter().collect(),
    };
    set.flatten();
    set
  }
}

impl<T: Clone + Ord> Extend<Locator<T>> for LocatorSet<T> {
  fn extend<I: IntoIterator<Item = Locator<T>>>(&mut self, iter: I) {
    self.locators.extend(iter);
    self.flatten();
  }
}

impl<'a, T> IntoIterator for &'a LocatorSet<T> {
  type Item = &'a Locator<T>;
  type IntoIter = std::slice::Iter<'a, Locator<T>>;

  fn into_iter(self) -> Self::IntoIter {
    self.locators.iter()
  }
}

impl<T> IntoIterator for LocatorSet<T> {
  type Item = Locator<T>;
  type IntoIter = smallvec::IntoIter<[Locator<T>; INLINE_LOCATORS]>;

  fn into_iter(self) -> Self::IntoIter {
    self.locators.into_iter()
  }
}

/// Renders as `{points, primvars/color}`. The empty locator is written as
/// `/` so that `{/}` (everything) differs from `{}` (nothing).
impl<T: fmt::Display> fmt::Display for LocatorSet<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("{")?;
    for (i, locator) in self.locators.iter().enumerate() {
      if i > 0 {
        f.write_str(", ")?;
      }
      if locator.is_empty() {
        f.write_str("/")?;
      } else {
        write!(f, "{locator}")?;
      }
    }
    f.write_str("}")
  }
}

impl<T: fmt::Debug> fmt::Debug for LocatorSet<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_set().entries(self.locators.iter()).finish()
  }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for LocatorSet<T> {
  fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(self.locators.iter())
  }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for LocatorSet<T>
where
  T: serde::Deserialize<'de> + Clone + Ord,
{
  fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    // whatever was stored, hand back a minimal set
    Vec::<Locator<T>>::deserialize(deserializer).map(Self::from_iter)
  }
}
