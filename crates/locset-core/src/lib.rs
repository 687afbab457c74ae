//! # locset
//!
//! Locators name a location in a hierarchy of named fields (a prim's
//! `primvars/color`, say) and stand for the whole subtree below it. A
//! [`LocatorSet`] is a minimal collection of them, used to answer "does this
//! change touch the part I care about?".
//!
//! ```
//! use locset_core::{LocatorSet, locator};
//!
//! let dirty: LocatorSet = [
//!   locator!["points"],
//!   locator!["points", "x"],
//!   locator!["primvars"],
//! ]
//! .into();
//! assert_eq!(dirty.to_string(), "{points, primvars}");
//! assert!(dirty.intersects(&locator!["primvars", "color"]));
//! assert!(!dirty.intersects(&locator!["xform"]));
//! ```
#![deny(clippy::all)]
pub mod locator;
pub mod locator_set;
pub mod parse;
pub mod token;

pub use locator::Locator;
pub use locator_set::LocatorSet;
pub use parse::{ParseLocatorError, parse_locator, parse_locator_list, parse_locator_set};
pub use token::Token;
