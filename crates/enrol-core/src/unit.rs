//! Unit — an immutable course offering.

use std::{
  fmt,
  hash::{Hash, Hasher},
  num::NonZeroU32,
};

use serde::Serialize;

/// A course offering identified by its code.
///
/// Equality and hashing consider only `code`; two units with the same code
/// are the same offering regardless of title or credit points.
#[derive(Debug, Clone, Serialize)]
pub struct Unit {
  code:          String,
  title:         String,
  credit_points: NonZeroU32,
}

impl Unit {
  pub fn new(
    code: impl Into<String>,
    title: impl Into<String>,
    credit_points: NonZeroU32,
  ) -> Self {
    Self {
      code: code.into(),
      title: title.into(),
      credit_points,
    }
  }

  pub fn code(&self) -> &str { &self.code }

  pub fn title(&self) -> &str { &self.title }

  pub fn credit_points(&self) -> NonZeroU32 { self.credit_points }
}

impl PartialEq for Unit {
  fn eq(&self, other: &Self) -> bool { self.code == other.code }
}

impl Eq for Unit {}

impl Hash for Unit {
  fn hash<H: Hasher>(&self, state: &mut H) { self.code.hash(state); }
}

/// `FIT5136 - Software Engineering (6 credit points)`
impl fmt::Display for Unit {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} - {} ({} credit points)",
      self.code, self.title, self.credit_points
    )
  }
}
