//! Error types for `enrol-core`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What an identifier in an error refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Key {
  Student(String),
  Unit(String),
  /// A unit code looked up in one student's enrollment set.
  Enrollment {
    student_id: String,
    unit_code:  String,
  },
}

impl fmt::Display for Key {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Student(id) => write!(f, "student '{id}'"),
      Self::Unit(code) => write!(f, "unit '{code}'"),
      Self::Enrollment {
        student_id,
        unit_code,
      } => write!(f, "enrollment of student '{student_id}' in unit '{unit_code}'"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("{0} already exists")]
  DuplicateKey(Key),

  #[error("{0} not found")]
  NotFound(Key),

  #[error("student '{student_id}' is already enrolled in the maximum of {cap} units")]
  CapReached { student_id: String, cap: usize },

  #[error("student '{student_id}' is already enrolled in unit '{unit_code}'")]
  AlreadyEnrolled {
    student_id: String,
    unit_code:  String,
  },

  #[error("unit '{0}' is not available")]
  UnitUnavailable(String),

  #[error("operation cancelled")]
  Cancelled,
}

/// Payload-free discriminant of [`Error`].
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
  strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
  DuplicateKey,
  NotFound,
  CapReached,
  AlreadyEnrolled,
  UnitUnavailable,
  Cancelled,
}

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::DuplicateKey(_) => ErrorKind::DuplicateKey,
      Self::NotFound(_) => ErrorKind::NotFound,
      Self::CapReached { .. } => ErrorKind::CapReached,
      Self::AlreadyEnrolled { .. } => ErrorKind::AlreadyEnrolled,
      Self::UnitUnavailable(_) => ErrorKind::UnitUnavailable,
      Self::Cancelled => ErrorKind::Cancelled,
    }
  }

  /// `true` when the user declined a confirmation rather than the request
  /// being invalid.
  pub fn is_cancelled(&self) -> bool { matches!(self, Self::Cancelled) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
