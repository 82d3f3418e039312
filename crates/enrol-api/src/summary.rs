//! Serialisable read models returned by [`crate::Session`] queries.

use std::fmt;

use enrol_core::{Student, Unit};
use serde::Serialize;

// ─── Units ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitSummary {
  pub code:          String,
  pub title:         String,
  pub credit_points: u32,
}

impl From<&Unit> for UnitSummary {
  fn from(unit: &Unit) -> Self {
    Self {
      code:          unit.code().to_owned(),
      title:         unit.title().to_owned(),
      credit_points: unit.credit_points().get(),
    }
  }
}

impl fmt::Display for UnitSummary {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} - {} ({} credit points)",
      self.code, self.title, self.credit_points
    )
  }
}

// ─── Students ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KindTag {
  FullTime,
  PartTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentSummary {
  pub id:             String,
  pub name:           String,
  pub kind:           KindTag,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub course_advisor: Option<String>,
  /// Codes of the enrolled units, in code order.
  pub units:          Vec<String>,
}

impl From<&Student> for StudentSummary {
  fn from(student: &Student) -> Self {
    Self {
      id:             student.id().to_owned(),
      name:           student.name().to_owned(),
      kind:           if student.kind().is_part_time() {
        KindTag::PartTime
      } else {
        KindTag::FullTime
      },
      course_advisor: student.course_advisor().map(str::to_owned),
      units:          student.units().map(|u| u.code().to_owned()).collect(),
    }
  }
}

impl fmt::Display for StudentSummary {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} - {}", self.id, self.name)
  }
}
