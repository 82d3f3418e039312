//! Two-phase mutations: validate a [`Request`] into a [`Plan`], then commit
//! or cancel it.
//!
//! ```text
//! Request ──validate──▶ Plan ──commit──▶ Committed
//!    │                    └───cancel──▶ Error::Cancelled
//!    └── rejection (Error)
//! ```
//!
//! Plans carry no borrow of the registry, so the caller may prompt the user
//! between the two phases. A plan is re-checked when committed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{student::Student, unit::Unit};

// ─── Request ─────────────────────────────────────────────────────────────────

/// A confirmation-gated mutation as submitted by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
  Enroll {
    student_id: String,
    unit_code:  String,
  },
  Drop {
    student_id: String,
    unit_code:  String,
  },
  RemoveStudent {
    student_id: String,
  },
  AddUnit {
    unit: Unit,
  },
  RemoveUnit {
    unit_code: String,
  },
}

// ─── Plan ────────────────────────────────────────────────────────────────────

/// A request that passed validation and awaits confirmation.
///
/// Only [`crate::registry::EnrollmentRegistry`] can build one.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a plan does nothing until it is committed or cancelled"]
pub struct Plan {
  pub(crate) action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub(crate) enum Action {
  Enroll { student_id: String, unit: Unit },
  Drop { student_id: String, unit_code: String },
  RemoveStudent { student_id: String },
  AddUnit { unit: Unit },
  RemoveUnit { unit_code: String },
}

impl Plan {
  pub(crate) fn new(action: Action) -> Self { Self { action } }

  /// Machine name of the planned operation, e.g. `drop` or `remove_unit`.
  pub fn op(&self) -> &'static str { (&self.action).into() }

  /// The student the plan touches, if any.
  pub fn student_id(&self) -> Option<&str> {
    match &self.action {
      Action::Enroll { student_id, .. }
      | Action::Drop { student_id, .. }
      | Action::RemoveStudent { student_id } => Some(student_id),
      Action::AddUnit { .. } | Action::RemoveUnit { .. } => None,
    }
  }

  /// The unit code the plan touches, if any.
  pub fn unit_code(&self) -> Option<&str> {
    match &self.action {
      Action::Enroll { unit, .. } | Action::AddUnit { unit } => Some(unit.code()),
      Action::Drop { unit_code, .. } | Action::RemoveUnit { unit_code } => {
        Some(unit_code)
      }
      Action::RemoveStudent { .. } => None,
    }
  }
}

/// Noun phrase for a confirmation prompt, e.g. `enrollment in unit 'FIT5136'`.
impl fmt::Display for Plan {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.action {
      Action::Enroll { unit, .. } => {
        write!(f, "enrollment in unit '{}'", unit.code())
      }
      Action::Drop { unit_code, .. } | Action::RemoveUnit { unit_code } => {
        write!(f, "removal of unit '{unit_code}'")
      }
      Action::RemoveStudent { student_id } => {
        write!(f, "removal of student '{student_id}'")
      }
      Action::AddUnit { unit } => write!(f, "creation of unit '{}'", unit.code()),
    }
  }
}

// ─── Confirmation ────────────────────────────────────────────────────────────

/// The caller's answer to a [`Plan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confirmation {
  Confirmed,
  Declined,
}

impl From<bool> for Confirmation {
  fn from(confirmed: bool) -> Self {
    if confirmed { Self::Confirmed } else { Self::Declined }
  }
}

// ─── Outcome ─────────────────────────────────────────────────────────────────

/// What a committed plan changed.
#[derive(Debug, Clone)]
pub enum Committed {
  Enrolled { student_id: String, unit: Unit },
  Dropped { student_id: String, unit: Unit },
  StudentRemoved(Student),
  UnitAdded(Unit),
  UnitRemoved(UnitRemoval),
}

/// Result of removing a unit from the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitRemoval {
  pub unit:     Unit,
  /// Students whose enrollment in the unit was removed along with it, in ID
  /// order.
  pub affected: Vec<String>,
}
