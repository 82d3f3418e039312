//! Student — an enrollment participant and the units it is enrolled in.
//!
//! Full-time and part-time students behave identically; the kind only decides
//! which extra attributes are attached (a part-time student may have a course
//! advisor).

use std::{collections::BTreeMap, fmt};

use serde::Serialize;
use tracing::debug;

use crate::{Error, Key, Result, catalogue::UnitAvailability, unit::Unit};

/// The most units a student may be enrolled in at once.
pub const MAX_UNITS: usize = 4;

// ─── Kind ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StudentKind {
  #[default]
  FullTime,
  PartTime {
    course_advisor: Option<String>,
  },
}

impl StudentKind {
  /// A part-time kind with no advisor assigned yet.
  pub fn part_time() -> Self { Self::PartTime { course_advisor: None } }

  pub fn is_part_time(&self) -> bool { matches!(self, Self::PartTime { .. }) }

  /// Human-readable label, e.g. for listings.
  pub fn label(&self) -> &'static str {
    match self {
      Self::FullTime => "Full-time",
      Self::PartTime { .. } => "Part-time",
    }
  }
}

// ─── NewStudent ──────────────────────────────────────────────────────────────

/// Input to [`crate::registry::EnrollmentRegistry::add_student`].
///
/// Contact fields are opaque strings; no format is checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewStudent {
  pub id:      String,
  pub name:    String,
  pub address: String,
  pub phone:   String,
  pub email:   String,
  pub kind:    StudentKind,
}

impl NewStudent {
  /// Convenience constructor with empty contact details.
  pub fn new(
    id: impl Into<String>,
    name: impl Into<String>,
    kind: StudentKind,
  ) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
      address: String::new(),
      phone: String::new(),
      email: String::new(),
      kind,
    }
  }
}

// ─── Student ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Student {
  id:      String,
  name:    String,
  address: String,
  phone:   String,
  email:   String,
  kind:    StudentKind,
  /// Keyed by unit code so membership is unique by code.
  units:   BTreeMap<String, Unit>,
}

impl From<NewStudent> for Student {
  fn from(input: NewStudent) -> Self {
    Self {
      id:      input.id,
      name:    input.name,
      address: input.address,
      phone:   input.phone,
      email:   input.email,
      kind:    input.kind,
      units:   BTreeMap::new(),
    }
  }
}

impl Student {
  pub fn id(&self) -> &str { &self.id }

  pub fn name(&self) -> &str { &self.name }

  pub fn address(&self) -> &str { &self.address }

  pub fn phone(&self) -> &str { &self.phone }

  pub fn email(&self) -> &str { &self.email }

  pub fn kind(&self) -> &StudentKind { &self.kind }

  /// The advisor of a part-time student; always `None` for full-time.
  pub fn course_advisor(&self) -> Option<&str> {
    match &self.kind {
      StudentKind::PartTime { course_advisor } => course_advisor.as_deref(),
      StudentKind::FullTime => None,
    }
  }

  /// Assign (or clear) the course advisor. Returns `false` and changes
  /// nothing if the student is full-time.
  pub fn set_course_advisor(&mut self, advisor: Option<String>) -> bool {
    match &mut self.kind {
      StudentKind::PartTime { course_advisor } => {
        *course_advisor = advisor;
        true
      }
      StudentKind::FullTime => false,
    }
  }

  /// Enrolled units in code order.
  pub fn units(&self) -> impl ExactSizeIterator<Item = &Unit> + '_ {
    self.units.values()
  }

  pub fn unit_count(&self) -> usize { self.units.len() }

  pub fn is_enrolled(&self, unit_code: &str) -> bool {
    self.units.contains_key(unit_code)
  }

  pub fn is_at_cap(&self) -> bool { self.units.len() >= MAX_UNITS }

  /// Check every enrollment precondition without mutating.
  ///
  /// Checks run in a fixed order: availability, duplicate membership, cap.
  pub fn check_enroll(
    &self,
    unit: &Unit,
    catalogue: &impl UnitAvailability,
  ) -> Result<()> {
    if !catalogue.is_unit_available(unit) {
      return Err(Error::UnitUnavailable(unit.code().to_owned()));
    }
    if self.is_enrolled(unit.code()) {
      return Err(Error::AlreadyEnrolled {
        student_id: self.id.clone(),
        unit_code:  unit.code().to_owned(),
      });
    }
    if self.is_at_cap() {
      return Err(Error::CapReached {
        student_id: self.id.clone(),
        cap:        MAX_UNITS,
      });
    }
    Ok(())
  }

  /// Add `unit` to the enrollment set. On any failed precondition the set is
  /// left untouched.
  pub fn enroll(
    &mut self,
    unit: &Unit,
    catalogue: &impl UnitAvailability,
  ) -> Result<()> {
    if let Err(e) = self.check_enroll(unit, catalogue) {
      debug!(student_id = %self.id, unit_code = %unit.code(), "enroll rejected: {e}");
      return Err(e);
    }
    self.units.insert(unit.code().to_owned(), unit.clone());
    Ok(())
  }

  /// Remove the unit with `unit_code` and return it.
  pub fn drop(&mut self, unit_code: &str) -> Result<Unit> {
    self.units.remove(unit_code).ok_or_else(|| {
      Error::NotFound(Key::Enrollment {
        student_id: self.id.clone(),
        unit_code:  unit_code.to_owned(),
      })
    })
  }

  /// Snapshot of the enrolled units for display. An empty vector means the
  /// student has no units.
  pub fn list_units(&self) -> Vec<&Unit> { self.units.values().collect() }
}

/// `123123 - John Lee`
impl fmt::Display for Student {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} - {}", self.id, self.name)
  }
}
