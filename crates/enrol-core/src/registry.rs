//! [`EnrollmentRegistry`] — the aggregate that owns every student and unit.
//!
//! All cross-entity mutations go through the registry. It enforces key
//! uniqueness, the enrollment cap and unit availability, and is the only
//! place that builds and commits [`Plan`]s.
//!
//! The registry assumes a single writer. Callers that share one across
//! threads must wrap it in their own lock.

use std::collections::{BTreeMap, btree_map::Entry};

use tracing::{debug, info};

use crate::{
  Error, Key, Result,
  catalogue::{Catalogue, UnitAvailability},
  plan::{Action, Committed, Confirmation, Plan, Request, UnitRemoval},
  student::{NewStudent, Student},
  unit::Unit,
};

#[derive(Debug, Clone, Default)]
pub struct EnrollmentRegistry {
  students: BTreeMap<String, Student>,
  units:    Catalogue,
}

impl EnrollmentRegistry {
  pub fn new() -> Self { Self::default() }

  // ── Reads ─────────────────────────────────────────────────────────────

  pub fn student(&self, student_id: &str) -> Option<&Student> {
    self.students.get(student_id)
  }

  pub fn student_exists(&self, student_id: &str) -> bool {
    self.students.contains_key(student_id)
  }

  /// All students in ID order.
  pub fn students(&self) -> impl ExactSizeIterator<Item = &Student> + '_ {
    self.students.values()
  }

  pub fn unit(&self, unit_code: &str) -> Option<&Unit> { self.units.get(unit_code) }

  /// `true` iff `unit`'s code is registered.
  pub fn is_unit_available(&self, unit: &Unit) -> bool {
    self.units.is_unit_available(unit)
  }

  /// All registered units in code order.
  pub fn units(&self) -> impl ExactSizeIterator<Item = &Unit> + '_ {
    self.units.iter()
  }

  /// The units `student_id` is enrolled in, in code order.
  pub fn list_units_of(&self, student_id: &str) -> Result<Vec<&Unit>> {
    Ok(self.require_student(student_id)?.list_units())
  }

  // ── Students ──────────────────────────────────────────────────────────

  /// Insert a new student. An existing student with the same ID is never
  /// overwritten.
  pub fn add_student(&mut self, input: NewStudent) -> Result<&Student> {
    match self.students.entry(input.id.clone()) {
      Entry::Occupied(e) => {
        debug!(student_id = %e.key(), "duplicate student rejected");
        Err(Error::DuplicateKey(Key::Student(e.key().clone())))
      }
      Entry::Vacant(e) => {
        info!(student_id = %input.id, kind = input.kind.label(), "student added");
        Ok(e.insert(Student::from(input)))
      }
    }
  }

  /// Delete a student together with its enrollment set.
  pub fn remove_student(&mut self, student_id: &str) -> Result<Student> {
    let student = self
      .students
      .remove(student_id)
      .ok_or_else(|| Error::NotFound(Key::Student(student_id.to_owned())))?;
    info!(student_id, "student removed");
    Ok(student)
  }

  /// Set the advisor of a part-time student. Returns `Ok(false)` for a
  /// full-time student.
  pub fn set_course_advisor(
    &mut self,
    student_id: &str,
    advisor: Option<String>,
  ) -> Result<bool> {
    let student = self
      .students
      .get_mut(student_id)
      .ok_or_else(|| Error::NotFound(Key::Student(student_id.to_owned())))?;
    Ok(student.set_course_advisor(advisor))
  }

  // ── Units ─────────────────────────────────────────────────────────────

  pub fn add_unit(&mut self, unit: Unit) -> Result<()> {
    let code = unit.code().to_owned();
    self.units.insert(unit).inspect_err(|e| debug!(unit_code = %code, "{e}"))?;
    info!(unit_code = %code, "unit added");
    Ok(())
  }

  /// Delete a unit and withdraw every student enrolled in it, so no student
  /// ever references an unregistered unit.
  pub fn remove_unit(&mut self, unit_code: &str) -> Result<UnitRemoval> {
    let unit = self.units.remove(unit_code)?;
    let affected: Vec<String> = self
      .students
      .values_mut()
      .filter_map(|s| s.drop(unit_code).ok().map(|_| s.id().to_owned()))
      .collect();
    info!(unit_code, withdrawn = affected.len(), "unit removed");
    Ok(UnitRemoval { unit, affected })
  }

  // ── Enrollment ────────────────────────────────────────────────────────

  /// Enroll `student_id` in `unit`, gated on `confirmation`.
  pub fn enroll_student_in_unit(
    &mut self,
    student_id: &str,
    unit: &Unit,
    confirmation: Confirmation,
  ) -> Result<()> {
    let plan = self.plan_enrollment(student_id, unit)?;
    self.resolve(plan, confirmation).map(|_| ())
  }

  /// Withdraw `student_id` from `unit_code`, gated on `confirmation`.
  pub fn drop_unit_from_student(
    &mut self,
    student_id: &str,
    unit_code: &str,
    confirmation: Confirmation,
  ) -> Result<Unit> {
    let plan = self.validate(Request::Drop {
      student_id: student_id.to_owned(),
      unit_code:  unit_code.to_owned(),
    })?;
    match confirmation {
      Confirmation::Confirmed => self.apply_drop(student_id, unit_code),
      Confirmation::Declined => Err(self.cancel(plan)),
    }
  }

  // ── Two-phase workflow ────────────────────────────────────────────────

  /// Validate `request` against the current state. Nothing is mutated.
  pub fn validate(&self, request: Request) -> Result<Plan> {
    let result = match request {
      Request::Enroll {
        student_id,
        unit_code,
      } => match self.units.get(&unit_code) {
        Some(unit) => self.plan_enrollment(&student_id, unit),
        None => self
          .require_student(&student_id)
          .and(Err(Error::UnitUnavailable(unit_code))),
      },
      Request::Drop {
        student_id,
        unit_code,
      } => {
        let student = self.require_student(&student_id)?;
        if student.is_enrolled(&unit_code) {
          Ok(Plan::new(Action::Drop {
            student_id,
            unit_code,
          }))
        } else {
          Err(Error::NotFound(Key::Enrollment {
            student_id,
            unit_code,
          }))
        }
      }
      Request::RemoveStudent { student_id } => self
        .require_student(&student_id)
        .map(|_| Plan::new(Action::RemoveStudent { student_id })),
      Request::AddUnit { unit } => {
        if self.units.contains(unit.code()) {
          Err(Error::DuplicateKey(Key::Unit(unit.code().to_owned())))
        } else {
          Ok(Plan::new(Action::AddUnit { unit }))
        }
      }
      Request::RemoveUnit { unit_code } => {
        if self.units.contains(&unit_code) {
          Ok(Plan::new(Action::RemoveUnit { unit_code }))
        } else {
          Err(Error::NotFound(Key::Unit(unit_code)))
        }
      }
    };
    if let Err(e) = &result {
      debug!(kind = %e.kind(), "request rejected: {e}");
    }
    result
  }

  /// Validate enrolling `student_id` in a specific unit value.
  pub fn plan_enrollment(&self, student_id: &str, unit: &Unit) -> Result<Plan> {
    let student = self.require_student(student_id)?;
    student.check_enroll(unit, &self.units)?;
    // Enroll the registered copy, not whatever the caller constructed.
    let unit = self
      .units
      .get(unit.code())
      .cloned()
      .ok_or_else(|| Error::UnitUnavailable(unit.code().to_owned()))?;
    Ok(Plan::new(Action::Enroll {
      student_id: student_id.to_owned(),
      unit,
    }))
  }

  /// Apply a validated plan.
  ///
  /// Every precondition is checked again, so a plan that went stale since
  /// validation fails with the same error validation would now give.
  pub fn commit(&mut self, plan: Plan) -> Result<Committed> {
    let committed = match plan.action {
      Action::Enroll { student_id, unit } => {
        let Self { students, units } = self;
        let student = students
          .get_mut(&student_id)
          .ok_or_else(|| Error::NotFound(Key::Student(student_id.clone())))?;
        // The unit may have been replaced under the same code since
        // validation; enroll whatever is registered now.
        let unit = units
          .get(unit.code())
          .cloned()
          .ok_or_else(|| Error::UnitUnavailable(unit.code().to_owned()))?;
        student.enroll(&unit, &*units)?;
        info!(%student_id, unit_code = %unit.code(), "enrolled");
        Committed::Enrolled { student_id, unit }
      }
      Action::Drop {
        student_id,
        unit_code,
      } => {
        let unit = self.apply_drop(&student_id, &unit_code)?;
        Committed::Dropped { student_id, unit }
      }
      Action::RemoveStudent { student_id } => {
        Committed::StudentRemoved(self.remove_student(&student_id)?)
      }
      Action::AddUnit { unit } => {
        self.add_unit(unit.clone())?;
        Committed::UnitAdded(unit)
      }
      Action::RemoveUnit { unit_code } => {
        Committed::UnitRemoved(self.remove_unit(&unit_code)?)
      }
    };
    Ok(committed)
  }

  /// Discard a plan. Always yields [`Error::Cancelled`].
  pub fn cancel(&self, plan: Plan) -> Error {
    debug!(
      op = plan.op(),
      student_id = plan.student_id(),
      unit_code = plan.unit_code(),
      "cancelled"
    );
    Error::Cancelled
  }

  /// Commit on [`Confirmation::Confirmed`], cancel otherwise.
  pub fn resolve(&mut self, plan: Plan, confirmation: Confirmation) -> Result<Committed> {
    match confirmation {
      Confirmation::Confirmed => self.commit(plan),
      Confirmation::Declined => Err(self.cancel(plan)),
    }
  }

  // ── Helpers ───────────────────────────────────────────────────────────

  fn apply_drop(&mut self, student_id: &str, unit_code: &str) -> Result<Unit> {
    let unit = self
      .students
      .get_mut(student_id)
      .ok_or_else(|| Error::NotFound(Key::Student(student_id.to_owned())))?
      .drop(unit_code)?;
    info!(student_id, unit_code, "dropped");
    Ok(unit)
  }

  fn require_student(&self, student_id: &str) -> Result<&Student> {
    self
      .students
      .get(student_id)
      .ok_or_else(|| Error::NotFound(Key::Student(student_id.to_owned())))
  }
}

impl UnitAvailability for EnrollmentRegistry {
  fn is_unit_available(&self, unit: &Unit) -> bool {
    EnrollmentRegistry::is_unit_available(self, unit)
  }
}
