//! Administrator — a privileged actor acting on a registry it is handed.
//!
//! Holds no state beyond its name. Every check lives in
//! [`EnrollmentRegistry`]; these methods only forward and attribute the action
//! in the log.

use tracing::info_span;

use crate::{
  Result,
  plan::{Committed, Confirmation, Plan, UnitRemoval},
  registry::EnrollmentRegistry,
  student::Student,
  student::NewStudent,
  unit::Unit,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Administrator {
  name: String,
}

impl Administrator {
  pub fn new(name: impl Into<String>) -> Self { Self { name: name.into() } }

  pub fn name(&self) -> &str { &self.name }

  pub fn add_student(
    &self,
    registry: &mut EnrollmentRegistry,
    student: NewStudent,
  ) -> Result<()> {
    let _span = info_span!("admin", admin = %self.name).entered();
    registry.add_student(student).map(|_| ())
  }

  pub fn remove_student(
    &self,
    registry: &mut EnrollmentRegistry,
    student_id: &str,
  ) -> Result<Student> {
    let _span = info_span!("admin", admin = %self.name).entered();
    registry.remove_student(student_id)
  }

  pub fn add_unit(&self, registry: &mut EnrollmentRegistry, unit: Unit) -> Result<()> {
    let _span = info_span!("admin", admin = %self.name).entered();
    registry.add_unit(unit)
  }

  pub fn remove_unit(
    &self,
    registry: &mut EnrollmentRegistry,
    unit_code: &str,
  ) -> Result<UnitRemoval> {
    let _span = info_span!("admin", admin = %self.name).entered();
    registry.remove_unit(unit_code)
  }

  pub fn add_unit_to_student(
    &self,
    registry: &mut EnrollmentRegistry,
    student_id: &str,
    unit: &Unit,
    confirmation: Confirmation,
  ) -> Result<()> {
    let _span = info_span!("admin", admin = %self.name).entered();
    registry.enroll_student_in_unit(student_id, unit, confirmation)
  }

  pub fn remove_unit_from_student(
    &self,
    registry: &mut EnrollmentRegistry,
    student_id: &str,
    unit_code: &str,
    confirmation: Confirmation,
  ) -> Result<Unit> {
    let _span = info_span!("admin", admin = %self.name).entered();
    registry.drop_unit_from_student(student_id, unit_code, confirmation)
  }

  /// Commit or cancel a plan validated on the administrator's behalf.
  pub fn resolve(
    &self,
    registry: &mut EnrollmentRegistry,
    plan: Plan,
    confirmation: Confirmation,
  ) -> Result<Committed> {
    let _span = info_span!("admin", admin = %self.name).entered();
    registry.resolve(plan, confirmation)
  }
}
