//! Request/response boundary over the enrolment core.
//!
//! A [`Session`] owns one [`EnrollmentRegistry`] and the [`Administrator`]
//! acting on it for the lifetime of one interactive session. Presentation
//! layers talk to the session only; every rejection comes back as an
//! [`Error`] whose [`Error::kind`] names the outcome.
//!
//! | Operation                 | Outcomes |
//! |---------------------------|----------|
//! | `submit_add_student`      | ok, `DuplicateKey` |
//! | `submit_remove_student`   | ok, `NotFound` |
//! | `submit_add_unit`         | ok, `DuplicateKey` |
//! | `submit_remove_unit`      | ok (withdrawn students), `NotFound` |
//! | `submit_enroll`           | ok, `NotFound`, `AlreadyEnrolled`, `CapReached`, `UnitUnavailable`, `Cancelled` |
//! | `submit_drop`             | ok, `NotFound`, `Cancelled` |
//! | `query_student_units`     | unit summaries, `NotFound` |

pub mod search;
pub mod summary;

use std::num::NonZeroU32;

use enrol_core::{
  Administrator, Committed, Confirmation, EnrollmentRegistry, NewStudent, Plan,
  Request, Unit,
};
use tracing::debug;

pub use enrol_core::{Error, ErrorKind, Result};
pub use summary::{KindTag, StudentSummary, UnitSummary};

#[derive(Debug)]
pub struct Session {
  registry: EnrollmentRegistry,
  admin:    Administrator,
}

impl Session {
  /// Start a session with an empty registry.
  pub fn new(admin: Administrator) -> Self {
    Self {
      registry: EnrollmentRegistry::new(),
      admin,
    }
  }

  /// Start a session over an existing registry.
  pub fn with_registry(admin: Administrator, registry: EnrollmentRegistry) -> Self {
    Self { registry, admin }
  }

  pub fn registry(&self) -> &EnrollmentRegistry { &self.registry }

  pub fn admin(&self) -> &Administrator { &self.admin }

  // ── Mutations ─────────────────────────────────────────────────────────

  pub fn submit_add_student(&mut self, student: NewStudent) -> Result<()> {
    self.admin.add_student(&mut self.registry, student)
  }

  pub fn submit_remove_student(&mut self, student_id: &str) -> Result<()> {
    self
      .admin
      .remove_student(&mut self.registry, student_id)
      .map(|_| ())
  }

  pub fn submit_add_unit(
    &mut self,
    code: &str,
    title: &str,
    credit_points: NonZeroU32,
  ) -> Result<()> {
    self
      .admin
      .add_unit(&mut self.registry, Unit::new(code, title, credit_points))
  }

  /// Remove a unit; returns the IDs of students who were withdrawn from it.
  pub fn submit_remove_unit(&mut self, unit_code: &str) -> Result<Vec<String>> {
    self
      .admin
      .remove_unit(&mut self.registry, unit_code)
      .map(|r| r.affected)
  }

  /// Enroll a student in a registered unit. With `confirmed = false` the
  /// request is validated and then cancelled, never committed.
  pub fn submit_enroll(
    &mut self,
    student_id: &str,
    unit_code: &str,
    confirmed: bool,
  ) -> Result<()> {
    let plan = self.registry.validate(Request::Enroll {
      student_id: student_id.to_owned(),
      unit_code:  unit_code.to_owned(),
    })?;
    self.resolve(plan, confirmed.into()).map(|_| ())
  }

  pub fn submit_drop(
    &mut self,
    student_id: &str,
    unit_code: &str,
    confirmed: bool,
  ) -> Result<()> {
    self
      .admin
      .remove_unit_from_student(
        &mut self.registry,
        student_id,
        unit_code,
        confirmed.into(),
      )
      .map(|_| ())
  }

  pub fn set_course_advisor(
    &mut self,
    student_id: &str,
    advisor: Option<String>,
  ) -> Result<bool> {
    self.registry.set_course_advisor(student_id, advisor)
  }

  // ── Two-phase access ──────────────────────────────────────────────────

  /// Validate a request; the returned plan can be shown to the user before
  /// [`Session::resolve`] is called with their answer.
  pub fn validate(&self, request: Request) -> Result<Plan> {
    self.registry.validate(request)
  }

  /// Resolve a plan the signed-in student asked for.
  pub fn resolve(&mut self, plan: Plan, confirmation: Confirmation) -> Result<Committed> {
    debug!(%plan, ?confirmation, "resolving plan");
    self.registry.resolve(plan, confirmation)
  }

  /// Resolve a plan the administrator asked for, attributed to them.
  pub fn resolve_as_admin(
    &mut self,
    plan: Plan,
    confirmation: Confirmation,
  ) -> Result<Committed> {
    debug!(%plan, ?confirmation, admin = self.admin.name(), "resolving plan");
    self.admin.resolve(&mut self.registry, plan, confirmation)
  }

  // ── Queries ───────────────────────────────────────────────────────────

  pub fn student_exists(&self, student_id: &str) -> bool {
    self.registry.student_exists(student_id)
  }

  /// All students in ID order.
  pub fn query_students(&self) -> Vec<StudentSummary> {
    self.registry.students().map(StudentSummary::from).collect()
  }

  /// All registered units in code order.
  pub fn query_units(&self) -> Vec<UnitSummary> {
    self.registry.units().map(UnitSummary::from).collect()
  }

  pub fn query_student(&self, student_id: &str) -> Option<StudentSummary> {
    self.registry.student(student_id).map(StudentSummary::from)
  }

  pub fn query_student_units(&self, student_id: &str) -> Result<Vec<UnitSummary>> {
    Ok(
      self
        .registry
        .list_units_of(student_id)?
        .into_iter()
        .map(UnitSummary::from)
        .collect(),
    )
  }

  /// Fuzzy search over student names and IDs, best match first.
  pub fn search_students(&self, query: &str) -> Vec<StudentSummary> {
    search::search(self.registry.students(), query)
      .into_iter()
      .map(StudentSummary::from)
      .collect()
  }
}
