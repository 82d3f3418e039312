//! Menu state machine and the pages behind each option.
//!
//! Every page either returns the next [`Screen`] or `None` to end the
//! session. Rejections from the core are printed and the menu carries on.

use std::{
  io::{BufRead, Write},
  num::NonZeroU32,
};

use anyhow::Result;
use enrol_api::Session;
use enrol_core::{
  Committed, Confirmation, Error, Key, MAX_UNITS, NewStudent, Plan, Request,
  StudentKind, Unit,
};

use crate::console::Console;

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
  Main,
  /// Signed in as the student with this ID.
  Student(String),
  Admin,
}

/// Who a confirmed plan is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Actor {
  Student,
  Admin,
}

/// Bail out of the current page with `Ok(None)` on end of input.
macro_rules! input {
  ($e:expr) => {
    match $e? {
      Some(value) => value,
      None => return Ok(None),
    }
  };
}

// ─── Menu ─────────────────────────────────────────────────────────────────────

pub struct Menu<R, W> {
  session: Session,
  console: Console<R, W>,
}

impl<R: BufRead, W: Write> Menu<R, W> {
  pub fn new(session: Session, console: Console<R, W>) -> Self {
    Self { session, console }
  }

  pub fn into_parts(self) -> (Session, W) {
    (self.session, self.console.into_output())
  }

  /// Run until the user exits or input ends.
  pub fn run(&mut self) -> Result<()> {
    let mut screen = Screen::Main;
    loop {
      let next = match &screen {
        Screen::Main => self.main_menu()?,
        Screen::Student(id) => self.student_menu(id)?,
        Screen::Admin => self.admin_menu()?,
      };
      match next {
        Some(next) => screen = next,
        None => break,
      }
    }
    self.console.say("Exiting system.")?;
    Ok(())
  }

  // ── Main ──────────────────────────────────────────────────────────────

  fn main_menu(&mut self) -> Result<Option<Screen>> {
    self.console.header("Main Menu")?;
    self
      .console
      .say("\nSelect User Type:\n1. Student\n2. Administrator\n0. Exit")?;
    let choice = input!(self.console.ask("Enter choice: "));

    match choice.as_str() {
      "1" => {
        let id = input!(self.console.ask("Enter Student ID: "));
        if self.session.student_exists(&id) {
          Ok(Some(Screen::Student(id)))
        } else {
          self
            .console
            .say("Student does not exist in the enrollment system.")?;
          Ok(Some(Screen::Main))
        }
      }
      "2" => Ok(Some(Screen::Admin)),
      "0" => Ok(None),
      _ => {
        self.console.say("Invalid choice.")?;
        Ok(Some(Screen::Main))
      }
    }
  }

  // ── Student ───────────────────────────────────────────────────────────

  fn student_menu(&mut self, student_id: &str) -> Result<Option<Screen>> {
    let stay = Some(Screen::Student(student_id.to_owned()));

    self.console.header("Student Menu")?;
    self.console.say(
      "\nStudent Menu:\n1. Add Unit\n2. Remove Unit\n3. List Current Units\n\
       4. Back to Main Menu\n0. Exit",
    )?;
    let choice = input!(self.console.ask("Enter choice: "));

    match choice.as_str() {
      "1" => {
        self.console.header("Student Menu: Add Unit")?;
        self.show_units("Available Units")?;
        let code = input!(self.console.ask("\nEnter Unit Code to Enroll: "));
        input!(self.enroll(Actor::Student, student_id, code));
      }
      "2" => {
        self.console.header("Student Menu: Remove Unit")?;
        if self.show_student_units("Units Enrolled", student_id)? == 0 {
          return Ok(stay);
        }
        let code = input!(self.console.ask("\nEnter Unit Code to Remove: "));
        input!(self.drop_unit(Actor::Student, student_id, code));
      }
      "3" => {
        self.show_student_units("Current Units", student_id)?;
        input!(self.console.pause());
      }
      "4" => return Ok(Some(Screen::Main)),
      "0" => return Ok(None),
      _ => self.console.say("Invalid choice.")?,
    }
    Ok(stay)
  }

  // ── Administrator ─────────────────────────────────────────────────────

  fn admin_menu(&mut self) -> Result<Option<Screen>> {
    self.console.header("Administrator Menu")?;
    self.console.say(
      "\nAdministrator Menu:\n1. Add Student\n2. Remove Student\n3. Add Unit\n\
       4. Remove Unit\n5. List All Students\n6. List All Units\n\
       7. Back to Main Menu\n8. Add Unit to Student\n\
       9. Remove Unit from Student\n10. Find Student\n0. Exit",
    )?;
    let choice = input!(self.console.ask("Enter choice: "));

    match choice.as_str() {
      "1" => input!(self.add_student()),
      "2" => input!(self.remove_student()),
      "3" => input!(self.add_unit()),
      "4" => input!(self.remove_unit()),
      "5" => {
        self.console.header("Admin Menu: List All Students")?;
        self.show_students()?;
        input!(self.console.pause());
      }
      "6" => {
        self.console.header("Admin Menu: List All Units")?;
        self.show_units("Current Units")?;
        input!(self.console.pause());
      }
      "7" => return Ok(Some(Screen::Main)),
      "8" => input!(self.add_unit_to_student()),
      "9" => input!(self.remove_unit_from_student()),
      "10" => input!(self.find_student()),
      "0" => return Ok(None),
      _ => self.console.say("Invalid choice.")?,
    }
    Ok(Some(Screen::Admin))
  }

  fn add_student(&mut self) -> Result<Option<()>> {
    self.console.header("Admin Menu: Add New Student")?;
    let name = input!(self.console.ask("Enter New Student Name: "));
    let id = input!(self.console.ask("Enter New Student ID: "));
    let address = input!(self.console.ask("Enter New Student Address: "));
    let phone = input!(self.console.ask("Enter New Student Phone: "));
    let email = input!(self.console.ask("Enter New Student Email: "));
    let kind = input!(
      self
        .console
        .ask("Enter Type of Student - [F] Full-time or [P] Part-time: ")
    );

    let kind = match kind.to_ascii_uppercase().as_str() {
      "F" => StudentKind::FullTime,
      "P" => {
        let advisor = input!(
          self
            .console
            .ask("Enter Course Advisor (leave blank if none): ")
        );
        StudentKind::PartTime {
          course_advisor: (!advisor.is_empty()).then_some(advisor),
        }
      }
      _ => {
        self.console.say("Invalid option. No student was added.")?;
        return Ok(Some(()));
      }
    };

    let student = NewStudent {
      id: id.clone(),
      name,
      address,
      phone,
      email,
      kind,
    };
    match self.session.submit_add_student(student) {
      Ok(()) => self.console.say(format!("Student '{id}' added successfully."))?,
      Err(e) => self.report(&e)?,
    }
    Ok(Some(()))
  }

  fn remove_student(&mut self) -> Result<Option<()>> {
    self.console.header("Admin Menu: Remove Student")?;
    if self.show_students()? == 0 {
      return Ok(Some(()));
    }
    let id = input!(self.console.ask("\nEnter Student ID to Remove: "));
    self.confirm_and_apply(Actor::Admin, Request::RemoveStudent { student_id: id })
  }

  fn add_unit(&mut self) -> Result<Option<()>> {
    self.console.header("Admin Menu: Add New Unit")?;
    let code = input!(self.console.ask("Enter New Unit Code: "));
    let title = input!(self.console.ask("Enter New Unit Title: "));
    let points = input!(self.console.ask("Enter Credit Points: "));

    let Ok(credit_points) = points.parse::<NonZeroU32>() else {
      self.console.say("Invalid input for credit points.")?;
      return Ok(Some(()));
    };
    let unit = Unit::new(code, title, credit_points);
    self.confirm_and_apply(Actor::Admin, Request::AddUnit { unit })
  }

  fn remove_unit(&mut self) -> Result<Option<()>> {
    self.console.header("Admin Menu: Remove Unit")?;
    self.show_units("Current Units")?;
    let code = input!(self.console.ask("\nEnter Unit Code to Remove: "));
    self.confirm_and_apply(Actor::Admin, Request::RemoveUnit { unit_code: code })
  }

  fn add_unit_to_student(&mut self) -> Result<Option<()>> {
    self.console.header("Admin Menu: Add Unit to Student")?;
    if self.show_students()? == 0 {
      return Ok(Some(()));
    }
    let id = input!(self.console.ask("\nStudent ID: "));
    if !self.session.student_exists(&id) {
      self.console.say("Student not found.")?;
      return Ok(Some(()));
    }
    self.show_units("Available Units")?;
    let code = input!(self.console.ask("\nEnter Unit Code to Enroll: "));
    self.enroll(Actor::Admin, &id, code)
  }

  fn remove_unit_from_student(&mut self) -> Result<Option<()>> {
    self.console.header("Admin Menu: Remove Unit from Student")?;
    if self.show_students()? == 0 {
      return Ok(Some(()));
    }
    let id = input!(self.console.ask("\nEnter Student ID: "));
    if !self.session.student_exists(&id) {
      self.console.say("Student not found.")?;
      return Ok(Some(()));
    }
    if self.show_student_units("Student's Current Units", &id)? == 0 {
      self.console.say("\nThis student is not enrolled in any units.")?;
      return Ok(Some(()));
    }
    let code = input!(self.console.ask("\nEnter Unit Code to Remove: "));
    self.drop_unit(Actor::Admin, &id, code)
  }

  fn find_student(&mut self) -> Result<Option<()>> {
    self.console.header("Admin Menu: Find Student")?;
    let query = input!(self.console.ask("Enter name or ID to search: "));
    let hits = self.session.search_students(&query);
    self.console.list("Matching Students", hits, "No matching students.")?;
    self.console.pause()
  }

  // ── Shared flows ──────────────────────────────────────────────────────

  fn enroll(
    &mut self,
    actor: Actor,
    student_id: &str,
    unit_code: String,
  ) -> Result<Option<()>> {
    self.confirm_and_apply(actor, Request::Enroll {
      student_id: student_id.to_owned(),
      unit_code,
    })
  }

  fn drop_unit(
    &mut self,
    actor: Actor,
    student_id: &str,
    unit_code: String,
  ) -> Result<Option<()>> {
    self.confirm_and_apply(actor, Request::Drop {
      student_id: student_id.to_owned(),
      unit_code,
    })
  }

  /// Validate, ask for confirmation, then commit or cancel.
  fn confirm_and_apply(&mut self, actor: Actor, request: Request) -> Result<Option<()>> {
    let plan = match self.session.validate(request) {
      Ok(plan) => plan,
      Err(e) => {
        self.report(&e)?;
        return Ok(Some(()));
      }
    };

    let answer = input!(self.console.confirm(&format!("Confirm {plan} (Y/N): ")));
    let description = capitalise(&plan);
    let confirmation = Confirmation::from(answer);
    let resolved = match actor {
      Actor::Student => self.session.resolve(plan, confirmation),
      Actor::Admin => self.session.resolve_as_admin(plan, confirmation),
    };
    match resolved {
      Ok(committed) => self.announce(&committed)?,
      Err(Error::Cancelled) => {
        self.console.say(format!("\n{description} cancelled."))?;
      }
      Err(e) => self.report(&e)?,
    }
    Ok(Some(()))
  }

  fn announce(&mut self, committed: &Committed) -> Result<()> {
    match committed {
      Committed::Enrolled { unit, .. } => self
        .console
        .say(format!("\nEnrolled in unit '{}' successfully.", unit.code())),
      Committed::Dropped { unit, .. } => self
        .console
        .say(format!("\nUnit '{}' removed successfully.", unit.code())),
      Committed::StudentRemoved(student) => self
        .console
        .say(format!("Student with ID '{}' has been removed.", student.id())),
      Committed::UnitAdded(unit) => self
        .console
        .say(format!("Unit '{}' added successfully.", unit.code())),
      Committed::UnitRemoved(removal) => {
        self.console.say(format!(
          "Unit '{}' removed successfully.",
          removal.unit.code()
        ))?;
        if !removal.affected.is_empty() {
          self.console.say(format!(
            "Withdrew {} student(s) from the unit: {}",
            removal.affected.len(),
            removal.affected.join(", ")
          ))?;
        }
        Ok(())
      }
    }
  }

  fn report(&mut self, error: &Error) -> Result<()> {
    self.console.say(describe(error))
  }

  // ── Listings ──────────────────────────────────────────────────────────

  fn show_students(&mut self) -> Result<usize> {
    let students = self.session.query_students();
    self.console.list(
      "Current Students",
      students,
      "No students currently enrolled.",
    )
  }

  fn show_units(&mut self, title: &str) -> Result<usize> {
    let units = self.session.query_units();
    self.console.list(title, units, "No units currently available.")
  }

  fn show_student_units(&mut self, title: &str, student_id: &str) -> Result<usize> {
    match self.session.query_student_units(student_id) {
      Ok(units) => self.console.list(title, units, "No units enrolled."),
      Err(e) => {
        self.report(&e)?;
        Ok(0)
      }
    }
  }
}

// ─── Messages ─────────────────────────────────────────────────────────────────

/// User-facing text for a rejected request.
pub fn describe(error: &Error) -> String {
  match error {
    Error::DuplicateKey(Key::Student(id)) => format!(
      "Error: Student ID '{id}' already exists. Cannot add new student with this ID."
    ),
    Error::DuplicateKey(Key::Unit(code)) => format!(
      "Error: Unit code '{code}' already exists. Cannot add new unit with this code."
    ),
    Error::NotFound(Key::Student(_)) => "Student not found.".to_owned(),
    Error::NotFound(Key::Unit(code)) => format!(
      "Error: Unit '{code}' does not exist. Cannot remove a non-existent unit."
    ),
    Error::NotFound(Key::Enrollment { unit_code, .. }) => {
      format!("Student isn't currently enrolled in the unit '{unit_code}'.")
    }
    Error::CapReached { .. } => format!(
      "Student is already enrolled in the maximum number of units ({MAX_UNITS} units)."
    ),
    Error::AlreadyEnrolled { unit_code, .. } => {
      format!("Student is already enrolled in the unit '{unit_code}'.")
    }
    Error::UnitUnavailable(code) => format!("Unit '{code}' not found."),
    Error::Cancelled => "Operation cancelled.".to_owned(),
    // Enrollments are never inserted by key.
    Error::DuplicateKey(key) => format!("Error: {key} already exists."),
  }
}

fn capitalise(plan: &Plan) -> String {
  let text = plan.to_string();
  let mut chars = text.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => text,
  }
}
