//! Property tests for registry invariants under random operation sequences.

use std::num::NonZeroU32;

use enrol_core::{
  Confirmation, EnrollmentRegistry, ErrorKind, MAX_UNITS, NewStudent, Request,
  StudentKind, Unit,
};
use proptest::prelude::*;

const STUDENTS: [&str; 3] = ["s1", "s2", "s3"];
/// The last two codes are never registered.
const CODES: [&str; 8] = ["U1", "U2", "U3", "U4", "U5", "U6", "X1", "X2"];

#[derive(Debug, Clone)]
enum Op {
  Enroll { student: usize, unit: usize, confirmed: bool },
  Drop { student: usize, unit: usize, confirmed: bool },
  RemoveUnit { unit: usize },
}

fn op() -> impl Strategy<Value = Op> {
  prop_oneof![
    4 => (0..STUDENTS.len(), 0..CODES.len(), any::<bool>())
      .prop_map(|(student, unit, confirmed)| Op::Enroll { student, unit, confirmed }),
    2 => (0..STUDENTS.len(), 0..CODES.len(), any::<bool>())
      .prop_map(|(student, unit, confirmed)| Op::Drop { student, unit, confirmed }),
    1 => (0..CODES.len()).prop_map(|unit| Op::RemoveUnit { unit }),
  ]
}

fn seeded() -> EnrollmentRegistry {
  let mut r = EnrollmentRegistry::new();
  for code in &CODES[..6] {
    r.add_unit(Unit::new(*code, "Unit", NonZeroU32::MIN)).unwrap();
  }
  for id in STUDENTS {
    r.add_student(NewStudent::new(id, id, StudentKind::FullTime))
      .unwrap();
  }
  r
}

fn snapshot(r: &EnrollmentRegistry) -> Vec<(String, Vec<String>)> {
  r.students()
    .map(|s| {
      (
        s.id().to_owned(),
        s.units().map(|u| u.code().to_owned()).collect(),
      )
    })
    .collect()
}

proptest! {
  #![proptest_config(ProptestConfig {
    cases: 256,
    .. ProptestConfig::default()
  })]

  /// PROPERTY: no student ever holds more than the cap, and every enrolled
  /// unit is registered.
  #[test]
  fn cap_and_availability_hold_after_every_op(ops in proptest::collection::vec(op(), 0..64)) {
    let mut r = seeded();
    for op in ops {
      let _ = match op {
        Op::Enroll { student, unit, confirmed } => r
          .validate(Request::Enroll {
            student_id: STUDENTS[student].into(),
            unit_code: CODES[unit].into(),
          })
          .and_then(|plan| r.resolve(plan, Confirmation::from(confirmed)))
          .map(|_| ()),
        Op::Drop { student, unit, confirmed } => r
          .drop_unit_from_student(STUDENTS[student], CODES[unit], confirmed.into())
          .map(|_| ()),
        Op::RemoveUnit { unit } => r.remove_unit(CODES[unit]).map(|_| ()),
      };

      for s in r.students() {
        prop_assert!(s.unit_count() <= MAX_UNITS);
        for u in s.units() {
          prop_assert!(r.is_unit_available(u));
        }
      }
    }
  }

  /// PROPERTY: a declined or rejected enroll leaves every student unchanged.
  #[test]
  fn failed_or_declined_enroll_never_mutates(
    ops in proptest::collection::vec(op(), 0..32),
    student in 0..STUDENTS.len(),
    unit in 0..CODES.len(),
    confirmed in any::<bool>(),
  ) {
    let mut r = seeded();
    for op in ops {
      if let Op::Enroll { student, unit, .. } = op {
        let _ = r.validate(Request::Enroll {
          student_id: STUDENTS[student].into(),
          unit_code: CODES[unit].into(),
        })
        .and_then(|plan| r.commit(plan));
      }
    }

    let before = snapshot(&r);
    let result = r
      .validate(Request::Enroll {
        student_id: STUDENTS[student].into(),
        unit_code: CODES[unit].into(),
      })
      .and_then(|plan| r.resolve(plan, Confirmation::from(confirmed)));

    match result {
      Ok(_) => prop_assert!(confirmed),
      Err(e) => {
        if CODES[unit].starts_with('X') {
          prop_assert_eq!(e.kind(), ErrorKind::UnitUnavailable);
        }
        prop_assert_eq!(snapshot(&r), before);
      }
    }
  }
}
