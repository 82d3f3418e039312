//! Behavioural tests for the registry, students and the plan workflow.

use std::num::NonZeroU32;

use crate::{
  Administrator, Committed, Confirmation, EnrollmentRegistry, Error, ErrorKind,
  Key, MAX_UNITS, NewStudent, Request, StudentKind, Unit, UnitAvailability,
};

fn unit(code: &str, title: &str, credit_points: u32) -> Unit {
  Unit::new(code, title, NonZeroU32::new(credit_points).expect("non-zero"))
}

fn john() -> NewStudent {
  NewStudent {
    id:      "123123".into(),
    name:    "John Lee".into(),
    address: "123 Fake Street".into(),
    phone:   "1111111111".into(),
    email:   "JohnLee@fakestreet.com".into(),
    kind:    StudentKind::FullTime,
  }
}

/// A registry holding FIT5136 and John Lee.
fn registry() -> EnrollmentRegistry {
  let mut r = EnrollmentRegistry::new();
  r.add_unit(unit("FIT5136", "Software Engineering", 6)).unwrap();
  r.add_student(john()).unwrap();
  r
}

fn codes(r: &EnrollmentRegistry, student_id: &str) -> Vec<String> {
  r.list_units_of(student_id)
    .unwrap()
    .into_iter()
    .map(|u| u.code().to_owned())
    .collect()
}

// ─── Unit ────────────────────────────────────────────────────────────────────

#[test]
fn unit_display_format() {
  let u = unit("FIT5136", "Software Engineering", 6);
  assert_eq!(u.to_string(), "FIT5136 - Software Engineering (6 credit points)");
  assert_eq!(u.code(), "FIT5136");
  assert_eq!(u.title(), "Software Engineering");
  assert_eq!(u.credit_points().get(), 6);
}

#[test]
fn unit_equality_is_by_code() {
  assert_eq!(unit("FIT1000", "A", 6), unit("FIT1000", "B", 12));
  assert_ne!(unit("FIT1000", "A", 6), unit("FIT2000", "A", 6));
}

// ─── Students ────────────────────────────────────────────────────────────────

#[test]
fn student_display_format() {
  let r = registry();
  assert_eq!(r.student("123123").unwrap().to_string(), "123123 - John Lee");
}

#[test]
fn duplicate_student_is_rejected_without_overwrite() {
  let mut r = registry();
  let mut imposter = john();
  imposter.name = "Someone Else".into();

  let err = r.add_student(imposter).unwrap_err();
  assert_eq!(err, Error::DuplicateKey(Key::Student("123123".into())));
  assert_eq!(r.student("123123").unwrap().name(), "John Lee");
  assert_eq!(r.students().len(), 1);
}

#[test]
fn remove_missing_student_is_not_found() {
  let mut r = registry();
  let err = r.remove_student("999999").unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);
  assert_eq!(r.students().len(), 1);
}

#[test]
fn remove_student_discards_enrollments() {
  let mut r = registry();
  r.enroll_student_in_unit("123123", &unit("FIT5136", "", 6), Confirmation::Confirmed)
    .unwrap();

  let removed = r.remove_student("123123").unwrap();
  assert_eq!(removed.unit_count(), 1);
  assert!(!r.student_exists("123123"));

  // The ID is free again and the new student starts empty.
  r.add_student(john()).unwrap();
  assert!(codes(&r, "123123").is_empty());
}

#[test]
fn course_advisor_only_applies_to_part_time() {
  let mut r = registry();
  r.add_student(NewStudent::new("555", "Pat", StudentKind::part_time()))
    .unwrap();

  assert!(r.set_course_advisor("555", Some("Dr Smith".into())).unwrap());
  assert_eq!(r.student("555").unwrap().course_advisor(), Some("Dr Smith"));

  assert!(!r.set_course_advisor("123123", Some("Dr Smith".into())).unwrap());
  assert_eq!(r.student("123123").unwrap().course_advisor(), None);

  assert!(r.set_course_advisor("555", None).unwrap());
  assert_eq!(r.student("555").unwrap().course_advisor(), None);
}

// ─── Units ───────────────────────────────────────────────────────────────────

#[test]
fn duplicate_unit_is_rejected_without_overwrite() {
  let mut r = registry();
  let err = r.add_unit(unit("FIT5136", "Other Title", 12)).unwrap_err();
  assert_eq!(err, Error::DuplicateKey(Key::Unit("FIT5136".into())));
  assert_eq!(r.unit("FIT5136").unwrap().title(), "Software Engineering");
}

#[test]
fn remove_missing_unit_is_not_found() {
  let mut r = registry();
  assert_eq!(
    r.remove_unit("NOPE").unwrap_err(),
    Error::NotFound(Key::Unit("NOPE".into()))
  );
}

#[test]
fn remove_unit_withdraws_enrolled_students() {
  let mut r = registry();
  r.add_student(NewStudent::new("200", "Ann", StudentKind::FullTime))
    .unwrap();
  r.add_student(NewStudent::new("300", "Bob", StudentKind::FullTime))
    .unwrap();
  let se = unit("FIT5136", "Software Engineering", 6);
  r.enroll_student_in_unit("123123", &se, Confirmation::Confirmed).unwrap();
  r.enroll_student_in_unit("300", &se, Confirmation::Confirmed).unwrap();

  let removal = r.remove_unit("FIT5136").unwrap();
  assert_eq!(removal.unit.code(), "FIT5136");
  assert_eq!(removal.affected, vec!["123123".to_owned(), "300".to_owned()]);
  assert!(r.students().all(|s| s.unit_count() == 0));
  assert!(!r.is_unit_available(&se));
}

#[test]
fn availability_is_by_code() {
  let r = registry();
  assert!(r.is_unit_available(&unit("FIT5136", "Different", 1)));
  assert!(!r.is_unit_available(&unit("FIT9999", "Software Engineering", 6)));
  // The trait view agrees with the inherent method.
  assert!(UnitAvailability::is_unit_available(&r, &unit("FIT5136", "", 6)));
}

// ─── Enrollment ──────────────────────────────────────────────────────────────

#[test]
fn enroll_then_drop_scenario() {
  let mut r = registry();
  r.enroll_student_in_unit(
    "123123",
    &unit("FIT5136", "Software Engineering", 6),
    Confirmation::Confirmed,
  )
  .unwrap();
  let listed: Vec<String> = r
    .list_units_of("123123")
    .unwrap()
    .iter()
    .map(ToString::to_string)
    .collect();
  assert_eq!(listed, vec!["FIT5136 - Software Engineering (6 credit points)"]);

  let dropped = r
    .drop_unit_from_student("123123", "FIT5136", Confirmation::Confirmed)
    .unwrap();
  assert_eq!(dropped.code(), "FIT5136");
  assert!(codes(&r, "123123").is_empty());
}

#[test]
fn enroll_unregistered_unit_is_unavailable() {
  let mut r = registry();
  let err = r
    .enroll_student_in_unit(
      "123123",
      &unit("FIT9999", "Ghost", 6),
      Confirmation::Confirmed,
    )
    .unwrap_err();
  assert_eq!(err, Error::UnitUnavailable("FIT9999".into()));
  assert!(codes(&r, "123123").is_empty());
}

#[test]
fn enroll_twice_is_already_enrolled() {
  let mut r = registry();
  let se = unit("FIT5136", "Software Engineering", 6);
  r.enroll_student_in_unit("123123", &se, Confirmation::Confirmed).unwrap();

  let err = r
    .enroll_student_in_unit("123123", &se, Confirmation::Confirmed)
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::AlreadyEnrolled);
  assert_eq!(codes(&r, "123123"), vec!["FIT5136"]);
}

#[test]
fn fifth_unit_hits_the_cap() {
  let mut r = registry();
  for code in ["FIT1001", "FIT1002", "FIT1003", "FIT1004", "FIT1005"] {
    r.add_unit(unit(code, "Elective", 6)).unwrap();
  }
  for code in ["FIT1001", "FIT1002", "FIT1003", "FIT1004"] {
    r.enroll_student_in_unit("123123", &unit(code, "", 6), Confirmation::Confirmed)
      .unwrap();
  }

  let err = r
    .enroll_student_in_unit(
      "123123",
      &unit("FIT1005", "", 6),
      Confirmation::Confirmed,
    )
    .unwrap_err();
  assert_eq!(
    err,
    Error::CapReached {
      student_id: "123123".into(),
      cap:        MAX_UNITS,
    }
  );
  assert_eq!(r.student("123123").unwrap().unit_count(), MAX_UNITS);
}

#[test]
fn enroll_unknown_student_is_not_found() {
  let mut r = registry();
  let err = r
    .enroll_student_in_unit("nobody", &unit("FIT5136", "", 6), Confirmation::Confirmed)
    .unwrap_err();
  assert_eq!(err, Error::NotFound(Key::Student("nobody".into())));
}

#[test]
fn declined_enroll_does_not_mutate() {
  let mut r = registry();
  let err = r
    .enroll_student_in_unit("123123", &unit("FIT5136", "", 6), Confirmation::Declined)
    .unwrap_err();
  assert!(err.is_cancelled());
  assert!(codes(&r, "123123").is_empty());
}

#[test]
fn drop_unenrolled_unit_is_not_found() {
  let mut r = registry();
  let err = r
    .drop_unit_from_student("123123", "FIT5136", Confirmation::Confirmed)
    .unwrap_err();
  assert_eq!(
    err,
    Error::NotFound(Key::Enrollment {
      student_id: "123123".into(),
      unit_code:  "FIT5136".into(),
    })
  );
}

#[test]
fn declined_drop_keeps_the_unit() {
  let mut r = registry();
  r.enroll_student_in_unit("123123", &unit("FIT5136", "", 6), Confirmation::Confirmed)
    .unwrap();
  let err = r
    .drop_unit_from_student("123123", "FIT5136", Confirmation::Declined)
    .unwrap_err();
  assert_eq!(err, Error::Cancelled);
  assert_eq!(codes(&r, "123123"), vec!["FIT5136"]);
}

#[test]
fn list_units_of_unknown_student_is_not_found() {
  let r = registry();
  assert_eq!(r.list_units_of("42").unwrap_err().kind(), ErrorKind::NotFound);
}

// ─── Plans ───────────────────────────────────────────────────────────────────

#[test]
fn plans_describe_themselves() {
  let r = registry();
  let plan = r
    .validate(Request::Enroll {
      student_id: "123123".into(),
      unit_code:  "FIT5136".into(),
    })
    .unwrap();
  assert_eq!(plan.to_string(), "enrollment in unit 'FIT5136'");
  assert_eq!(plan.student_id(), Some("123123"));
  assert_eq!(plan.unit_code(), Some("FIT5136"));

  let plan = r
    .validate(Request::RemoveStudent {
      student_id: "123123".into(),
    })
    .unwrap();
  assert_eq!(plan.to_string(), "removal of student '123123'");

  let plan = r
    .validate(Request::AddUnit {
      unit: unit("FIT2004", "Algorithms", 6),
    })
    .unwrap();
  assert_eq!(plan.to_string(), "creation of unit 'FIT2004'");
  assert_eq!(plan.op(), "add_unit");
}

#[test]
fn drop_and_unit_removal_plans_have_distinct_ops() {
  let mut r = registry();
  r.enroll_student_in_unit("123123", &unit("FIT5136", "", 6), Confirmation::Confirmed)
    .unwrap();

  let drop = r
    .validate(Request::Drop {
      student_id: "123123".into(),
      unit_code:  "FIT5136".into(),
    })
    .unwrap();
  let removal = r
    .validate(Request::RemoveUnit {
      unit_code: "FIT5136".into(),
    })
    .unwrap();

  assert_eq!(drop.to_string(), removal.to_string());
  assert_eq!(drop.op(), "drop");
  assert_eq!(removal.op(), "remove_unit");
  assert_eq!(drop.student_id(), Some("123123"));
  assert_eq!(removal.student_id(), None);
}

#[test]
fn enroll_request_for_unknown_code_is_unavailable() {
  let r = registry();
  let err = r
    .validate(Request::Enroll {
      student_id: "123123".into(),
      unit_code:  "FIT0000".into(),
    })
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::UnitUnavailable);

  // Student existence is checked before the unit.
  let err = r
    .validate(Request::Enroll {
      student_id: "nobody".into(),
      unit_code:  "FIT0000".into(),
    })
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn validation_failures_never_reach_confirmation() {
  let r = registry();
  assert!(
    r.validate(Request::AddUnit {
      unit: unit("FIT5136", "Dup", 6),
    })
    .is_err()
  );
  assert!(
    r.validate(Request::RemoveUnit {
      unit_code: "NOPE".into(),
    })
    .is_err()
  );
  assert!(
    r.validate(Request::Drop {
      student_id: "123123".into(),
      unit_code:  "FIT5136".into(),
    })
    .is_err()
  );
}

#[test]
fn stale_plan_is_rechecked_on_commit() {
  let mut r = registry();
  let plan = r
    .validate(Request::Enroll {
      student_id: "123123".into(),
      unit_code:  "FIT5136".into(),
    })
    .unwrap();
  r.remove_unit("FIT5136").unwrap();

  let err = r.commit(plan).unwrap_err();
  assert_eq!(err, Error::UnitUnavailable("FIT5136".into()));
  assert!(codes(&r, "123123").is_empty());
}

#[test]
fn commit_enrolls_the_unit_registered_now() {
  let mut r = registry();
  let plan = r
    .validate(Request::Enroll {
      student_id: "123123".into(),
      unit_code:  "FIT5136".into(),
    })
    .unwrap();
  r.remove_unit("FIT5136").unwrap();
  r.add_unit(unit("FIT5136", "Renamed", 12)).unwrap();

  let Committed::Enrolled { unit: enrolled, .. } = r.commit(plan).unwrap() else {
    panic!("expected an enrollment");
  };
  assert_eq!(enrolled.title(), "Renamed");
  let held = r.list_units_of("123123").unwrap();
  assert_eq!(held[0].to_string(), "FIT5136 - Renamed (12 credit points)");
}

#[test]
fn cancelled_plan_leaves_state_untouched() {
  let mut r = registry();
  let plan = r
    .validate(Request::RemoveUnit {
      unit_code: "FIT5136".into(),
    })
    .unwrap();
  assert_eq!(r.resolve(plan, Confirmation::Declined).unwrap_err(), Error::Cancelled);
  assert!(r.unit("FIT5136").is_some());
}

#[test]
fn committed_outcomes_report_what_changed() {
  let mut r = registry();
  let plan = r
    .validate(Request::AddUnit {
      unit: unit("FIT2004", "Algorithms", 6),
    })
    .unwrap();
  assert!(matches!(
    r.commit(plan).unwrap(),
    Committed::UnitAdded(u) if u.code() == "FIT2004"
  ));

  let plan = r
    .validate(Request::RemoveStudent {
      student_id: "123123".into(),
    })
    .unwrap();
  assert!(matches!(
    r.resolve(plan, Confirmation::from(true)).unwrap(),
    Committed::StudentRemoved(s) if s.id() == "123123"
  ));
}

// ─── Administrator ───────────────────────────────────────────────────────────

#[test]
fn administrator_forwards_to_registry() {
  let admin = Administrator::new("John");
  let mut r = EnrollmentRegistry::new();

  admin
    .add_unit(&mut r, unit("FIT5136", "Software Engineering", 6))
    .unwrap();
  admin.add_student(&mut r, john()).unwrap();
  assert_eq!(
    admin.add_student(&mut r, john()).unwrap_err().kind(),
    ErrorKind::DuplicateKey
  );

  let se = r.unit("FIT5136").cloned().unwrap();
  admin
    .add_unit_to_student(&mut r, "123123", &se, Confirmation::Confirmed)
    .unwrap();
  assert_eq!(codes(&r, "123123"), vec!["FIT5136"]);

  assert_eq!(
    admin
      .remove_unit_from_student(&mut r, "999", "FIT5136", Confirmation::Confirmed)
      .unwrap_err()
      .kind(),
    ErrorKind::NotFound
  );
  admin
    .remove_unit_from_student(&mut r, "123123", "FIT5136", Confirmation::Confirmed)
    .unwrap();
  assert!(codes(&r, "123123").is_empty());
  assert_eq!(admin.name(), "John");
}

#[test]
fn administrator_resolves_plans_and_removes_records() {
  let admin = Administrator::new("John");
  let mut r = registry();

  let plan = r
    .validate(Request::Enroll {
      student_id: "123123".into(),
      unit_code:  "FIT5136".into(),
    })
    .unwrap();
  assert_eq!(
    admin
      .resolve(&mut r, plan.clone(), Confirmation::Declined)
      .unwrap_err(),
    Error::Cancelled
  );
  assert!(codes(&r, "123123").is_empty());
  assert!(matches!(
    admin.resolve(&mut r, plan, Confirmation::Confirmed),
    Ok(Committed::Enrolled { .. })
  ));

  let removal = admin.remove_unit(&mut r, "FIT5136").unwrap();
  assert_eq!(removal.affected, vec!["123123"]);
  assert_eq!(
    admin.remove_unit(&mut r, "FIT5136").unwrap_err().kind(),
    ErrorKind::NotFound
  );

  assert_eq!(admin.remove_student(&mut r, "123123").unwrap().id(), "123123");
  assert!(!r.student_exists("123123"));
}

// ─── Errors ──────────────────────────────────────────────────────────────────

#[test]
fn error_kind_names_are_snake_case() {
  assert_eq!(ErrorKind::CapReached.to_string(), "cap_reached");
  let name: &'static str = ErrorKind::UnitUnavailable.into();
  assert_eq!(name, "unit_unavailable");
  assert_eq!(
    Error::NotFound(Key::Student("9".into())).to_string(),
    "student '9' not found"
  );
}

#[test]
fn keys_and_students_serialise() {
  assert_eq!(
    serde_json::to_value(Key::Student("9".into())).unwrap(),
    serde_json::json!({ "kind": "student", "id": "9" })
  );

  let mut r = registry();
  r.enroll_student_in_unit("123123", &unit("FIT5136", "", 6), Confirmation::Confirmed)
    .unwrap();
  let json = serde_json::to_value(r.student("123123").unwrap()).unwrap();
  assert_eq!(json["kind"]["kind"], "full_time");
  assert_eq!(json["units"]["FIT5136"]["credit_points"], 6);
}
