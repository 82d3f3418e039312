//! Core types for the enrolment register.
//!
//! Students, units, the enrollment relation between them and the registry
//! that gates every mutation. This crate performs no I/O; prompting and
//! rendering belong to the caller.

pub mod admin;
pub mod catalogue;
pub mod error;
pub mod plan;
pub mod registry;
pub mod student;
pub mod unit;

pub use admin::Administrator;
pub use catalogue::{Catalogue, UnitAvailability};
pub use error::{Error, ErrorKind, Key, Result};
pub use plan::{Committed, Confirmation, Plan, Request, UnitRemoval};
pub use registry::EnrollmentRegistry;
pub use student::{MAX_UNITS, NewStudent, Student, StudentKind};
pub use unit::Unit;

#[cfg(test)]
mod tests;
