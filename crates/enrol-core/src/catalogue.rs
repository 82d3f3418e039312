//! The unit catalogue and the availability check enrollment depends on.
//!
//! [`Student::enroll`](crate::student::Student::enroll) only needs to ask
//! whether a unit is offered, so it depends on [`UnitAvailability`] rather
//! than on the whole registry.

use std::collections::{BTreeMap, btree_map::Entry};

use crate::{Error, Key, Result, unit::Unit};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Anything that can answer "is this unit currently offered?".
pub trait UnitAvailability {
  /// `true` iff a unit with `unit`'s code is registered. Units have no
  /// capacity, so this is the only admission check.
  fn is_unit_available(&self, unit: &Unit) -> bool;
}

// ─── Catalogue ───────────────────────────────────────────────────────────────

/// Registered units keyed by code, iterated in code order.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
  units: BTreeMap<String, Unit>,
}

impl Catalogue {
  pub fn new() -> Self { Self::default() }

  /// Insert `unit`; an existing unit with the same code is never replaced.
  pub fn insert(&mut self, unit: Unit) -> Result<()> {
    match self.units.entry(unit.code().to_owned()) {
      Entry::Occupied(e) => Err(Error::DuplicateKey(Key::Unit(e.key().clone()))),
      Entry::Vacant(e) => {
        e.insert(unit);
        Ok(())
      }
    }
  }

  pub fn remove(&mut self, code: &str) -> Result<Unit> {
    self
      .units
      .remove(code)
      .ok_or_else(|| Error::NotFound(Key::Unit(code.to_owned())))
  }

  pub fn get(&self, code: &str) -> Option<&Unit> { self.units.get(code) }

  pub fn contains(&self, code: &str) -> bool { self.units.contains_key(code) }

  pub fn iter(&self) -> impl ExactSizeIterator<Item = &Unit> + '_ {
    self.units.values()
  }

  pub fn len(&self) -> usize { self.units.len() }

  pub fn is_empty(&self) -> bool { self.units.is_empty() }
}

impl UnitAvailability for Catalogue {
  fn is_unit_available(&self, unit: &Unit) -> bool { self.contains(unit.code()) }
}
