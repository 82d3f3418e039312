//! Fuzzy student lookup over name and ID.

use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};

use enrol_core::Student;

/// Students matching `query`, best match first; ties keep ID order.
///
/// An empty (or all-whitespace) query matches everyone.
pub fn search<'a>(
  students: impl Iterator<Item = &'a Student>,
  query: &str,
) -> Vec<&'a Student> {
  let query = query.trim();
  if query.is_empty() {
    return students.collect();
  }

  let matcher = SkimMatcherV2::default();
  let mut scored: Vec<(i64, &Student)> = students
    .filter_map(|s| {
      let by_name = matcher.fuzzy_match(s.name(), query);
      let by_id = matcher.fuzzy_match(s.id(), query);
      by_name.max(by_id).map(|score| (score, s))
    })
    .collect();
  // Stable sort keeps the incoming ID order among equal scores.
  scored.sort_by(|a, b| b.0.cmp(&a.0));
  scored.into_iter().map(|(_, s)| s).collect()
}
