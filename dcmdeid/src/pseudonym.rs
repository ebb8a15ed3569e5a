//! Sequential replacement identifiers for patient directories.

/// An opaque replacement identifier for a patient directory, of the form
/// `pat` followed by the patient's 7-digit zero-padded ordinal position in
/// traversal order, e.g. `pat0000001`.
///
/// Pseudonyms are not reversible: no mapping back to the original directory
/// name is stored anywhere.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pseudonym(String);

impl Pseudonym {
  /// Returns the pseudonym for the given 1-based ordinal. This is a pure
  /// function of the ordinal, so re-running over the same patient listing
  /// reproduces identical pseudonyms.
  ///
  /// Ordinals above 9,999,999 widen the numeral past the usual fixed width
  /// rather than erroring.
  ///
  pub fn for_ordinal(ordinal: usize) -> Self {
    Self(format!("pat{ordinal:07}"))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl core::fmt::Display for Pseudonym {
  fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
    f.write_str(&self.0)
  }
}

impl AsRef<std::path::Path> for Pseudonym {
  fn as_ref(&self) -> &std::path::Path {
    self.0.as_ref()
  }
}

/// Hands out sequential pseudonyms in the order patients are first
/// encountered. Assignments are stable only for the duration of one run;
/// nothing is persisted across runs.
///
#[derive(Debug)]
pub struct PseudonymAssigner {
  next_ordinal: usize,
}

impl PseudonymAssigner {
  pub fn new() -> Self {
    Self { next_ordinal: 1 }
  }

  /// Returns the pseudonym for the next patient. Two patients never receive
  /// the same pseudonym from one assigner.
  ///
  pub fn assign(&mut self) -> Pseudonym {
    let pseudonym = Pseudonym::for_ordinal(self.next_ordinal);
    self.next_ordinal += 1;

    pseudonym
  }
}

impl Default for PseudonymAssigner {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn for_ordinal_test() {
    assert_eq!(Pseudonym::for_ordinal(1).as_str(), "pat0000001");
    assert_eq!(Pseudonym::for_ordinal(42).as_str(), "pat0000042");
    assert_eq!(Pseudonym::for_ordinal(9_999_999).as_str(), "pat9999999");

    // Overflowing the fixed width widens the numeral
    assert_eq!(Pseudonym::for_ordinal(10_000_000).as_str(), "pat10000000");
  }

  #[test]
  fn assign_is_sequential_test() {
    let mut assigner = PseudonymAssigner::new();

    let pseudonyms: Vec<_> =
      (0..5).map(|_| assigner.assign().as_str().to_string()).collect();

    assert_eq!(
      pseudonyms,
      vec![
        "pat0000001",
        "pat0000002",
        "pat0000003",
        "pat0000004",
        "pat0000005"
      ]
    );
  }
}
