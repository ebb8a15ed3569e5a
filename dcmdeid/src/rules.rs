//! Per-data-element overrides layered on top of the anonymization engine's
//! default policy.

use std::collections::HashMap;

use dcmfx::core::{DataElementTag, DataElementValue, DataError, dictionary};

/// An override applied to a single data element in place of whatever the
/// anonymization engine's default policy would do to it.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnonymizationOverride {
  /// Keeps the data element's value exactly as it is in the input.
  Retain,

  /// Replaces a `YYYYMMDD` date value with the first of January of its year,
  /// i.e. `YYYY0101`.
  TruncateDateToYear,
}

impl AnonymizationOverride {
  /// Applies the override to a data element's existing value, returning the
  /// value to put in the output data set.
  ///
  pub fn apply(
    &self,
    value: &DataElementValue,
  ) -> Result<DataElementValue, DataError> {
    match self {
      AnonymizationOverride::Retain => Ok(value.clone()),

      AnonymizationOverride::TruncateDateToYear => {
        let bytes = value.bytes()?;

        let date = core::str::from_utf8(bytes).map_err(|_| {
          DataError::new_value_invalid(
            "Date bytes are not valid UTF-8".to_string(),
          )
        })?;

        let truncated =
          truncate_date_to_year(date.trim_end_matches([' ', '\0']));

        DataElementValue::new_binary(
          value.value_representation(),
          truncated.into_bytes().into(),
        )
      }
    }
  }
}

/// Truncates a `YYYYMMDD` date string to the first of January of its year.
///
/// Values shorter than four characters are passed through with `0101`
/// appended. Such values aren't valid dates to begin with, so this mirrors a
/// plain prefix take rather than attempting to repair them.
///
pub fn truncate_date_to_year(date: &str) -> String {
  let year_end = date
    .char_indices()
    .nth(4)
    .map(|(i, _)| i)
    .unwrap_or(date.len());

  format!("{}0101", &date[..year_end])
}

/// Maps data element tags to the override to apply in place of the
/// anonymization engine's default behavior. Holds at most one override per
/// tag; inserting a tag again replaces its earlier override. Tags absent
/// from the map fall back to the engine's default policy.
///
#[derive(Debug, Clone, Default)]
pub struct AnonymizationRuleSet {
  overrides: HashMap<DataElementTag, AnonymizationOverride>,
}

impl AnonymizationRuleSet {
  /// Returns an empty rule set where every data element is governed solely
  /// by the engine's default policy.
  ///
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the rule set used for de-identified sharing of imaging
  /// datasets: birth date and study date are reduced to their year, and
  /// patient sex, accession number, and series description are retained
  /// as-is.
  ///
  /// Retaining only the year of a date is permitted for de-identification
  /// under the HIPAA safe harbor method, see
  /// https://www.hhs.gov/hipaa/for-professionals/privacy/special-topics/de-identification/index.html.
  ///
  pub fn safe_harbor() -> Self {
    let mut rules = Self::new();

    rules.insert(
      dictionary::PATIENT_BIRTH_DATE.tag,
      AnonymizationOverride::TruncateDateToYear,
    );
    rules.insert(
      dictionary::STUDY_DATE.tag,
      AnonymizationOverride::TruncateDateToYear,
    );

    rules.insert(dictionary::PATIENT_SEX.tag, AnonymizationOverride::Retain);
    rules.insert(
      dictionary::ACCESSION_NUMBER.tag,
      AnonymizationOverride::Retain,
    );
    rules.insert(
      dictionary::SERIES_DESCRIPTION.tag,
      AnonymizationOverride::Retain,
    );

    rules
  }

  pub fn insert(
    &mut self,
    tag: DataElementTag,
    override_: AnonymizationOverride,
  ) {
    self.overrides.insert(tag, override_);
  }

  pub fn get(&self, tag: DataElementTag) -> Option<AnonymizationOverride> {
    self.overrides.get(&tag).copied()
  }

  pub fn iter(
    &self,
  ) -> impl Iterator<Item = (DataElementTag, AnonymizationOverride)> + '_ {
    self.overrides.iter().map(|(tag, override_)| (*tag, *override_))
  }

  pub fn len(&self) -> usize {
    self.overrides.len()
  }

  pub fn is_empty(&self) -> bool {
    self.overrides.is_empty()
  }
}
