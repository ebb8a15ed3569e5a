//! The anonymization engine that processes the files of a single series.

use std::path::Path;

use dcmfx::anonymize::DataSetAnonymizeExtensions;
use dcmfx::core::{DataElementTag, DataElementValue, DataSet};
use dcmfx::p10::DataSetP10Extensions;

use crate::error::DeidentifyError;
use crate::rules::AnonymizationRuleSet;

/// Anonymizes the contents of one series directory into an output directory.
///
/// This is the seam between the tree orchestration in this crate and the
/// engine that understands the individual files. The output directory is
/// expected to already exist.
///
pub trait SeriesAnonymizer {
  /// Anonymizes every file in `input_path`, writing the result under the
  /// same file name in `output_path`. Returns the number of files processed.
  ///
  /// Data elements named by `rules` are overridden accordingly; all other
  /// data elements are subject to the engine's default anonymization policy.
  /// When `delete_private_tags` is set, private (vendor-specific) data
  /// elements are discarded unconditionally.
  ///
  fn anonymize_series(
    &self,
    input_path: &Path,
    output_path: &Path,
    rules: &AnonymizationRuleSet,
    delete_private_tags: bool,
  ) -> Result<usize, DeidentifyError>;
}

/// A [`SeriesAnonymizer`] that treats every file in the series as DICOM P10.
/// Each file is read into a data set, anonymized with DCMfx's default
/// policy, has the rule set's overrides re-applied from the original data
/// elements, and is written out again as DICOM P10.
///
/// Any file that fails to parse or write fails the whole series.
///
#[derive(Debug, Clone, Copy, Default)]
pub struct P10SeriesAnonymizer;

impl P10SeriesAnonymizer {
  pub fn new() -> Self {
    Self
  }

  fn anonymize_file(
    input_path: &Path,
    output_path: &Path,
    rules: &AnonymizationRuleSet,
    delete_private_tags: bool,
  ) -> Result<(), DeidentifyError> {
    let mut data_set =
      DataSet::read_p10_file(input_path, None).map_err(|error| {
      DeidentifyError::P10Error {
        path: input_path.to_path_buf(),
        error,
      }
    })?;

    // Capture override values from the original data elements before the
    // default policy removes them. Rules naming a tag that's absent from
    // this data set are skipped.
    let mut override_values: Vec<(DataElementTag, DataElementValue)> = vec![];

    for (tag, rule) in rules.iter() {
      if let Ok(value) = data_set.get_value(tag) {
        let value = rule.apply(value).map_err(|error| {
          DeidentifyError::DataError {
            path: input_path.to_path_buf(),
            error,
          }
        })?;

        override_values.push((tag, value));
      }
    }

    data_set.anonymize();

    if delete_private_tags {
      data_set.retain(|tag, _value| !tag.is_private());
    }

    for (tag, value) in override_values {
      data_set.insert(tag, value);
    }

    data_set.write_p10_file(output_path, None).map_err(|error| {
      DeidentifyError::P10Error {
        path: output_path.to_path_buf(),
        error,
      }
    })
  }
}

impl SeriesAnonymizer for P10SeriesAnonymizer {
  fn anonymize_series(
    &self,
    input_path: &Path,
    output_path: &Path,
    rules: &AnonymizationRuleSet,
    delete_private_tags: bool,
  ) -> Result<usize, DeidentifyError> {
    let file_names = list_files(input_path)?;

    for file_name in &file_names {
      Self::anonymize_file(
        &input_path.join(file_name),
        &output_path.join(file_name),
        rules,
        delete_private_tags,
      )?;
    }

    Ok(file_names.len())
  }
}

/// Returns the names of the regular files in a directory, sorted
/// lexicographically so files are processed in a deterministic order.
///
fn list_files(
  path: &Path,
) -> Result<Vec<std::ffi::OsString>, DeidentifyError> {
  let entries = std::fs::read_dir(path).map_err(|e| {
    DeidentifyError::DirectoryListFailed {
      path: path.to_path_buf(),
      details: e.to_string(),
    }
  })?;

  let mut names = vec![];

  for entry in entries {
    let entry = entry.map_err(|e| DeidentifyError::DirectoryListFailed {
      path: path.to_path_buf(),
      details: e.to_string(),
    })?;

    if entry.path().is_file() {
      names.push(entry.file_name());
    }
  }

  names.sort();

  Ok(names)
}
