use std::path::PathBuf;

use dcmfx::core::{DataError, DcmfxError};
use dcmfx::p10::P10Error;

/// Occurs when de-identification of a patient/study/series tree fails. All
/// variants are fatal to the run: there is no retry and no skip-and-continue,
/// so the output tree may be left partially populated.
///
#[derive(Debug)]
pub enum DeidentifyError {
  /// A directory could not be listed while traversing the input tree, e.g.
  /// because it does not exist or access was denied.
  DirectoryListFailed { path: PathBuf, details: String },

  /// A series output directory could not be created.
  DirectoryCreateFailed { path: PathBuf, details: String },

  /// The anonymization engine failed to read or write a DICOM P10 file.
  P10Error { path: PathBuf, error: P10Error },

  /// The anonymization engine failed to apply an override to a data element.
  /// Overrides naming a tag that's absent from a data set are a silent no-op
  /// and never produce this error.
  DataError { path: PathBuf, error: DataError },
}

impl core::fmt::Display for DeidentifyError {
  fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
    match self {
      DeidentifyError::DirectoryListFailed { path, details } => write!(
        f,
        "Failed listing directory '{}', details: {}",
        path.display(),
        details
      ),

      DeidentifyError::DirectoryCreateFailed { path, details } => write!(
        f,
        "Failed creating directory '{}', details: {}",
        path.display(),
        details
      ),

      DeidentifyError::P10Error { path, error } => {
        write!(f, "{} ('{}')", error, path.display())
      }

      DeidentifyError::DataError { path, error } => {
        write!(f, "{} ('{}')", error, path.display())
      }
    }
  }
}

impl DcmfxError for DeidentifyError {
  /// Returns lines of text that describe a de-identification error in a
  /// human-readable format.
  ///
  fn to_lines(&self, task_description: &str) -> Vec<String> {
    match self {
      DeidentifyError::DirectoryListFailed { path, details } => vec![
        format!("Directory listing error {task_description}"),
        "".to_string(),
        format!("  Path: {}", path.display()),
        format!("  Details: {details}"),
      ],

      DeidentifyError::DirectoryCreateFailed { path, details } => vec![
        format!("Directory creation error {task_description}"),
        "".to_string(),
        format!("  Path: {}", path.display()),
        format!("  Details: {details}"),
      ],

      DeidentifyError::P10Error { path, error } => {
        let mut lines = error.to_lines(task_description);
        lines.push(format!("  File: {}", path.display()));

        lines
      }

      DeidentifyError::DataError { path, error } => {
        let mut lines = error.to_lines(task_description);
        lines.push(format!("  File: {}", path.display()));

        lines
      }
    }
  }
}
