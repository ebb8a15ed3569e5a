//! Sequential processing of the series produced by a tree walk.

use std::path::Path;

use crate::engine::SeriesAnonymizer;
use crate::error::DeidentifyError;
use crate::rules::AnonymizationRuleSet;
use crate::walk::{self, SeriesJob};

/// Totals for a completed run over a patient/study/series tree.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
  pub patients: usize,
  pub series: usize,
  pub files: usize,
}

/// Anonymizes a single series: creates the series output directory and any
/// missing ancestors, then hands the series to the anonymization engine with
/// the directive to discard all private data elements. Returns the number of
/// files the engine processed.
///
/// Directory creation is idempotent, so re-invoking for the same series is
/// safe. An engine failure propagates to the caller as-is; the output
/// directory may be left partially populated.
///
pub fn process_series(
  job: &SeriesJob,
  rules: &AnonymizationRuleSet,
  engine: &impl SeriesAnonymizer,
) -> Result<usize, DeidentifyError> {
  std::fs::create_dir_all(&job.output_path).map_err(|e| {
    DeidentifyError::DirectoryCreateFailed {
      path: job.output_path.clone(),
      details: e.to_string(),
    }
  })?;

  engine.anonymize_series(&job.input_path, &job.output_path, rules, true)
}

/// Anonymizes a whole patient/study/series tree under `input_root` into
/// `output_root`, strictly sequentially, aborting on the first failure.
///
pub fn anonymize_tree(
  input_root: &Path,
  output_root: &Path,
  rules: &AnonymizationRuleSet,
  engine: &impl SeriesAnonymizer,
) -> Result<TreeStats, DeidentifyError> {
  let walk = walk::walk(input_root, output_root)?;

  let mut stats = TreeStats {
    patients: walk.patient_count(),
    ..TreeStats::default()
  };

  for job in walk {
    stats.files += process_series(&job?, rules, engine)?;
    stats.series += 1;
  }

  Ok(stats)
}
