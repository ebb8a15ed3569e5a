//! Traversal of a patient/study/series directory tree.

use std::collections::VecDeque;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::DeidentifyError;
use crate::pseudonym::{Pseudonym, PseudonymAssigner};

/// A single series directory to anonymize, together with the directory in
/// the output tree that its anonymized files are written to and the
/// pseudonym of the patient it belongs to.
///
/// The output path replaces the patient directory name with the pseudonym
/// but preserves the study and series directory names byte-for-byte.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesJob {
  pub input_path: PathBuf,
  pub output_path: PathBuf,
  pub pseudonym: Pseudonym,
}

/// Walks the patient/study/series hierarchy under `input_root`, returning a
/// lazy iterator of [`SeriesJob`]s in depth-first order: all series of a
/// study before the next study, all studies of a patient before the next
/// patient.
///
/// Directories at each level are visited in lexicographic order of their
/// names (byte order). This makes pseudonym assignment reproducible across
/// platforms, whereas relying on the underlying directory enumeration order
/// would not be. Non-directory entries are ignored at every level.
///
/// Fails if `input_root` itself cannot be listed. Failures listing a patient
/// or study directory during iteration are yielded as an `Err` item, after
/// which the iterator is exhausted.
///
pub fn walk(
  input_root: &Path,
  output_root: &Path,
) -> Result<TreeWalk, DeidentifyError> {
  let patient_names = list_subdirectories(input_root)?;

  Ok(TreeWalk {
    input_root: input_root.to_path_buf(),
    output_root: output_root.to_path_buf(),
    patient_count: patient_names.len(),
    patient_names: patient_names.into(),
    pseudonym_assigner: PseudonymAssigner::new(),
    pending_jobs: VecDeque::new(),
    failed: false,
  })
}

/// Lazy iterator over the series directories of a patient/study/series tree.
/// Created by [`walk`]. Each call to [`walk`] re-reads the filesystem; the
/// iterator is not restartable.
///
pub struct TreeWalk {
  input_root: PathBuf,
  output_root: PathBuf,
  patient_count: usize,
  patient_names: VecDeque<OsString>,
  pseudonym_assigner: PseudonymAssigner,
  pending_jobs: VecDeque<SeriesJob>,
  failed: bool,
}

impl TreeWalk {
  /// The number of patient directories this walk will visit.
  ///
  pub fn patient_count(&self) -> usize {
    self.patient_count
  }

  /// Moves to the next patient directory, resolving its pseudonym and
  /// queueing a job for every series in every one of its studies. Returns
  /// false once all patients have been visited.
  ///
  /// The pseudonym is consumed as soon as the patient is visited, so a
  /// patient with no studies still advances the pseudonym sequence.
  ///
  fn enqueue_next_patient(&mut self) -> Result<bool, DeidentifyError> {
    let Some(patient_name) = self.patient_names.pop_front() else {
      return Ok(false);
    };

    let patient_path = self.input_root.join(&patient_name);
    let pseudonym = self.pseudonym_assigner.assign();
    let output_patient_path = self.output_root.join(&pseudonym);

    for study_name in list_subdirectories(&patient_path)? {
      let study_path = patient_path.join(&study_name);
      let output_study_path = output_patient_path.join(&study_name);

      for series_name in list_subdirectories(&study_path)? {
        self.pending_jobs.push_back(SeriesJob {
          input_path: study_path.join(&series_name),
          output_path: output_study_path.join(&series_name),
          pseudonym: pseudonym.clone(),
        });
      }
    }

    Ok(true)
  }
}

impl Iterator for TreeWalk {
  type Item = Result<SeriesJob, DeidentifyError>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.failed {
      return None;
    }

    loop {
      if let Some(job) = self.pending_jobs.pop_front() {
        return Some(Ok(job));
      }

      match self.enqueue_next_patient() {
        Ok(true) => (),
        Ok(false) => return None,
        Err(e) => {
          self.failed = true;
          return Some(Err(e));
        }
      }
    }
  }
}

/// Returns the names of the immediate subdirectories of a directory, sorted
/// lexicographically.
///
fn list_subdirectories(
  path: &Path,
) -> Result<Vec<OsString>, DeidentifyError> {
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

    if entry.path().is_dir() {
      names.push(entry.file_name());
    }
  }

  names.sort();

  Ok(names)
}
