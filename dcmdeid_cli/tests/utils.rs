use std::path::{Path, PathBuf};

use tempfile::TempDir;

use dcmfx::core::{DataElementValue, DataSet, StructuredDate, dictionary};
use dcmfx::p10::DataSetP10Extensions;

fn temp_dir() -> PathBuf {
  if let Ok(t) = std::env::var("RUNNER_TEMP") {
    PathBuf::from(t)
  } else {
    std::env::temp_dir()
  }
}

#[allow(dead_code)]
pub fn create_temp_dir() -> TempDir {
  TempDir::new_in(temp_dir()).unwrap()
}

/// Writes a small DICOM P10 file carrying patient-identifying data elements
/// alongside the fields the safe-harbor rule set retains.
///
#[allow(dead_code)]
pub fn write_test_instance(path: &Path, patient_id: &str) {
  let mut data_set = DataSet::new();

  data_set.insert(
    dictionary::SOP_CLASS_UID.tag,
    DataElementValue::new_unique_identifier(&["1.2.840.10008.5.1.4.1.1.7"])
      .unwrap(),
  );
  data_set.insert(
    dictionary::SOP_INSTANCE_UID.tag,
    DataElementValue::new_unique_identifier(&["1.2.3.4.1"]).unwrap(),
  );

  data_set.insert(
    dictionary::PATIENT_ID.tag,
    DataElementValue::new_long_string(&[patient_id]).unwrap(),
  );
  data_set.insert(
    dictionary::PATIENT_SEX.tag,
    DataElementValue::new_code_string(&["F"]).unwrap(),
  );
  data_set.insert(
    dictionary::PATIENT_BIRTH_DATE.tag,
    DataElementValue::new_date(&StructuredDate {
      year: 1985,
      month: 6,
      day: 14,
    })
    .unwrap(),
  );
  data_set.insert(
    dictionary::ACCESSION_NUMBER.tag,
    DataElementValue::new_short_string(&["ACC001"]).unwrap(),
  );

  data_set.write_p10_file(path, None).unwrap();
}
