mod utils;

use assert_cmd::Command;
use predicates::prelude::*;

use dcmfx::core::{DataSet, StructuredDate, dictionary};
use dcmfx::p10::DataSetP10Extensions;

#[test]
fn anonymize_tree() {
  let input_dir = utils::create_temp_dir();
  let output_dir = utils::create_temp_dir();

  for patient in ["Smith_John", "Doe_Jane"] {
    let series_dir = input_dir.path().join(patient).join("STUDY1/SER1");
    std::fs::create_dir_all(&series_dir).unwrap();
    utils::write_test_instance(&series_dir.join("0001.dcm"), patient);
  }

  Command::cargo_bin("dcmdeid_cli")
    .unwrap()
    .arg(input_dir.path())
    .arg(output_dir.path())
    .assert()
    .success()
    .stdout(predicate::str::contains(
      "Anonymized 2 series (2 files) across 2 patients",
    ));

  // Patients are visited in lexicographic order, so Doe_Jane receives the
  // first pseudonym
  let doe = output_dir.path().join("pat0000001/STUDY1/SER1/0001.dcm");
  let smith = output_dir.path().join("pat0000002/STUDY1/SER1/0001.dcm");
  assert!(doe.is_file());
  assert!(smith.is_file());

  let data_set = DataSet::read_p10_file(&doe, None).unwrap();

  assert_eq!(
    data_set
      .get_value(dictionary::PATIENT_BIRTH_DATE.tag)
      .unwrap()
      .get_date(),
    Ok(StructuredDate {
      year: 1985,
      month: 1,
      day: 1
    })
  );
  assert_eq!(data_set.get_string(dictionary::PATIENT_SEX.tag), Ok("F"));
  assert_eq!(
    data_set.get_string(dictionary::ACCESSION_NUMBER.tag),
    Ok("ACC001")
  );
  assert!(!data_set.has(dictionary::PATIENT_ID.tag));
}

#[test]
fn anonymize_tree_with_empty_patient() {
  let input_dir = utils::create_temp_dir();
  let output_dir = utils::create_temp_dir();

  std::fs::create_dir_all(input_dir.path().join("patient_without_studies"))
    .unwrap();

  let series_dir = input_dir.path().join("patient_with_a_study/STUDY1/SER1");
  std::fs::create_dir_all(&series_dir).unwrap();
  utils::write_test_instance(&series_dir.join("0001.dcm"), "PID1");

  Command::cargo_bin("dcmdeid_cli")
    .unwrap()
    .arg(input_dir.path())
    .arg(output_dir.path())
    .assert()
    .success()
    .stdout(predicate::str::contains(
      "Anonymized 1 series (1 files) across 2 patients",
    ));

  // The empty patient still consumed the first pseudonym
  assert!(!output_dir.path().join("pat0000001").exists());
  assert!(
    output_dir
      .path()
      .join("pat0000002/STUDY1/SER1/0001.dcm")
      .is_file()
  );
}

#[test]
fn missing_input_directory() {
  let output_dir = utils::create_temp_dir();

  Command::cargo_bin("dcmdeid_cli")
    .unwrap()
    .arg("/nonexistent/input/root")
    .arg(output_dir.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("Directory listing error"));
}

#[test]
fn missing_arguments() {
  Command::cargo_bin("dcmdeid_cli")
    .unwrap()
    .assert()
    .failure()
    .stderr(predicate::str::contains("Usage"));
}
