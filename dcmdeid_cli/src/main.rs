//! Entry point for the dcmdeid CLI tool.

use std::path::PathBuf;

use clap::Parser;
use indicatif::{ProgressBar, ProgressFinish, ProgressStyle};

use dcmdeid::{
  AnonymizationRuleSet, DcmfxError, DeidentifyError, P10SeriesAnonymizer,
  Pseudonym, TreeStats, process_series, walk,
};

#[derive(Parser)]
#[command(
  name = "dcmdeid",
  bin_name = "dcmdeid",
  version = env!("CARGO_PKG_VERSION"),
  about = "dcmdeid de-identifies DICOM datasets organized as \
    patient/study/series directory trees",
  max_term_width = 80
)]
struct Cli {
  #[arg(
    help = "Path to the input directory. Its immediate subdirectories are \
      taken to be patients, with study directories nested inside them and \
      series directories nested inside the studies."
  )]
  input: PathBuf,

  #[arg(
    help = "Path to the output directory. The anonymized tree is written \
      here with each patient directory name replaced by a sequential \
      pseudonym. Study and series directory names are preserved."
  )]
  output: PathBuf,
}

/// Configuration for progress reporting during a run.
///
struct ProgressOptions {
  /// Whether completed progress bars stay on screen or are cleared.
  leave_bars: bool,
}

fn main() -> Result<(), ()> {
  let cli = Cli::parse();

  let progress_options = ProgressOptions { leave_bars: false };

  match run(&cli, &progress_options) {
    Ok(stats) => {
      println!(
        "Anonymized {} series ({} files) across {} patients",
        stats.series, stats.files, stats.patients
      );

      Ok(())
    }

    Err(e) => {
      e.print(&format!("anonymizing \"{}\"", cli.input.display()));

      Err(())
    }
  }
}

fn run(
  cli: &Cli,
  progress_options: &ProgressOptions,
) -> Result<TreeStats, DeidentifyError> {
  let rules = AnonymizationRuleSet::safe_harbor();
  let engine = P10SeriesAnonymizer::new();

  let walk = walk(&cli.input, &cli.output)?;

  let mut stats = TreeStats {
    patients: walk.patient_count(),
    ..TreeStats::default()
  };

  let progress_bar =
    patient_progress_bar(walk.patient_count() as u64, progress_options);

  let mut current_patient: Option<Pseudonym> = None;

  for job in walk {
    let job = job?;

    if current_patient.as_ref() != Some(&job.pseudonym) {
      if current_patient.is_some() {
        progress_bar.inc(1);
      }

      current_patient = Some(job.pseudonym.clone());
    }

    stats.files += process_series(&job, &rules, &engine)?;
    stats.series += 1;
  }

  progress_bar.finish_using_style();

  Ok(stats)
}

/// Returns the progress bar that tracks patients through a run.
///
fn patient_progress_bar(
  patient_count: u64,
  options: &ProgressOptions,
) -> ProgressBar {
  let style = ProgressStyle::with_template(
    "{msg} {wide_bar} {pos}/{len} [{elapsed_precise}]",
  )
  .unwrap();

  let mut progress_bar = ProgressBar::new(patient_count)
    .with_style(style)
    .with_message("Patients");

  if !options.leave_bars {
    progress_bar = progress_bar.with_finish(ProgressFinish::AndClear);
  }

  progress_bar
}
