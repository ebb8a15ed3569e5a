//! De-identifies DICOM datasets organized as a three-level directory
//! hierarchy of patients, studies, and series. Patient directory names are
//! replaced with sequential pseudonyms, study and series directory names are
//! preserved, and every series is anonymized through DCMfx with a small set
//! of per-tag overrides that retain clinically useful fields permitted under
//! the HIPAA safe harbor method.

mod engine;
mod error;
mod process;
mod pseudonym;
mod rules;
mod walk;

pub use engine::{P10SeriesAnonymizer, SeriesAnonymizer};
pub use error::DeidentifyError;
pub use process::{TreeStats, anonymize_tree, process_series};
pub use pseudonym::{Pseudonym, PseudonymAssigner};
pub use rules::{AnonymizationOverride, AnonymizationRuleSet};
pub use walk::{SeriesJob, TreeWalk, walk};

pub use dcmfx::core::{DataElementTag, DcmfxError};
