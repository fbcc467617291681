//! Batch conversion of Word documents to PDF.
//!
//! The actual conversion is delegated to a [`PdfConverter`], an external
//! collaborator injected by the caller. [`LibreOfficeConverter`] drives a
//! local LibreOffice installation; tests and other hosts can plug in their
//! own implementation.
//!
//! # Example
//!
//! ```no_run
//! use docproc::convert::{batch_convert_to_pdf, LibreOfficeConverter};
//!
//! let converter = LibreOfficeConverter::new();
//! let report = batch_convert_to_pdf("./word", "./pdf", &converter)?;
//! println!(
//!     "{} converted, {} skipped, {} failed",
//!     report.converted(),
//!     report.skipped(),
//!     report.failed()
//! );
//! # Ok::<(), docproc::Error>(())
//! ```

mod soffice;

pub use soffice::LibreOfficeConverter;

use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;

/// Converts a single document to PDF.
pub trait PdfConverter: Send + Sync {
    /// Get the name of this converter.
    fn name(&self) -> &str;

    /// Convert `input` and write the PDF to `output`.
    ///
    /// Failures are reported as [`crate::Error::Conversion`].
    fn convert(&self, input: &Path, output: &Path) -> Result<()>;
}

/// Options for batch conversion.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Input extensions to convert, lowercase without the leading dot
    pub extensions: Vec<String>,

    /// Reconvert even when the output already exists
    pub overwrite: bool,
}

impl BatchOptions {
    /// Create new batch options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input extensions to convert.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    /// Reconvert files whose output already exists.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Check if a path has one of the configured extensions.
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(OsStr::to_str)
            .map(|ext| {
                let ext = ext.to_lowercase();
                self.extensions.iter().any(|e| *e == ext)
            })
            .unwrap_or(false)
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["docx".to_string()],
            overwrite: false,
        }
    }
}

/// One planned conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// The conversions a batch will attempt.
#[derive(Debug, Clone)]
pub struct BatchPlan {
    /// Directory receiving the PDFs
    pub output_dir: PathBuf,

    /// Jobs in input name order
    pub jobs: Vec<BatchJob>,
}

impl BatchPlan {
    /// Number of planned jobs.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Check if there is nothing to convert.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileOutcome {
    /// The PDF was written
    Converted { input: PathBuf, output: PathBuf },
    /// The PDF already existed
    Skipped { input: PathBuf, output: PathBuf },
    /// The converter failed
    Failed { input: PathBuf, error: String },
}

impl FileOutcome {
    /// The input file this outcome refers to.
    pub fn input(&self) -> &Path {
        match self {
            FileOutcome::Converted { input, .. }
            | FileOutcome::Skipped { input, .. }
            | FileOutcome::Failed { input, .. } => input,
        }
    }
}

/// Result of a batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Per-file outcomes in processing order
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    /// Number of files converted.
    pub fn converted(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Converted { .. }))
    }

    /// Number of files skipped because their output existed.
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped { .. }))
    }

    /// Number of files that failed to convert.
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

/// Convert every `.docx` file of `input_dir` into `output_dir/<stem>.pdf`.
///
/// Existing outputs are skipped; per-file failures are logged and the batch
/// moves on. Errors listing `input_dir` or creating `output_dir` abort.
pub fn batch_convert_to_pdf<P, Q>(
    input_dir: P,
    output_dir: Q,
    converter: &dyn PdfConverter,
) -> Result<BatchReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let options = BatchOptions::default();
    let plan = plan_batch(input_dir, output_dir, &options)?;
    run_batch(&plan, converter, &options, |_| {})
}

/// List the conversions a batch would attempt, without touching the disk.
pub fn plan_batch<P, Q>(input_dir: P, output_dir: Q, options: &BatchOptions) -> Result<BatchPlan>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let output_dir = output_dir.as_ref().to_path_buf();
    let mut jobs = Vec::new();

    for entry in fs::read_dir(input_dir.as_ref())? {
        let input = entry?.path();
        if !input.is_file() || !options.accepts(&input) {
            continue;
        }
        let Some(stem) = input.file_stem() else {
            continue;
        };
        let output = output_dir.join(pdf_file_name(stem));
        jobs.push(BatchJob { input, output });
    }

    jobs.sort_by(|a, b| a.input.cmp(&b.input));
    Ok(BatchPlan { output_dir, jobs })
}

/// Execute a plan, reporting each outcome to `on_outcome` as it happens.
pub fn run_batch<F>(
    plan: &BatchPlan,
    converter: &dyn PdfConverter,
    options: &BatchOptions,
    mut on_outcome: F,
) -> Result<BatchReport>
where
    F: FnMut(&FileOutcome),
{
    fs::create_dir_all(&plan.output_dir)?;

    let mut report = BatchReport::default();
    for job in &plan.jobs {
        let outcome = run_job(job, converter, options);
        on_outcome(&outcome);
        report.outcomes.push(outcome);
    }

    log::info!(
        "Batch finished with {}: {} converted, {} skipped, {} failed",
        converter.name(),
        report.converted(),
        report.skipped(),
        report.failed()
    );
    Ok(report)
}

fn run_job(job: &BatchJob, converter: &dyn PdfConverter, options: &BatchOptions) -> FileOutcome {
    if !options.overwrite && job.output.exists() {
        log::info!(
            "Output file {} already exists. Skipping.",
            job.output.display()
        );
        return FileOutcome::Skipped {
            input: job.input.clone(),
            output: job.output.clone(),
        };
    }

    match converter.convert(&job.input, &job.output) {
        Ok(()) => {
            log::info!(
                "Converted {} to {}",
                job.input.display(),
                job.output.display()
            );
            FileOutcome::Converted {
                input: job.input.clone(),
                output: job.output.clone(),
            }
        }
        Err(e) => {
            log::error!("Error converting {}: {}", job.input.display(), e);
            FileOutcome::Failed {
                input: job.input.clone(),
                error: e.to_string(),
            }
        }
    }
}

/// `<stem>.pdf`, keeping any dots inside the stem.
pub(crate) fn pdf_file_name(stem: &OsStr) -> OsString {
    let mut name = stem.to_os_string();
    name.push(".pdf");
    name
}
