//! Integration tests for batch PDF conversion.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use docproc::convert::{
    batch_convert_to_pdf, plan_batch, run_batch, BatchOptions, FileOutcome, PdfConverter,
};
use docproc::error::{Error, Result};

/// Mock converter that writes a fake PDF, or fails for chosen file names.
struct MockConverter {
    fail_on: Vec<&'static str>,
    calls: Mutex<Vec<PathBuf>>,
}

impl MockConverter {
    fn new() -> Self {
        Self {
            fail_on: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn failing_on(names: Vec<&'static str>) -> Self {
        Self {
            fail_on: names,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }
}

impl PdfConverter for MockConverter {
    fn name(&self) -> &str {
        "mock"
    }

    fn convert(&self, input: &Path, output: &Path) -> Result<()> {
        self.calls.lock().unwrap().push(input.to_path_buf());

        let name = input.file_name().unwrap().to_string_lossy();
        if self.fail_on.iter().any(|f| *f == name) {
            return Err(Error::Conversion {
                path: input.to_path_buf(),
                message: "mock failure".into(),
            });
        }

        fs::write(output, b"%PDF-1.4\n%mock\n")?;
        Ok(())
    }
}

fn input_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.docx"), b"PK").unwrap();
    fs::write(dir.path().join("b.docx"), b"PK").unwrap();
    fs::write(dir.path().join("notes.txt"), b"text").unwrap();
    fs::write(dir.path().join("old.doc"), b"doc").unwrap();
    fs::create_dir(dir.path().join("folder.docx")).unwrap();
    dir
}

#[test]
fn test_batch_converts_docx_only() {
    let input = input_dir();
    let output = tempfile::tempdir().unwrap();
    let out_dir = output.path().join("pdf");
    let converter = MockConverter::new();

    let report = batch_convert_to_pdf(input.path(), &out_dir, &converter).unwrap();

    assert_eq!(report.converted(), 2);
    assert_eq!(report.skipped(), 0);
    assert_eq!(report.failed(), 0);
    assert!(out_dir.join("a.pdf").is_file());
    assert!(out_dir.join("b.pdf").is_file());
    assert!(!out_dir.join("notes.pdf").exists());
    assert!(!out_dir.join("old.pdf").exists());
    assert_eq!(
        converter.calls(),
        vec![input.path().join("a.docx"), input.path().join("b.docx")]
    );
}

#[test]
fn test_rerun_skips_existing_outputs() {
    let input = input_dir();
    let output = tempfile::tempdir().unwrap();

    let first = MockConverter::new();
    batch_convert_to_pdf(input.path(), output.path(), &first).unwrap();

    let second = MockConverter::new();
    let report = batch_convert_to_pdf(input.path(), output.path(), &second).unwrap();

    assert_eq!(report.converted(), 0);
    assert_eq!(report.skipped(), 2);
    assert!(second.calls().is_empty());
}

#[test]
fn test_overwrite_reconverts() {
    let input = input_dir();
    let output = tempfile::tempdir().unwrap();
    fs::write(output.path().join("a.pdf"), b"stale").unwrap();

    let options = BatchOptions::new().with_overwrite(true);
    let plan = plan_batch(input.path(), output.path(), &options).unwrap();
    let converter = MockConverter::new();
    let report = run_batch(&plan, &converter, &options, |_| {}).unwrap();

    assert_eq!(report.converted(), 2);
    assert_ne!(fs::read(output.path().join("a.pdf")).unwrap(), b"stale");
}

#[test]
fn test_failure_does_not_stop_batch() {
    let input = input_dir();
    let output = tempfile::tempdir().unwrap();
    let converter = MockConverter::failing_on(vec!["a.docx"]);

    let report = batch_convert_to_pdf(input.path(), output.path(), &converter).unwrap();

    assert_eq!(report.failed(), 1);
    assert_eq!(report.converted(), 1);
    assert!(!output.path().join("a.pdf").exists());
    assert!(output.path().join("b.pdf").is_file());
    assert!(matches!(
        &report.outcomes[0],
        FileOutcome::Failed { error, .. } if error.contains("mock failure")
    ));
}

#[test]
fn test_outcomes_reported_in_order() {
    let input = input_dir();
    let output = tempfile::tempdir().unwrap();
    fs::write(output.path().join("b.pdf"), b"done").unwrap();

    let options = BatchOptions::default();
    let plan = plan_batch(input.path(), output.path(), &options).unwrap();
    let mut seen = Vec::new();
    run_batch(&plan, &MockConverter::new(), &options, |outcome| {
        seen.push(outcome.clone())
    })
    .unwrap();

    assert_eq!(seen.len(), 2);
    assert!(matches!(seen[0], FileOutcome::Converted { .. }));
    assert!(matches!(seen[1], FileOutcome::Skipped { .. }));
}

#[test]
fn test_custom_extensions() {
    let input = input_dir();
    let output = tempfile::tempdir().unwrap();

    let options = BatchOptions::new().with_extensions(["doc", "docx"]);
    let plan = plan_batch(input.path(), output.path(), &options).unwrap();

    let outputs: Vec<_> = plan.jobs.iter().map(|j| j.output.clone()).collect();
    assert_eq!(
        outputs,
        vec![
            output.path().join("a.pdf"),
            output.path().join("b.pdf"),
            output.path().join("old.pdf"),
        ]
    );
}

#[test]
fn test_plan_does_not_create_output_dir() {
    let input = input_dir();
    let output = tempfile::tempdir().unwrap();
    let out_dir = output.path().join("later");

    let plan = plan_batch(input.path(), &out_dir, &BatchOptions::default()).unwrap();
    assert_eq!(plan.len(), 2);
    assert!(!out_dir.exists());
}

#[test]
fn test_missing_input_dir() {
    let output = tempfile::tempdir().unwrap();
    let result = batch_convert_to_pdf(
        output.path().join("absent"),
        output.path(),
        &MockConverter::new(),
    );
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_report_serializes_with_status_tag() {
    let input = input_dir();
    let output = tempfile::tempdir().unwrap();
    fs::write(output.path().join("a.pdf"), b"done").unwrap();

    let report = batch_convert_to_pdf(input.path(), output.path(), &MockConverter::new()).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["outcomes"][0]["status"], "skipped");
    assert_eq!(json["outcomes"][1]["status"], "converted");
}
