//! LibreOffice-backed PDF converter.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::NamedTempFile;
use url::Url;

use crate::error::{Error, Result};

use super::{pdf_file_name, PdfConverter};

/// Converts documents by running `soffice --headless --convert-to pdf`.
///
/// Each call uses a throwaway user profile so conversions do not collide
/// with a running LibreOffice instance.
#[derive(Debug, Clone)]
pub struct LibreOfficeConverter {
    program: PathBuf,
}

impl LibreOfficeConverter {
    /// Use `soffice` from `PATH`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific LibreOffice executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The executable that will be run.
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn failure(&self, input: &Path, message: impl Into<String>) -> Error {
        Error::Conversion {
            path: input.to_path_buf(),
            message: message.into(),
        }
    }
}

impl Default for LibreOfficeConverter {
    fn default() -> Self {
        Self {
            program: PathBuf::from("soffice"),
        }
    }
}

impl PdfConverter for LibreOfficeConverter {
    fn name(&self) -> &str {
        "libreoffice"
    }

    fn convert(&self, input: &Path, output: &Path) -> Result<()> {
        let stem = input
            .file_stem()
            .ok_or_else(|| self.failure(input, "input has no file name"))?;

        let workdir = tempfile::tempdir()?;
        let out_dir = workdir.path().join("out");
        fs::create_dir_all(&out_dir)?;
        let profile = Url::from_directory_path(workdir.path().join("profile"))
            .map_err(|_| self.failure(input, "cannot build profile URL"))?;

        log::debug!(
            "Running {} on {}",
            self.program.display(),
            input.display()
        );
        let result = Command::new(&self.program)
            .arg("--headless")
            .arg("--norestore")
            .arg(format!("-env:UserInstallation={}", profile))
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(&out_dir)
            .arg(input)
            .output()
            .map_err(|e| {
                self.failure(
                    input,
                    format!("failed to run {}: {}", self.program.display(), e),
                )
            })?;

        let stderr = String::from_utf8_lossy(&result.stderr);
        if !result.status.success() {
            return Err(self.failure(
                input,
                format!("{} exited with {}: {}", self.program.display(), result.status, stderr.trim()),
            ));
        }

        let produced = out_dir.join(pdf_file_name(stem));
        if !produced.is_file() {
            return Err(self.failure(input, format!("no PDF produced: {}", stderr.trim())));
        }

        install_output(&produced, output)
    }
}

/// Copy `produced` to `output` through a temporary file in the output
/// directory, so `output` either appears complete or not at all.
fn install_output(produced: &Path, output: &Path) -> Result<()> {
    let dir = match output.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent)?;
            parent
        }
        None => Path::new("."),
    };

    let mut source = File::open(produced)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    io::copy(&mut source, tmp.as_file_mut())?;
    tmp.as_file().sync_all()?;
    tmp.as_file()
        .set_permissions(source.metadata()?.permissions())?;
    tmp.persist(output).map_err(|e| Error::Io(e.error))?;
    Ok(())
}
