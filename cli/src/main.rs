//! docproc CLI - office document batch utilities

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docproc::{
    find_files, plan_batch, read_tables, rename_folders, run_batch, try_extract_text, Alignment,
    BatchOptions, CellEdit, EntryKind, ExtractOptions, FileOutcome, LibreOfficeConverter,
    NameFilter, PageSelection,
};

#[derive(Parser)]
#[command(name = "docproc")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Batch utilities for PDF and Word documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract plain text from a PDF
    Text {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Text inserted between pages
        #[arg(long, default_value = "")]
        separator: String,

        /// Fail on the first unreadable page instead of skipping it
        #[arg(long)]
        strict: bool,
    },

    /// List entries whose names contain all required substrings
    Find {
        /// Directory to search
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Substring the name must contain (repeatable)
        #[arg(short, long = "require", value_name = "TEXT")]
        require: Vec<String>,

        /// Substring the name must not contain (repeatable)
        #[arg(short = 'x', long = "exclude", value_name = "TEXT")]
        exclude: Vec<String>,

        /// Kind of entries to list
        #[arg(long, value_enum, default_value = "any")]
        kind: KindArg,

        /// Compare names byte for byte, without Unicode normalization
        #[arg(long)]
        no_normalize: bool,
    },

    /// Remove a substring from every folder name below a root
    RenameDirs {
        /// Root directory (never renamed itself)
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        /// Substring to remove
        #[arg(value_name = "TEXT")]
        pattern: String,
    },

    /// Show the tables of a Word document
    Tables {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Print one column of the first table of a Word document
    Column {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Zero-based column index
        #[arg(value_name = "COLUMN")]
        column: usize,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Overwrite one table cell of a Word document in place
    SetCell {
        /// DOCX file to edit
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Zero-based table index
        #[arg(value_name = "TABLE")]
        table: usize,

        /// Zero-based row index
        #[arg(value_name = "ROW")]
        row: usize,

        /// Zero-based column index
        #[arg(value_name = "COLUMN")]
        column: usize,

        /// New cell text
        #[arg(value_name = "VALUE")]
        value: String,

        /// Paragraph alignment
        #[arg(long, value_enum, default_value = "center")]
        align: AlignArg,
    },

    /// Convert every Word document of a folder to PDF
    Convert {
        /// Folder containing the documents
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Folder receiving the PDFs
        #[arg(value_name = "OUTPUT_DIR")]
        output: PathBuf,

        /// LibreOffice executable
        #[arg(long, env = "DOCPROC_SOFFICE", default_value = "soffice")]
        soffice: PathBuf,

        /// Input extension to convert (repeatable)
        #[arg(long = "ext", value_name = "EXT", default_value = "docx")]
        extensions: Vec<String>,

        /// Reconvert files whose PDF already exists
        #[arg(long)]
        overwrite: bool,

        /// List the planned conversions without running them
        #[arg(long)]
        dry_run: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum KindArg {
    /// Files and directories
    Any,
    /// Files only
    Files,
    /// Directories only
    Dirs,
}

impl From<KindArg> for EntryKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Any => EntryKind::Any,
            KindArg::Files => EntryKind::Files,
            KindArg::Dirs => EntryKind::Directories,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum AlignArg {
    Left,
    Center,
    Right,
    Justify,
}

impl From<AlignArg> for Alignment {
    fn from(align: AlignArg) -> Self {
        match align {
            AlignArg::Left => Alignment::Left,
            AlignArg::Center => Alignment::Center,
            AlignArg::Right => Alignment::Right,
            AlignArg::Justify => Alignment::Justify,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Text {
            input,
            output,
            pages,
            separator,
            strict,
        } => cmd_text(&input, output.as_deref(), pages.as_deref(), separator, strict),
        Commands::Find {
            dir,
            require,
            exclude,
            kind,
            no_normalize,
        } => cmd_find(&dir, require, exclude, kind, no_normalize),
        Commands::RenameDirs { root, pattern } => cmd_rename_dirs(&root, &pattern),
        Commands::Tables { input, json } => cmd_tables(&input, json),
        Commands::Column {
            input,
            column,
            json,
        } => cmd_column(&input, column, json),
        Commands::SetCell {
            input,
            table,
            row,
            column,
            value,
            align,
        } => cmd_set_cell(&input, table, row, column, value, align),
        Commands::Convert {
            input,
            output,
            soffice,
            extensions,
            overwrite,
            dry_run,
        } => cmd_convert(&input, &output, soffice, extensions, overwrite, dry_run),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    pages: Option<&str>,
    separator: String,
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let page_selection = pages.map_or(Ok(PageSelection::All), PageSelection::parse)?;

    let mut options = ExtractOptions::new()
        .with_pages(page_selection)
        .with_page_separator(separator);
    if !strict {
        options = options.lenient();
    }

    let text = try_extract_text(input, &options)?;

    if let Some(path) = output {
        fs::write(path, &text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }

    Ok(())
}

fn cmd_find(
    dir: &Path,
    require: Vec<String>,
    exclude: Vec<String>,
    kind: KindArg,
    no_normalize: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = NameFilter::new()
        .with_required(require)
        .with_excluded(exclude)
        .with_kind(kind.into())
        .with_unicode_normalization(!no_normalize);

    let names = find_files(dir, &filter)?;
    for name in &names {
        println!("{}", name);
    }
    eprintln!("{} {} matches", "Found".green(), names.len());

    Ok(())
}

fn cmd_rename_dirs(root: &Path, pattern: &str) -> Result<(), Box<dyn std::error::Error>> {
    let report = rename_folders(root, pattern)?;

    for renamed in &report.renamed {
        println!(
            "{} {} {} {}",
            "Renamed".green(),
            renamed.from.display(),
            "->".dimmed(),
            renamed.to.display()
        );
    }
    println!(
        "\n{} {} renamed, {} folders visited",
        "Done!".green().bold(),
        report.renamed_count(),
        report.directories_visited
    );

    Ok(())
}

fn cmd_tables(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let tables = read_tables(input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tables)?);
        return Ok(());
    }

    if tables.is_empty() {
        println!("{}", "No tables found".yellow());
        return Ok(());
    }

    for (i, table) in tables.iter().enumerate() {
        println!(
            "{} {} ({} rows x {} columns)",
            "Table".cyan().bold(),
            i,
            table.row_count(),
            table.column_count()
        );
        println!("{}", "─".repeat(40).dimmed());
        println!("{}", table.plain_text());
        println!();
    }

    Ok(())
}

fn cmd_column(input: &Path, column: usize, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let values = docproc::extract_column(input, column)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&values)?);
    } else {
        for value in &values {
            println!("{}", value);
        }
    }

    Ok(())
}

fn cmd_set_cell(
    input: &Path,
    table: usize,
    row: usize,
    column: usize,
    value: String,
    align: AlignArg,
) -> Result<(), Box<dyn std::error::Error>> {
    CellEdit::new(value)
        .with_alignment(align.into())
        .apply(input, table, row, column)?;

    println!(
        "{} table {} cell ({}, {}) of {}",
        "Updated".green(),
        table,
        row,
        column,
        input.display()
    );

    Ok(())
}

fn cmd_convert(
    input: &Path,
    output: &Path,
    soffice: PathBuf,
    extensions: Vec<String>,
    overwrite: bool,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = BatchOptions::new()
        .with_extensions(extensions)
        .with_overwrite(overwrite);
    let plan = plan_batch(input, output, &options)?;

    if plan.is_empty() {
        println!("{}", "Nothing to convert".yellow());
        return Ok(());
    }

    if dry_run {
        for job in &plan.jobs {
            let note = if !overwrite && job.output.exists() {
                " (exists, skip)".dimmed().to_string()
            } else {
                String::new()
            };
            println!(
                "{} {} {}{}",
                job.input.display(),
                "->".dimmed(),
                job.output.display(),
                note
            );
        }
        return Ok(());
    }

    let converter = LibreOfficeConverter::with_program(soffice);
    log::debug!(
        "Converting {} files with {}",
        plan.len(),
        converter.program().display()
    );

    let pb = ProgressBar::new(plan.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let report = run_batch(&plan, &converter, &options, |outcome| {
        let name = outcome
            .input()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match outcome {
            FileOutcome::Converted { .. } => pb.set_message(name),
            FileOutcome::Skipped { .. } => pb.set_message(format!("{} (skipped)", name)),
            FileOutcome::Failed { error, .. } => {
                pb.println(format!("{} {}: {}", "Failed".red(), name, error))
            }
        }
        pb.inc(1);
    })?;

    pb.finish_with_message("Done!");

    println!(
        "\n{} {} converted, {} skipped, {} failed",
        "Summary:".green().bold(),
        report.converted(),
        report.skipped(),
        report.failed()
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docproc".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF and Word document batch utilities");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/docproc".dimmed());
    println!("License: MIT");
}
