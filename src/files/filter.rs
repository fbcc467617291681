//! Filename search over the immediate entries of a directory.

use std::fs;
use std::path::Path;

use unicode_normalization::UnicodeNormalization;

use crate::error::Result;

/// Which directory entries a [`NameFilter`] considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryKind {
    /// Files, directories and anything else
    #[default]
    Any,
    /// Regular files only
    Files,
    /// Directories only
    Directories,
}

/// Inclusion/exclusion criteria on entry names.
///
/// A name matches when it contains every required substring and none of the
/// excluded ones. An empty required list accepts every name; an empty
/// excluded list rejects none.
///
/// # Example
///
/// ```
/// use docproc::NameFilter;
///
/// let filter = NameFilter::new().require("2024").require("report").exclude("draft");
/// assert!(filter.matches("2024_annual_report.docx"));
/// assert!(!filter.matches("2024_report_draft.docx"));
/// ```
#[derive(Debug, Clone)]
pub struct NameFilter {
    /// Substrings that must all be present
    pub required: Vec<String>,

    /// Substrings that must all be absent
    pub excluded: Vec<String>,

    /// Which entries qualify
    pub kind: EntryKind,

    /// Compare names in Unicode NFC form
    pub normalize_unicode: bool,
}

impl NameFilter {
    /// Create a filter that accepts every name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required substring.
    pub fn require(mut self, s: impl Into<String>) -> Self {
        self.required.push(s.into());
        self
    }

    /// Add an excluded substring.
    pub fn exclude(mut self, s: impl Into<String>) -> Self {
        self.excluded.push(s.into());
        self
    }

    /// Add several required substrings.
    pub fn with_required<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required.extend(items.into_iter().map(Into::into));
        self
    }

    /// Add several excluded substrings.
    pub fn with_excluded<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded.extend(items.into_iter().map(Into::into));
        self
    }

    /// Restrict the kind of entries considered.
    pub fn with_kind(mut self, kind: EntryKind) -> Self {
        self.kind = kind;
        self
    }

    /// Enable or disable NFC normalization before comparing.
    pub fn with_unicode_normalization(mut self, enabled: bool) -> Self {
        self.normalize_unicode = enabled;
        self
    }

    /// Check a single name against the criteria.
    pub fn matches(&self, name: &str) -> bool {
        if self.normalize_unicode {
            let name = nfc(name);
            self.required.iter().all(|s| name.contains(nfc(s).as_str()))
                && !self.excluded.iter().any(|s| name.contains(nfc(s).as_str()))
        } else {
            self.required.iter().all(|s| name.contains(s.as_str()))
                && !self.excluded.iter().any(|s| name.contains(s.as_str()))
        }
    }

    fn accepts_kind(&self, file_type: fs::FileType) -> bool {
        match self.kind {
            EntryKind::Any => true,
            EntryKind::Files => file_type.is_file(),
            EntryKind::Directories => file_type.is_dir(),
        }
    }
}

impl Default for NameFilter {
    fn default() -> Self {
        Self {
            required: Vec::new(),
            excluded: Vec::new(),
            kind: EntryKind::Any,
            normalize_unicode: true,
        }
    }
}

fn nfc(s: &str) -> String {
    s.nfc().collect()
}

/// List the immediate entries of `dir` whose names match `filter`.
///
/// The search is not recursive. Names are returned sorted. Errors listing
/// the directory are propagated.
///
/// # Example
///
/// ```no_run
/// use docproc::{find_files, NameFilter};
///
/// let filter = NameFilter::new().require(".docx").exclude("~$");
/// for name in find_files("./contracts", &filter)? {
///     println!("{}", name);
/// }
/// # Ok::<(), docproc::Error>(())
/// ```
pub fn find_files<P: AsRef<Path>>(dir: P, filter: &NameFilter) -> Result<Vec<String>> {
    let dir = dir.as_ref();
    let mut matching = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();

        if !filter.matches(&name) {
            continue;
        }
        if filter.kind != EntryKind::Any && !filter.accepts_kind(entry.file_type()?) {
            continue;
        }

        matching.push(name);
    }

    matching.sort();
    log::debug!(
        "{} entries of {} match the filter",
        matching.len(),
        dir.display()
    );
    Ok(matching)
}
