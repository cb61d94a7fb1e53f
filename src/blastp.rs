// orthosieve: Filter BLASTP and OrthoFinder outputs into identifier lists.
//
// Copyright 2025 Tommi Mäklin [tommi@maklin.fi].
//
// Copyrights in this project are retained by contributors. No copyright assignment
// is required to contribute to this project.
//
// Except as otherwise noted (below and/or in individual files), this
// project is licensed under the Apache License, Version 2.0
// <LICENSE-APACHE> or <http://www.apache.org/licenses/LICENSE-2.0> or
// the MIT license, <LICENSE-MIT> or <http://opensource.org/licenses/MIT>,
// at your option.
//

//! Keyword filter for directories of BLASTP result tables.
//!
//! Each `<name>_result.txt` table in a directory is kept if every subject
//! title of every row contains the keyword. Kept tables are reported by the
//! name of the sequence file they were searched from, `<name>.fa`.
//!
//! A table that cannot be read, has no `salltitles` column, or has a
//! malformed row is reported as [FileOutcome::Errored] and the scan moves on
//! to the next table.
//!
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use log::error;
use log::info;
use log::warn;

use crate::PreconditionError;
use crate::identifier::derive_identifier;
use crate::identifier::is_result_file;
use crate::identifier::DEFAULT_EXTENSION;
use crate::identifier::DEFAULT_SUFFIX;
use crate::keyword::KeywordMatcher;
use crate::table::TableReader;

type E = Box<dyn std::error::Error>;

/// Column holding the `<>` separated subject titles.
pub const TITLES_COLUMN: &str = "salltitles";

/// Decision made for a single result table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileOutcome {
    /// All titles matched, contains the derived identifier.
    Accepted(String),
    /// At least one title did not match.
    Skipped,
    /// The file name does not end with the result table suffix.
    Ignored,
    /// The table could not be evaluated, contains the cause.
    Errored(String),
}

/// Summary of a directory scan.
///
/// File names are listed in the order they were processed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterReport {
    /// Identifiers of accepted tables in ascending order.
    pub identifiers: BTreeSet<String>,
    pub accepted: Vec<String>,
    pub skipped: Vec<String>,
    /// File name and cause.
    pub errored: Vec<(String, String)>,
}

impl FilterReport {
    pub fn record(
        &mut self,
        file_name: String,
        outcome: FileOutcome,
    ) {
        match outcome {
            FileOutcome::Accepted(identifier) => {
                self.identifiers.insert(identifier);
                self.accepted.push(file_name);
            },
            FileOutcome::Skipped => self.skipped.push(file_name),
            FileOutcome::Errored(cause) => self.errored.push((file_name, cause)),
            FileOutcome::Ignored => {},
        }
    }

    pub fn n_processed(&self) -> usize {
        self.accepted.len() + self.skipped.len() + self.errored.len()
    }
}

#[derive(Clone, Debug)]
pub struct KeywordResultFilter {
    matcher: KeywordMatcher,
    suffix: String,
    extension: String,
}

impl KeywordResultFilter {
    pub fn new(
        keyword: &str,
    ) -> Self {
        KeywordResultFilter{
            matcher: KeywordMatcher::new(keyword),
            suffix: DEFAULT_SUFFIX.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Only consider files ending in `suffix`.
    pub fn with_suffix(
        mut self,
        suffix: &str,
    ) -> Self {
        self.suffix = suffix.to_string();
        self
    }

    /// Replace the suffix with `extension` in the derived identifiers.
    pub fn with_extension(
        mut self,
        extension: &str,
    ) -> Self {
        self.extension = extension.to_string();
        self
    }

    pub fn keyword(&self) -> &str {
        self.matcher.keyword()
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Check that every title in every row contains the keyword
    ///
    /// Reads `conn` to the end even after the first mismatch, so a row with
    /// more fields than the header is still returned as an error.
    ///
    /// Rows with fewer fields than the header are accepted. If such a row
    /// ends before the titles column, its titles are a single empty entry.
    ///
    /// A table with a header and no rows matches.
    ///
    pub fn table_matches<R: Read>(
        &self,
        conn: R,
    ) -> Result<bool, E> {
        let mut table = TableReader::new(conn)?;
        let titles = table.header().position(TITLES_COLUMN)?;

        let mut all_match = true;
        for row in table.by_ref() {
            let row = row?;
            all_match = all_match && self.matcher.matches_titles(row.field(titles));
        }

        Ok(all_match)
    }

    /// Evaluate the table in `conn` read from `file_name`
    ///
    /// Logs the decision. Returns [FileOutcome::Ignored] without reading
    /// `conn` if `file_name` does not end with the configured suffix.
    ///
    pub fn classify<R: Read>(
        &self,
        file_name: &str,
        conn: R,
    ) -> FileOutcome {
        let Some(identifier) = derive_identifier(file_name, &self.suffix, &self.extension) else {
            return FileOutcome::Ignored
        };

        match self.table_matches(conn) {
            Ok(true) => {
                info!("Valid BLASTP result identified: {}", file_name);
                FileOutcome::Accepted(identifier)
            },
            Ok(false) => {
                info!("File skipped (does not match keyword '{}'): {}", self.keyword(), file_name);
                FileOutcome::Skipped
            },
            Err(e) => {
                error!("Error processing {}: {}", file_name, e);
                FileOutcome::Errored(e.to_string())
            },
        }
    }

    fn classify_file(
        &self,
        file_name: &str,
        path: &Path,
    ) -> FileOutcome {
        match File::open(path) {
            Ok(f) => self.classify(file_name, BufReader::new(f)),
            Err(e) => {
                error!("Error processing {}: {}", file_name, e);
                FileOutcome::Errored(e.to_string())
            },
        }
    }

    /// Evaluate every result table in `dir`
    ///
    /// Files are processed in ascending order of name. Files that do not end
    /// with the configured suffix are not opened and do not appear in the
    /// report.
    ///
    /// ## Errors
    ///
    /// Returns [PreconditionError::InputDirectory] if `dir` cannot be
    /// listed. Errors in individual tables are recorded in the returned
    /// [FilterReport] instead.
    ///
    pub fn scan_dir(
        &self,
        dir: &Path,
    ) -> Result<FilterReport, E> {
        let to_precondition = |source: std::io::Error| {
            PreconditionError::InputDirectory{ path: dir.to_path_buf(), source }
        };

        let mut entries: Vec<(String, PathBuf)> = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(to_precondition)? {
            let entry = entry.map_err(to_precondition)?;
            let file_name = entry.file_name().to_string_lossy().to_string();
            if is_result_file(&file_name, &self.suffix) {
                entries.push((file_name, entry.path()));
            }
        }
        entries.sort();

        let mut report = FilterReport::default();
        for (file_name, path) in entries {
            let outcome = self.classify_file(&file_name, &path);
            report.record(file_name, outcome);
        }

        info!("Processed {} result tables: {} accepted, {} skipped, {} errored",
              report.n_processed(), report.accepted.len(), report.skipped.len(), report.errored.len());
        if report.identifiers.is_empty() {
            warn!("No result tables in {} matched keyword '{}'", dir.display(), self.keyword());
        }

        Ok(report)
    }
}
