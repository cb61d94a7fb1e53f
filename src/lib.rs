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

//! orthosieve is a library and a command-line client for turning the tabular
//! output of homology searches and ortholog clustering into lists of
//! sequence files for downstream analyses.
//!
//! The following inputs are supported:
//!   - Directories of [BLASTP](https://blast.ncbi.nlm.nih.gov) result tables
//!     with a `salltitles` column, one table per query sequence file.
//!   - `Orthogroups.GeneCount.tsv` from [OrthoFinder](https://github.com/davidemms/OrthoFinder).
//!   - `Orthogroups_UnassignedGenes.tsv` from OrthoFinder.
//!
//! All inputs are tab-separated with a header row. All outputs are plain
//! text with one sequence file name per line.
//!
//! ## Usage
//!
//! ### Command line
//!
//! The orthosieve CLI supports the following subcommands:
//!   - `orthosieve blastp` keep result tables where every subject title contains a keyword.
//!   - `orthosieve species-specific` keep orthogroups with genes from only one species.
//!   - `orthosieve unassigned` keep orthogroups holding an unassigned gene from one species.
//!
//! ### Rust API
//!
//! The path based functions in this module run a filter from input files to
//! an output file. For operating on [Read](std::io::Read) implementations
//! directly, see:
//!
//!   - [KeywordResultFilter](blastp::KeywordResultFilter): evaluates single BLASTP result tables or whole directories.
//!   - [species_specific_orthogroups](orthogroups::species_specific_orthogroups) and [unassigned_genes](orthogroups::unassigned_genes).
//!   - [TableReader](table::TableReader): iterates over the rows of any tab-separated table with a header.
//!

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;

use log::info;

pub mod blastp;
pub mod identifier;
pub mod keyword;
pub mod orthogroups;
pub mod printer;
pub mod table;

pub use blastp::FileOutcome;
pub use blastp::FilterReport;
pub use blastp::KeywordResultFilter;

type E = Box<dyn std::error::Error>;

/// Failures that stop a run before or after all inputs are processed.
#[derive(Debug)]
pub enum PreconditionError {
    /// The input directory could not be listed.
    InputDirectory { path: PathBuf, source: std::io::Error },
    /// The input table could not be opened.
    InputFile { path: PathBuf, source: std::io::Error },
    /// The output file could not be created or written.
    OutputFile { path: PathBuf, source: std::io::Error },
}

impl std::fmt::Display for PreconditionError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PreconditionError::InputDirectory{ path, source } => write!(f, "cannot read input directory {}: {}", path.display(), source),
            PreconditionError::InputFile{ path, source } => write!(f, "cannot open input file {}: {}", path.display(), source),
            PreconditionError::OutputFile{ path, source } => write!(f, "cannot write output file {}: {}", path.display(), source),
        }
    }
}

impl std::error::Error for PreconditionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PreconditionError::InputDirectory{ source, .. } => Some(source),
            PreconditionError::InputFile{ source, .. } => Some(source),
            PreconditionError::OutputFile{ source, .. } => Some(source),
        }
    }
}

/// Filter a directory of BLASTP results by keyword and save the list.
///
/// Runs [KeywordResultFilter] with the default `_result.txt` suffix and
/// `.fa` extension. See [filter_blastp_dir].
///
/// ## Usage
///
/// ```rust
/// use orthosieve::blastp_filtering;
///
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::write(dir.path().join("a_result.txt"), "qseqid\tsalltitles\ng1\tvenom allergen 5\ng2\tVenom protease<>venom lipase\n").unwrap();
/// std::fs::write(dir.path().join("b_result.txt"), "qseqid\tsalltitles\ng1\tvenom allergen 5\ng2\tlysozyme\n").unwrap();
///
/// let output = dir.path().join("valid_fasta.txt");
/// let report = blastp_filtering(dir.path(), &output, "venom").unwrap();
///
/// assert_eq!(std::fs::read_to_string(&output).unwrap(), "a.fa\n");
/// assert_eq!(report.skipped, vec!["b_result.txt".to_string()]);
/// ```
///
pub fn blastp_filtering(
    blastp_dir: &Path,
    output_list: &Path,
    keyword: &str,
) -> Result<FilterReport, E> {
    let filter = KeywordResultFilter::new(keyword);
    filter_blastp_dir(&filter, blastp_dir, output_list)
}

/// Run `filter` on the result tables in `blastp_dir` and save the list.
///
/// Writes the identifiers of the accepted tables to `output_list` in
/// ascending order, one per line, replacing any existing file. The list is
/// written even if no table was accepted.
///
/// ## Errors
///
/// Returns [PreconditionError] if `blastp_dir` cannot be listed or
/// `output_list` cannot be written. Nothing is written in the first case.
/// Errors in individual tables do not fail the run; they are listed in the
/// returned [FilterReport].
///
pub fn filter_blastp_dir(
    filter: &KeywordResultFilter,
    blastp_dir: &Path,
    output_list: &Path,
) -> Result<FilterReport, E> {
    let report = filter.scan_dir(blastp_dir)?;
    printer::write_identifier_list(report.identifiers.iter().map(|id| id.as_str()), output_list)?;
    info!("Valid FASTA file list saved to: {}", output_list.display());
    Ok(report)
}

fn open_table(
    path: &Path,
) -> Result<BufReader<File>, PreconditionError> {
    let f = File::open(path).map_err(|source| PreconditionError::InputFile{ path: path.to_path_buf(), source })?;
    Ok(BufReader::new(f))
}

/// Save the species-specific orthogroups in `file_path` to `output_file`.
///
/// Returns the number of orthogroups written.
///
/// ## Usage
///
/// ```rust
/// use orthosieve::filter_species_specific;
///
/// let dir = tempfile::tempdir().unwrap();
/// let input = dir.path().join("Orthogroups.GeneCount.tsv");
/// std::fs::write(&input, "Orthogroup\tApis_mellifera\tMelipona_bicolor\tTotal\nOG0000000\t12\t9\t21\nOG0000001\t0\t7\t7\n").unwrap();
///
/// let output = dir.path().join("species_specific_OGs.txt");
/// let n_written = filter_species_specific(&input, "Melipona_bicolor", &output).unwrap();
///
/// assert_eq!(n_written, 1);
/// assert_eq!(std::fs::read_to_string(&output).unwrap(), "OG0000001.fa\n");
/// ```
///
pub fn filter_species_specific(
    file_path: &Path,
    species_column: &str,
    output_file: &Path,
) -> Result<usize, E> {
    let conn_in = open_table(file_path)?;
    let identifiers = orthogroups::species_specific_orthogroups(species_column, conn_in)?;
    let n_written = printer::write_identifier_list(identifiers.iter().map(|id| id.as_str()), output_file)?;
    info!("Output saved to: {}", output_file.display());
    Ok(n_written)
}

/// Save the orthogroups with unassigned genes from `species_column` in
/// `file_path` to `output_file`.
///
/// Returns the number of orthogroups written.
pub fn filter_unassigned_genes(
    file_path: &Path,
    species_column: &str,
    output_file: &Path,
) -> Result<usize, E> {
    let conn_in = open_table(file_path)?;
    let identifiers = orthogroups::unassigned_genes(species_column, conn_in)?;
    let n_written = printer::write_identifier_list(identifiers.iter().map(|id| id.as_str()), output_file)?;
    info!("Output saved to: {}", output_file.display());
    Ok(n_written)
}

// Tests
#[cfg(test)]
mod tests {

    fn write_table(
        dir: &std::path::Path,
        file_name: &str,
        contents: &str,
    ) {
        std::fs::write(dir.join(file_name), contents).unwrap();
    }

    #[test]
    fn blastp_filtering_end_to_end() {
        use super::blastp_filtering;

        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("blastp");
        std::fs::create_dir(&input).unwrap();
        write_table(&input, "a_result.txt", "qseqid\tsseqid\tsalltitles\ng1\ts1\tvenom allergen 5\ng2\ts2\tvenom serine protease<>Venom protease 2\n");
        write_table(&input, "b_result.txt", "qseqid\tsseqid\tsalltitles\ng1\ts1\tvenom allergen 5\ng2\ts2\tlysozyme c-1\n");

        let output = dir.path().join("valid_fasta.txt");
        blastp_filtering(&input, &output, "venom").unwrap();

        assert_eq!(std::fs::read_to_string(&output).unwrap(), "a.fa\n");
    }

    #[test]
    fn blastp_filtering_output_is_sorted_and_deterministic() {
        use super::blastp_filtering;

        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("blastp");
        std::fs::create_dir(&input).unwrap();
        for name in ["sample_10", "Sample_02", "sample_01", "sample_2"] {
            write_table(&input, &format!("{}_result.txt", name), "salltitles\nKinase domain<>protein kinase\n");
        }

        let output = dir.path().join("valid_fasta.txt");
        blastp_filtering(&input, &output, "kinase").unwrap();
        let first = std::fs::read(&output).unwrap();
        blastp_filtering(&input, &output, "kinase").unwrap();
        let second = std::fs::read(&output).unwrap();

        assert_eq!(first, second);
        assert_eq!(String::from_utf8(first).unwrap(), "Sample_02.fa\nsample_01.fa\nsample_10.fa\nsample_2.fa\n");
    }

    #[test]
    fn blastp_filtering_skips_malformed_table() {
        use super::blastp_filtering;

        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("blastp");
        std::fs::create_dir(&input).unwrap();
        write_table(&input, "good_result.txt", "qseqid\tsalltitles\ng1\tvenom allergen\n");
        write_table(&input, "bad_result.txt", "qseqid\tstitle\ng1\tvenom allergen\n");

        let output = dir.path().join("valid_fasta.txt");
        let report = blastp_filtering(&input, &output, "venom").unwrap();

        assert_eq!(std::fs::read_to_string(&output).unwrap(), "good.fa\n");
        assert_eq!(report.errored.len(), 1);
        assert_eq!(report.errored[0].0, "bad_result.txt");
    }

    #[test]
    fn blastp_filtering_empty_directory_writes_empty_list() {
        use super::blastp_filtering;

        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("blastp");
        std::fs::create_dir(&input).unwrap();
        write_table(&input, "summary.tsv", "salltitles\nvenom\n");

        let output = dir.path().join("valid_fasta.txt");
        std::fs::write(&output, "stale.fa\n").unwrap();
        let report = blastp_filtering(&input, &output, "venom").unwrap();

        assert_eq!(report.n_processed(), 0);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "");
    }

    #[test]
    fn blastp_filtering_missing_directory_writes_nothing() {
        use super::blastp_filtering;
        use super::PreconditionError;

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("valid_fasta.txt");

        let err = blastp_filtering(&dir.path().join("missing"), &output, "venom").unwrap_err();

        assert!(matches!(err.downcast_ref::<PreconditionError>(), Some(PreconditionError::InputDirectory{ .. })));
        assert!(!output.exists());
    }

    #[test]
    fn blastp_filtering_unwritable_output() {
        use super::blastp_filtering;
        use super::PreconditionError;

        let dir = tempfile::tempdir().unwrap();
        write_table(dir.path(), "a_result.txt", "salltitles\nvenom\n");
        let output = dir.path().join("no_such_dir").join("valid_fasta.txt");

        let err = blastp_filtering(dir.path(), &output, "venom").unwrap_err();

        assert!(matches!(err.downcast_ref::<PreconditionError>(), Some(PreconditionError::OutputFile{ .. })));
    }

    #[test]
    fn filter_unassigned_genes_writes_list() {
        use super::filter_unassigned_genes;

        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Orthogroups_UnassignedGenes.tsv");
        std::fs::write(&input, "Orthogroup\tApis_mellifera\tMelipona_bicolor\nOG0012000\tXP_006557123.1\t\nOG0012001\t\tXP_046836012.1\n").unwrap();

        let output = dir.path().join("unassigned_OGs.txt");
        let n_written = filter_unassigned_genes(&input, "Melipona_bicolor", &output).unwrap();

        assert_eq!(n_written, 1);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "OG0012001.fa\n");
    }

    #[test]
    fn filter_species_specific_missing_input() {
        use super::filter_species_specific;
        use super::PreconditionError;

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("species_specific_OGs.txt");

        let err = filter_species_specific(&dir.path().join("Orthogroups.GeneCount.tsv"), "Melipona_bicolor", &output).unwrap_err();

        assert!(matches!(err.downcast_ref::<PreconditionError>(), Some(PreconditionError::InputFile{ .. })));
        assert!(!output.exists());
    }
}
