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

//! Printer for identifier lists.
//!
//! Identifier lists are plain text with one identifier per line and no
//! header. Every line, including the last, ends in `\n`.
//!
use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;

use log::info;

use crate::PreconditionError;

type E = Box<dyn std::error::Error>;

/// Format a single identifier line
///
/// Writes `identifier` followed by a newline to `conn`.
///
pub fn format_identifier_line<W: Write>(
    identifier: &str,
    conn: &mut W,
) -> Result<(), E> {
    let mut formatted: String = identifier.to_string();
    formatted += "\n";

    conn.write_all(formatted.as_bytes())?;
    Ok(())
}

/// Format many identifiers, one per line
///
/// Writes the lines in the order given by `identifiers` and flushes `conn`.
///
/// Returns the number of lines written.
///
pub fn format_identifier_list<'a, I, W>(
    identifiers: I,
    conn: &mut W,
) -> Result<usize, E>
where
    I: IntoIterator<Item = &'a str>,
    W: Write,
{
    let mut n_lines: usize = 0;
    for identifier in identifiers {
        format_identifier_line(identifier, conn)?;
        info!("Added to list: {}", identifier);
        n_lines += 1;
    }
    conn.flush()?;
    Ok(n_lines)
}

/// Write an identifier list to `path`
///
/// Creates the file or truncates an existing one. Any failure to create or
/// write the file is returned as [PreconditionError::OutputFile].
///
/// Returns the number of lines written.
///
pub fn write_identifier_list<'a, I>(
    identifiers: I,
    path: &Path,
) -> Result<usize, E>
where
    I: IntoIterator<Item = &'a str>,
{
    let to_precondition = |source: std::io::Error| {
        PreconditionError::OutputFile{ path: path.to_path_buf(), source }
    };

    let f = File::create(path).map_err(to_precondition)?;
    let mut conn_out = BufWriter::new(f);

    // Unwrap the boxed error so that I/O failures keep the output path
    match format_identifier_list(identifiers, &mut conn_out) {
        Ok(n_lines) => Ok(n_lines),
        Err(e) => match e.downcast::<std::io::Error>() {
            Ok(source) => Err(Box::new(to_precondition(*source))),
            Err(e) => Err(e),
        },
    }
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn format_identifier_line() {
        use super::format_identifier_line;

        let mut got: Vec<u8> = Vec::new();
        format_identifier_line("sample_01.fa", &mut got).unwrap();

        assert_eq!(got, b"sample_01.fa\n".to_vec());
    }

    #[test]
    fn format_identifier_list_keeps_input_order() {
        use super::format_identifier_list;

        let identifiers = vec!["OG0000003.fa", "OG0000001.fa", "OG0000002.fa"];

        let mut got: Vec<u8> = Vec::new();
        let n_lines = format_identifier_list(identifiers.iter().copied(), &mut got).unwrap();

        assert_eq!(n_lines, 3);
        assert_eq!(got, b"OG0000003.fa\nOG0000001.fa\nOG0000002.fa\n".to_vec());
    }

    #[test]
    fn format_empty_identifier_list() {
        use super::format_identifier_list;

        let mut got: Vec<u8> = Vec::new();
        let n_lines = format_identifier_list(Vec::<&str>::new(), &mut got).unwrap();

        assert_eq!(n_lines, 0);
        assert!(got.is_empty());
    }

    #[test]
    fn write_identifier_list_overwrites_existing_file() {
        use super::write_identifier_list;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("valid_fasta.txt");
        std::fs::write(&path, "stale.fa\nlines.fa\nfrom.fa\nbefore.fa\n").unwrap();

        let n_lines = write_identifier_list(vec!["a.fa", "b.fa"], &path).unwrap();

        assert_eq!(n_lines, 2);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a.fa\nb.fa\n");
    }

    #[test]
    fn write_identifier_list_unwritable_path() {
        use super::write_identifier_list;
        use crate::PreconditionError;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("valid_fasta.txt");

        let got = write_identifier_list(vec!["a.fa"], &path);

        let err = got.unwrap_err();
        assert!(err.downcast_ref::<PreconditionError>().is_some());
    }
}
