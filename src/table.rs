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

//! Reader for tab-separated tables with a header row.
//!
//! [TableReader] wraps a [csv::Reader] configured for tab-separated input
//! and yields one [Row] at a time. Fields are looked up by column name
//! through the shared [Header], so a missing column is an explicit
//! [MissingColumn] error instead of an out-of-bounds access.
//!
//! Rows with fewer fields than the header are padded with empty fields.
//! Rows with more fields than the header and fields that are not valid
//! UTF-8 are returned as errors from the iterator.
//!
//! ## Usage
//!
//! ```rust
//! use orthosieve::table::TableReader;
//! use std::io::Cursor;
//!
//! let mut input = Cursor::new(b"qseqid\tsalltitles\nq1\tvenom protein\n".to_vec());
//! let mut table = TableReader::new(&mut input).unwrap();
//!
//! let row = table.next().unwrap().unwrap();
//! assert_eq!(row.get("salltitles").unwrap(), "venom protein");
//! assert!(row.get("evalue").is_err());
//! assert!(table.next().is_none());
//! ```
//!
use std::io::Read;
use std::rc::Rc;

use csv::ReaderBuilder;
use csv::StringRecord;
use indexmap::IndexMap;

type E = Box<dyn std::error::Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingColumn {
    pub column: String,
}

impl std::fmt::Display for MissingColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "column `{}` not found in header", self.column)
    }
}

impl std::error::Error for MissingColumn {}

#[derive(Debug, Clone)]
pub struct EmptyTable;

impl std::fmt::Display for EmptyTable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "no header line in input")
    }
}

impl std::error::Error for EmptyTable {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooManyFields {
    pub line: Option<u64>,
    pub expected: usize,
    pub found: usize,
}

impl std::fmt::Display for TooManyFields {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "expected {} fields on line {}, found {}", self.expected, line, self.found),
            None => write!(f, "expected {} fields, found {}", self.expected, self.found),
        }
    }
}

impl std::error::Error for TooManyFields {}

/// Column names of a table and their positions.
///
/// If a name appears more than once, lookups resolve to the first
/// occurrence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Header {
    columns: IndexMap<String, usize>,
    n_fields: usize,
}

impl Header {
    pub fn from_record(
        record: &StringRecord,
    ) -> Self {
        let mut columns: IndexMap<String, usize> = IndexMap::new();
        record.iter().enumerate().for_each(|(idx, name)| {
            columns.entry(name.to_string()).or_insert(idx);
        });
        Header{ columns, n_fields: record.len() }
    }

    /// Position of `column` in the header.
    pub fn position(
        &self,
        column: &str,
    ) -> Result<usize, MissingColumn> {
        self.columns.get(column).copied().ok_or_else(|| MissingColumn{ column: column.to_string() })
    }

    pub fn names(&self) -> Vec<&str> {
        self.columns.keys().map(|name| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Number of fields on the header line, counting repeated names.
    pub fn n_fields(&self) -> usize {
        self.n_fields
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// A single data row.
#[derive(Clone, Debug)]
pub struct Row {
    header: Rc<Header>,
    record: StringRecord,
}

impl Row {
    /// Value of the field in `column`.
    pub fn get(
        &self,
        column: &str,
    ) -> Result<&str, MissingColumn> {
        let idx = self.header.position(column)?;
        Ok(self.field(idx))
    }

    /// Value of the field at `index`, or an empty string past the end.
    pub fn field(
        &self,
        index: usize,
    ) -> &str {
        self.record.get(index).unwrap_or("")
    }

    /// Line number of the row in the input, starting from 1 at the header.
    pub fn line(&self) -> Option<u64> {
        self.record.position().map(|pos| pos.line())
    }

    pub fn header(&self) -> &Header {
        &self.header
    }
}

pub struct TableReader<R: Read> {
    reader: csv::Reader<R>,
    header: Rc<Header>,
}

impl<R: Read> TableReader<R> {
    /// Consumes the header line from `conn`.
    ///
    /// Returns [EmptyTable] if `conn` has no header line.
    pub fn new(
        conn: R,
    ) -> Result<Self, E> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(b'\t')
            .flexible(true)
            .from_reader(conn);

        let header = Header::from_record(reader.headers()?);
        if header.is_empty() {
            return Err(Box::new(EmptyTable{}))
        }

        Ok(Self{ reader, header: Rc::new(header) })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }
}

impl<R: Read> Iterator for TableReader<R> {
    type Item = Result<Row, E>;

    fn next(
        &mut self,
    ) -> Option<Result<Row, E>> {
        let mut record = StringRecord::new();
        match self.reader.read_record(&mut record) {
            Ok(true) if record.len() > self.header.n_fields() => {
                Some(Err(Box::new(TooManyFields{
                    line: record.position().map(|pos| pos.line()),
                    expected: self.header.n_fields(),
                    found: record.len(),
                })))
            },
            Ok(true) => Some(Ok(Row{ header: Rc::clone(&self.header), record })),
            Ok(false) => None,
            Err(e) => Some(Err(Box::new(e))),
        }
    }
}
