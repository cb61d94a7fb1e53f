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

//! Filters for OrthoFinder orthogroup tables.
//!
//! Both filters return orthogroup identifiers with the sequence file
//! extension appended (`OG0000001` becomes `OG0000001.fa`) in the order the
//! rows appear in the input.
//!
use std::io::Read;

use crate::identifier::DEFAULT_EXTENSION;
use crate::table::Row;
use crate::table::TableReader;

type E = Box<dyn std::error::Error>;

/// Column holding the orthogroup identifier.
pub const ORTHOGROUP_COLUMN: &str = "Orthogroup";

/// Column holding the gene count across all species.
pub const TOTAL_COLUMN: &str = "Total";

/// Cell contents treated as a missing value.
///
/// Same markers as the default missing-value set of pandas `read_csv`.
pub const NA_VALUES: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan",
    "1.#IND", "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a",
    "nan", "null",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidCount {
    pub column: String,
    pub value: String,
    pub line: Option<u64>,
}

impl std::fmt::Display for InvalidCount {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "invalid gene count `{}` in column `{}` on line {}", self.value, self.column, line),
            None => write!(f, "invalid gene count `{}` in column `{}`", self.value, self.column),
        }
    }
}

impl std::error::Error for InvalidCount {}

pub fn is_missing(
    cell: &str,
) -> bool {
    NA_VALUES.contains(&cell)
}

fn read_count(
    row: &Row,
    column: &str,
    index: usize,
) -> Result<u64, InvalidCount> {
    let value = row.field(index);
    value.trim().parse::<u64>().map_err(|_| InvalidCount{
        column: column.to_string(),
        value: value.to_string(),
        line: row.line(),
    })
}

/// Find orthogroups with genes from only one species
///
/// Reads an `Orthogroups.GeneCount.tsv` table from `conn` and keeps the
/// orthogroups where the count in `species_column` equals the count in
/// [TOTAL_COLUMN].
///
/// ## Errors
///
/// Returns an error if `species_column`, [TOTAL_COLUMN] or
/// [ORTHOGROUP_COLUMN] is not in the header, if a count is not a
/// non-negative integer, or if the table is malformed.
///
pub fn species_specific_orthogroups<R: Read>(
    species_column: &str,
    conn: R,
) -> Result<Vec<String>, E> {
    let mut table = TableReader::new(conn)?;
    let orthogroup = table.header().position(ORTHOGROUP_COLUMN)?;
    let species = table.header().position(species_column)?;
    let total = table.header().position(TOTAL_COLUMN)?;

    let mut identifiers: Vec<String> = Vec::new();
    for row in table.by_ref() {
        let row = row?;
        let n_species = read_count(&row, species_column, species)?;
        let n_total = read_count(&row, TOTAL_COLUMN, total)?;
        if n_species == n_total {
            identifiers.push(row.field(orthogroup).to_string() + DEFAULT_EXTENSION);
        }
    }

    Ok(identifiers)
}

/// Find orthogroups holding an unassigned gene from a species
///
/// Reads an `Orthogroups_UnassignedGenes.tsv` table from `conn` and keeps
/// the rows where `species_column` is not missing. Rows with a missing
/// orthogroup identifier are dropped. See [NA_VALUES].
///
/// ## Errors
///
/// Returns an error if `species_column` or [ORTHOGROUP_COLUMN] is not in the
/// header, or if the table is malformed.
///
pub fn unassigned_genes<R: Read>(
    species_column: &str,
    conn: R,
) -> Result<Vec<String>, E> {
    let mut table = TableReader::new(conn)?;
    let orthogroup = table.header().position(ORTHOGROUP_COLUMN)?;
    let species = table.header().position(species_column)?;

    let mut identifiers: Vec<String> = Vec::new();
    for row in table.by_ref() {
        let row = row?;
        if is_missing(row.field(species)) || is_missing(row.field(orthogroup)) {
            continue;
        }
        identifiers.push(row.field(orthogroup).to_string() + DEFAULT_EXTENSION);
    }

    Ok(identifiers)
}
