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
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use orthosieve::identifier::{DEFAULT_EXTENSION, DEFAULT_SUFFIX};

#[derive(Parser)]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    // Keep BLASTP result tables where every subject title contains a keyword
    #[command(about = "Filter BLASTP results and save valid FASTA file names")]
    Blastp {
        // Directory with one result table per query file
        #[arg(long = "blastp_dir", required = true, help = "Directory containing BLASTP result files")]
        blastp_dir: PathBuf,

        // Output file path
        #[arg(long = "output_list", required = true, help = "Path to save the list of valid FASTA file names")]
        output_list: PathBuf,

        // Case-insensitive match against each title in `salltitles`
        #[arg(long = "keyword", required = true, help = "Keyword to filter results in 'salltitles' column")]
        keyword: String,

        // Suffix marking result tables
        #[arg(long = "suffix", default_value = DEFAULT_SUFFIX, help = "File name suffix of BLASTP result files")]
        suffix: String,

        // Extension replacing the suffix in the output
        #[arg(long = "extension", default_value = DEFAULT_EXTENSION, help = "Extension of the listed FASTA files")]
        extension: String,

        // Verbosity
        #[arg(long = "verbose", default_value_t = false)]
        verbose: bool,
    },

    // Keep orthogroups with genes from only one species
    #[command(about = "Filter species-specific orthogroups")]
    SpeciesSpecific {
        // Orthogroups.GeneCount.tsv
        #[arg(long = "file_path", required = true, help = "Path to the Orthogroups.GeneCount.tsv file")]
        file_path: PathBuf,

        #[arg(long = "species_column", required = true, help = "Name of the species column")]
        species_column: String,

        // Output file path
        #[arg(long = "output_file", required = true, help = "Path to save the filtered orthogroups")]
        output_file: PathBuf,

        // Verbosity
        #[arg(long = "verbose", default_value_t = false)]
        verbose: bool,
    },

    // Keep orthogroups holding an unassigned gene from one species
    #[command(about = "Filter unassigned genes for a specific species")]
    Unassigned {
        // Orthogroups_UnassignedGenes.tsv
        #[arg(long = "file_path", required = true, help = "Path to the Orthogroups_UnassignedGenes.tsv file")]
        file_path: PathBuf,

        #[arg(long = "species_column", required = true, help = "Name of the species column")]
        species_column: String,

        // Output file path
        #[arg(long = "output_file", required = true, help = "Path to save the filtered unassigned genes")]
        output_file: PathBuf,

        // Verbosity
        #[arg(long = "verbose", default_value_t = false)]
        verbose: bool,
    },
}
