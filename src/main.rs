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
use clap::{CommandFactory, Parser};
use log::error;

use orthosieve::KeywordResultFilter;

mod cli;

/// Initializes the logger with verbosity given in `log_max_level`.
fn init_log(log_max_level: usize) {
    let res = stderrlog::new()
    .module(module_path!())
    .quiet(false)
    .verbosity(log_max_level)
    .timestamp(stderrlog::Timestamp::Off)
    .init();

    if let Err(e) = res {
        eprintln!("Failed to initialize logging: {}", e);
    }
}

/// Runs `command`, or prints the help text if no subcommand was given.
fn run(
    command: &Option<cli::Commands>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Subcommands:
    match command {
        // Keyword filter on BLASTP results
        Some(cli::Commands::Blastp {
            blastp_dir,
            output_list,
            keyword,
            suffix,
            extension,
            verbose,
        }) => {
            init_log(if *verbose { 2 } else { 1 });

            let filter = KeywordResultFilter::new(keyword)
                .with_suffix(suffix)
                .with_extension(extension);
            orthosieve::filter_blastp_dir(&filter, blastp_dir, output_list).map(|_| ())
        },

        // Species-specific orthogroups
        Some(cli::Commands::SpeciesSpecific {
            file_path,
            species_column,
            output_file,
            verbose,
        }) => {
            init_log(if *verbose { 2 } else { 1 });
            orthosieve::filter_species_specific(file_path, species_column, output_file).map(|_| ())
        },

        // Orthogroups with unassigned genes
        Some(cli::Commands::Unassigned {
            file_path,
            species_column,
            output_file,
            verbose,
        }) => {
            init_log(if *verbose { 2 } else { 1 });
            orthosieve::filter_unassigned_genes(file_path, species_column, output_file).map(|_| ())
        },

        None => {
            init_log(1);
            cli::Cli::command().print_help()?;
            Ok(())
        },
    }
}

fn main() {
    let cli = cli::Cli::parse();

    if let Err(e) = run(&cli.command) {
        error!("{}", e);
        std::process::exit(1);
    }
}
