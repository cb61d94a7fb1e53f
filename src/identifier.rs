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

/// File name suffix of BLASTP result tables.
pub const DEFAULT_SUFFIX: &str = "_result.txt";

/// Extension of the sequence files the identifiers refer to.
pub const DEFAULT_EXTENSION: &str = ".fa";

pub fn is_result_file(
    file_name: &str,
    suffix: &str,
) -> bool {
    file_name.ends_with(suffix)
}

/// Derive the sequence file name from a result table name
///
/// Replaces `suffix` at the end of `file_name` with `extension`.
///
/// Returns None if `file_name` does not end with `suffix`.
///
pub fn derive_identifier(
    file_name: &str,
    suffix: &str,
    extension: &str,
) -> Option<String> {
    file_name.strip_suffix(suffix).map(|stem| stem.to_string() + extension)
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn derive_identifier_from_result_file() {
        use super::derive_identifier;
        use super::{DEFAULT_EXTENSION, DEFAULT_SUFFIX};

        let got = derive_identifier("sample_01_result.txt", DEFAULT_SUFFIX, DEFAULT_EXTENSION);

        assert_eq!(got, Some("sample_01.fa".to_string()));
    }

    #[test]
    fn derive_identifier_only_strips_trailing_suffix() {
        use super::derive_identifier;
        use super::{DEFAULT_EXTENSION, DEFAULT_SUFFIX};

        let got = derive_identifier("OG_result.txt_result.txt", DEFAULT_SUFFIX, DEFAULT_EXTENSION);

        assert_eq!(got, Some("OG_result.txt.fa".to_string()));
    }

    #[test]
    fn derive_identifier_none_without_suffix() {
        use super::derive_identifier;
        use super::{DEFAULT_EXTENSION, DEFAULT_SUFFIX};

        assert_eq!(derive_identifier("sample_01.tsv", DEFAULT_SUFFIX, DEFAULT_EXTENSION), None);
        assert_eq!(derive_identifier("sample_01_result.txt.bak", DEFAULT_SUFFIX, DEFAULT_EXTENSION), None);
    }

    #[test]
    fn derive_identifier_custom_suffix_and_extension() {
        use super::derive_identifier;

        let got = derive_identifier("OG0000012.blastp.tsv", ".blastp.tsv", ".faa");

        assert_eq!(got, Some("OG0000012.faa".to_string()));
    }

    #[test]
    fn is_result_file_checks_suffix() {
        use super::is_result_file;
        use super::DEFAULT_SUFFIX;

        assert!(is_result_file("a_result.txt", DEFAULT_SUFFIX));
        assert!(!is_result_file("a_result.tsv", DEFAULT_SUFFIX));
        assert!(!is_result_file("notes.txt", DEFAULT_SUFFIX));
    }
}
