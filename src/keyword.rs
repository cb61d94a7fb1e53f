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

/// Separator between subject titles in the `salltitles` column.
pub const TITLE_SEPARATOR: &str = "<>";

/// Case-insensitive substring match against a keyword.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeywordMatcher {
    keyword: String,
    lowercase: String,
}

impl KeywordMatcher {
    pub fn new(
        keyword: &str,
    ) -> Self {
        KeywordMatcher{ keyword: keyword.to_string(), lowercase: keyword.to_lowercase() }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Returns true if `entry` contains the keyword, ignoring case.
    ///
    /// An empty keyword matches everything, including an empty entry.
    pub fn matches_entry(
        &self,
        entry: &str,
    ) -> bool {
        entry.to_lowercase().contains(&self.lowercase)
    }

    /// Returns true if every [TITLE_SEPARATOR] separated entry in `titles`
    /// contains the keyword.
    ///
    /// An empty `titles` is a single empty entry.
    pub fn matches_titles(
        &self,
        titles: &str,
    ) -> bool {
        titles.split(TITLE_SEPARATOR).all(|entry| self.matches_entry(entry))
    }
}
