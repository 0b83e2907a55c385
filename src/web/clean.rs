//! Text cleaning for fetched page content.
//!
//! Cleaning runs in a fixed order so the result is a fixed point: cleaning
//! already-cleaned text changes nothing. Character stripping happens before
//! fragment filtering, so a fragment cannot shrink below the keep threshold
//! after it was accepted.

use regex::Regex;

/// Shortest fragment worth keeping, in characters
const MIN_FRAGMENT_CHARS: usize = 4;

/// Normalizes extracted page text for downstream prompting
pub struct TextCleaner {
    disallowed: Regex,
    whitespace: Regex,
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl TextCleaner {
    pub fn new() -> Self {
        Self {
            // Word characters, whitespace, basic punctuation, accented Latin letters
            disallowed: Regex::new(r#"[^\w\s.,!?;:()\-\[\]"áàâãéèêíìîóòôõúùûçÁÀÂÃÉÈÊÍÌÎÓÒÔÕÚÙÛÇ]"#)
                .expect("static pattern"),
            whitespace: Regex::new(r"\s+").expect("static pattern"),
        }
    }

    /// Strip disallowed characters, drop short fragments, collapse whitespace.
    ///
    /// Fragments are line pieces separated by runs of two or more spaces,
    /// which is how layout debris (menus, breadcrumbs, share buttons)
    /// typically arrives after HTML text extraction.
    pub fn clean(&self, raw: &str) -> String {
        let stripped = self.disallowed.replace_all(raw, " ");

        let mut kept: Vec<String> = Vec::new();
        for line in stripped.lines() {
            for fragment in line.split("  ") {
                // Normalize before the length check so a kept fragment can
                // never shrink below the threshold on a later pass
                let fragment = self.whitespace.replace_all(fragment.trim(), " ");
                if fragment.chars().count() >= MIN_FRAGMENT_CHARS {
                    kept.push(fragment.into_owned());
                }
            }
        }

        kept.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_collapses_whitespace_and_newlines() {
        let cleaner = TextCleaner::new();
        let out = cleaner.clean("Rust is fast.\n\n\n   Rust is safe.\t\tAlso fun.");
        assert_eq!(out, "Rust is fast. Rust is safe. Also fun.");
    }

    #[test]
    fn test_drops_short_fragments() {
        let cleaner = TextCleaner::new();
        // "OK" and "Go" are layout debris isolated by double spaces
        let out = cleaner.clean("OK  A long sentence about compilers.  Go");
        assert_eq!(out, "A long sentence about compilers.");
    }

    #[test]
    fn test_strips_disallowed_characters() {
        let cleaner = TextCleaner::new();
        let out = cleaner.clean("Prices rose 5% — traders cheered © 2024");
        assert!(!out.contains('%'));
        assert!(!out.contains('©'));
        assert!(out.contains("Prices rose 5"));
    }

    #[test]
    fn test_keeps_accented_text() {
        let cleaner = TextCleaner::new();
        let out = cleaner.clean("São Paulo é uma cidade grande.");
        assert_eq!(out, "São Paulo é uma cidade grande.");
    }

    #[test]
    fn test_empty_input() {
        let cleaner = TextCleaner::new();
        assert_eq!(cleaner.clean(""), "");
        assert_eq!(cleaner.clean("   \n\t  "), "");
    }

    proptest! {
        /// Cleaning is a fixed point: a second pass changes nothing.
        #[test]
        fn clean_is_idempotent(input in "\\PC{0,300}") {
            let cleaner = TextCleaner::new();
            let once = cleaner.clean(&input);
            let twice = cleaner.clean(&once);
            prop_assert_eq!(once, twice);
        }
    }
}
