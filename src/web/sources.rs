//! Static source catalog.
//!
//! Terms map to curated URL lists rather than live search results. A term
//! matches a catalog entry when any word of the entry's key appears in the
//! normalized term; unmatched terms fall back to a general-purpose list.

use tracing::debug;

/// Curated URL lists keyed by topic phrase
const CATALOG: &[(&str, &[&str])] = &[
    (
        "learn python",
        &[
            "https://docs.python.org/3/tutorial/",
            "https://www.python.org/",
            "https://realpython.com/",
            "https://www.w3schools.com/python/",
            "https://www.learnpython.org/",
        ],
    ),
    (
        "python tutorial",
        &[
            "https://docs.python.org/3/tutorial/",
            "https://www.codecademy.com/learn/learn-python-3",
            "https://www.learnpython.org/",
            "https://www.tutorialspoint.com/python/",
            "https://automatetheboringstuff.com/",
        ],
    ),
    (
        "python beginners",
        &[
            "https://www.python.org/about/gettingstarted/",
            "https://realpython.com/python-beginner-tips/",
            "https://www.w3schools.com/python/python_intro.asp",
            "https://docs.python.org/3/tutorial/introduction.html",
            "https://pythonspot.com/",
        ],
    ),
    (
        "python syntax",
        &[
            "https://docs.python.org/3/reference/",
            "https://www.w3schools.com/python/python_syntax.asp",
            "https://realpython.com/python-syntax/",
            "https://docs.python.org/3/tutorial/introduction.html",
            "https://www.programiz.com/python-programming/syntax",
        ],
    ),
    (
        "python examples code",
        &[
            "https://github.com/python/cpython",
            "https://realpython.com/python-practice-problems/",
            "https://www.programiz.com/python-programming/examples",
            "https://docs.python.org/3/tutorial/",
            "https://www.w3resource.com/python-exercises/",
        ],
    ),
];

/// URLs served when no catalog entry matches
const FALLBACK: &[&str] = &[
    "https://docs.python.org/3/",
    "https://www.python.org/",
    "https://realpython.com/",
    "https://www.w3schools.com/python/",
    "https://www.programiz.com/python-programming/",
];

/// Resolves search terms to candidate URLs
pub struct SourceCatalog;

impl SourceCatalog {
    /// Look up URLs for a term, capped at `max_pages`.
    ///
    /// The first catalog entry with a word overlap wins; no match serves
    /// the fallback list.
    pub fn lookup(term: &str, max_pages: usize) -> Vec<String> {
        let normalized = term.to_lowercase();
        let normalized = normalized.trim();

        for (key, urls) in CATALOG {
            if key.split_whitespace().any(|word| normalized.contains(word)) {
                debug!(term, key, "Catalog match");
                return urls.iter().take(max_pages).map(|s| s.to_string()).collect();
            }
        }

        debug!(term, "No catalog match, using fallback sources");
        FALLBACK.iter().take(max_pages).map(|s| s.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_overlap_match() {
        let urls = SourceCatalog::lookup("how to learn python fast", 5);
        assert_eq!(urls.len(), 5);
        assert!(urls[0].contains("docs.python.org"));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let a = SourceCatalog::lookup("Python Tutorial", 3);
        let b = SourceCatalog::lookup("python tutorial", 3);
        assert_eq!(a, b);
    }

    #[test]
    fn test_max_pages_caps_results() {
        let urls = SourceCatalog::lookup("python syntax", 2);
        assert_eq!(urls.len(), 2);
    }

    #[test]
    fn test_fallback_on_no_match() {
        let urls = SourceCatalog::lookup("completely unrelated topic", 5);
        assert_eq!(urls, FALLBACK.iter().map(|s| s.to_string()).collect::<Vec<_>>());
    }
}
