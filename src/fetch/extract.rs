use regex::Regex;

/// Extracts absolute links that point at a single target host.
///
/// Matches `http`, `https` and `ftp` links whose authority is exactly the
/// configured host, in the order they appear in the body. Duplicates are
/// preserved; deduplication is the crawl engine's job. Relative links are
/// not resolved.
#[derive(Debug)]
pub struct LinkExtractor {
    pattern: Regex,
}

impl LinkExtractor {
    /// Compile the extraction pattern for the given host.
    pub fn new(host: &str) -> Self {
        // Trailing punctuation is dropped by the final character class,
        // which excludes `.` `,` and `:`.
        let pattern = Regex::new(&format!(
            r"(http|ftp|https)://({})([\w.,@?^=%&:/~+#-]*[\w@?^=%&/~+#-])?",
            regex::escape(host),
        ))
        .expect("escaped host always yields a valid pattern");

        Self { pattern }
    }

    /// Return every matching link found in `body`.
    pub fn links(&self, body: &str) -> Vec<String> {
        self.pattern
            .find_iter(body)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
