use regex::RegexSet;

pub const DEFAULT_TEST_SOURCE_PATTERNS: &[&str] = &["/test_feeds/"];

/// Decides at registration time whether a feed URL points at a sandbox source.
///
/// Sandbox feeds stay available for on-demand fetches but are never picked up
/// by the background scheduler.
#[derive(Debug, Clone)]
pub struct TestSourceClassifier {
    patterns: RegexSet,
}

impl TestSourceClassifier {
    pub fn new<I, S>(patterns: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            patterns: RegexSet::new(patterns)?,
        })
    }

    /// Classifier that never flags a URL
    pub fn disabled() -> Self {
        Self {
            patterns: RegexSet::empty(),
        }
    }

    pub fn is_test_source(&self, url: &str) -> bool {
        self.patterns.is_match(url)
    }
}

impl Default for TestSourceClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_TEST_SOURCE_PATTERNS.iter().map(|p| regex::escape(p)))
            .unwrap_or_else(|_| Self::disabled())
    }
}
