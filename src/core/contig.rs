use serde::{Deserialize, Serialize};

/// A single contig/sequence from a sequence dictionary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contig {
    /// Sequence name (SN tag in SAM)
    pub name: String,

    /// Sequence length (LN tag in SAM)
    pub length: u64,

    /// MD5 checksum of the sequence (M5 tag in SAM)
    /// Lowercase hex, 32 characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,

    /// Assembly identifier (AS tag in SAM)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assembly: Option<String>,

    /// URI where sequence can be retrieved (UR tag in SAM)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    /// Species (SP tag in SAM)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,

    /// Known alternative names for this contig (AN tag in SAM)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl Contig {
    pub fn new(name: impl Into<String>, length: u64) -> Self {
        Self {
            name: name.into(),
            length,
            md5: None,
            assembly: None,
            uri: None,
            species: None,
            aliases: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn with_md5(mut self, md5: impl Into<String>) -> Self {
        self.md5 = Some(md5.into());
        self
    }

    #[cfg(test)]
    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| (*a).to_string()).collect();
        self
    }

    /// Check whether a span of `span_length` bases starting at the 1-based
    /// `position` lies entirely on this contig.
    ///
    /// A zero-length span (an unavailable sequence) only needs its start to
    /// be on the contig.
    #[must_use]
    pub fn contains_span(&self, position: u64, span_length: u64) -> bool {
        if position == 0 || position > self.length {
            return false;
        }
        let end = position.saturating_add(span_length.saturating_sub(1));
        end <= self.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_span() {
        let contig = Contig::new("chr1", 100);

        assert!(contig.contains_span(1, 100));
        assert!(contig.contains_span(91, 10));
        assert!(contig.contains_span(100, 1));
        assert!(contig.contains_span(100, 0));

        assert!(!contig.contains_span(0, 1));
        assert!(!contig.contains_span(92, 10));
        assert!(!contig.contains_span(101, 0));
        assert!(!contig.contains_span(1, 101));
    }

    #[test]
    fn test_contains_span_does_not_overflow() {
        let contig = Contig::new("chr1", u64::MAX);
        assert!(contig.contains_span(u64::MAX, 1));
        assert!(!contig.contains_span(u64::MAX, 2));
    }
}
