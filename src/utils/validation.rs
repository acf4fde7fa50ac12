//! Centralized validation and helper functions.
//!
//! The name and sequence rules are the SAMv1 format rules for the
//! mandatory QNAME, RNAME and SEQ columns.

/// Maximum number of contigs allowed in a single dictionary (DOS protection)
pub const MAX_CONTIGS: usize = 100_000;

/// Largest 1-based position a SAM POS column can hold (2^31 - 1)
pub const MAX_POSITION: u64 = 2_147_483_647;

/// Maximum length of a SAM QNAME
pub const MAX_READ_NAME_LENGTH: usize = 254;

/// Validate that a string is a valid MD5 checksum (32 hex characters).
///
/// # Examples
///
/// ```
/// use mas_to_sam::utils::validation::is_valid_md5;
///
/// assert!(is_valid_md5("6aef897c3d6ff0c78aff06ac189178dd"));
/// assert!(!is_valid_md5("not-an-md5"));
/// assert!(!is_valid_md5("6aef897c3d6ff0c78aff06ac189178d")); // 31 chars
/// ```
#[must_use]
pub fn is_valid_md5(s: &str) -> bool {
    s.len() == 32 && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Normalize an MD5 string to lowercase.
/// Returns None if the input is not a valid MD5.
#[must_use]
pub fn normalize_md5(s: &str) -> Option<String> {
    if is_valid_md5(s) {
        Some(s.to_lowercase())
    } else {
        None
    }
}

/// Check if adding another contig would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new contig.
/// Returns an error message if adding would exceed the limit, None if safe to add.
///
/// # Example
/// ```ignore
/// if check_contig_limit(contigs.len()).is_some() {
///     return Err(...);
/// }
/// contigs.push(new_contig); // Safe to add
/// ```
#[must_use]
pub fn check_contig_limit(count: usize) -> Option<String> {
    if count >= MAX_CONTIGS {
        Some(format!(
            "Too many contigs: adding another would exceed maximum of {MAX_CONTIGS}"
        ))
    } else {
        None
    }
}

/// Validate a read name against the SAM QNAME rule `[!-?A-~]{1,254}`.
///
/// ```
/// use mas_to_sam::utils::validation::is_valid_read_name;
///
/// assert!(is_valid_read_name("read_1/1"));
/// assert!(!is_valid_read_name("has space"));
/// assert!(!is_valid_read_name("at@sign"));
/// ```
#[must_use]
pub fn is_valid_read_name(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= MAX_READ_NAME_LENGTH
        && s.bytes().all(|b| matches!(b, b'!'..=b'?' | b'A'..=b'~'))
}

/// Validate a reference name against the SAM RNAME rule
/// `[0-9A-Za-z!#$%&+./:;?@^_|~-][0-9A-Za-z!#$%&*+./:;=?@^_|~-]*`.
///
/// ```
/// use mas_to_sam::utils::validation::is_valid_reference_name;
///
/// assert!(is_valid_reference_name("chr1"));
/// assert!(is_valid_reference_name("HLA-A*01:01:01:01"));
/// assert!(!is_valid_reference_name("*chr1"));
/// ```
#[must_use]
pub fn is_valid_reference_name(s: &str) -> bool {
    let mut bytes = s.bytes();
    match bytes.next() {
        Some(first) if is_reference_name_byte(first) && first != b'*' && first != b'=' => {
            bytes.all(is_reference_name_byte)
        }
        _ => false,
    }
}

fn is_reference_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'!' | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'*'
                | b'+'
                | b'.'
                | b'/'
                | b':'
                | b';'
                | b'='
                | b'?'
                | b'@'
                | b'^'
                | b'_'
                | b'|'
                | b'~'
                | b'-'
        )
}

/// Validate a read string against the SAM SEQ rule `\*|[A-Za-z=.]+`.
///
/// ```
/// use mas_to_sam::utils::validation::is_valid_sequence;
///
/// assert!(is_valid_sequence("ACGTN"));
/// assert!(is_valid_sequence("*"));
/// assert!(!is_valid_sequence("AC-GT"));
/// ```
#[must_use]
pub fn is_valid_sequence(s: &str) -> bool {
    s == "*"
        || (!s.is_empty()
            && s.bytes()
                .all(|b| b.is_ascii_alphabetic() || b == b'=' || b == b'.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_md5() {
        assert!(is_valid_md5("6aef897c3d6ff0c78aff06ac189178dd"));
        assert!(is_valid_md5("AABBCCDD11223344556677889900AABB")); // uppercase ok
        assert!(!is_valid_md5("not-an-md5"));
        assert!(!is_valid_md5("6aef897c3d6ff0c78aff06ac189178d")); // 31 chars
        assert!(!is_valid_md5("6aef897c3d6ff0c78aff06ac189178ddd")); // 33 chars
        assert!(!is_valid_md5("")); // empty
        assert!(!is_valid_md5("6aef897c3d6ff0c78aff06ac189178dg")); // invalid char
    }

    #[test]
    fn test_normalize_md5() {
        assert_eq!(
            normalize_md5("6AEF897C3D6FF0C78AFF06AC189178DD"),
            Some("6aef897c3d6ff0c78aff06ac189178dd".to_string())
        );
        assert_eq!(normalize_md5("invalid"), None);
    }

    #[test]
    fn test_check_contig_limit() {
        assert!(check_contig_limit(100).is_none());
        assert!(check_contig_limit(MAX_CONTIGS - 1).is_none());
        assert!(check_contig_limit(MAX_CONTIGS).is_some());
        assert!(check_contig_limit(MAX_CONTIGS + 1).is_some());
    }

    #[test]
    fn test_read_name_rules() {
        assert!(is_valid_read_name("r1"));
        assert!(is_valid_read_name("SRR000001.1:lane1"));
        assert!(is_valid_read_name(&"a".repeat(MAX_READ_NAME_LENGTH)));

        assert!(!is_valid_read_name(""));
        assert!(!is_valid_read_name(&"a".repeat(MAX_READ_NAME_LENGTH + 1)));
        assert!(!is_valid_read_name("read\t1"));
        assert!(!is_valid_read_name("read@1"));
        assert!(!is_valid_read_name("réad"));
    }

    #[test]
    fn test_reference_name_rules() {
        assert!(is_valid_reference_name("chr1"));
        assert!(is_valid_reference_name("1"));
        assert!(is_valid_reference_name("NC_000001.11"));
        assert!(is_valid_reference_name("chrUn_KI270302v1"));
        assert!(is_valid_reference_name("a=b"));

        assert!(!is_valid_reference_name(""));
        assert!(!is_valid_reference_name("*"));
        assert!(!is_valid_reference_name("=chr1"));
        assert!(!is_valid_reference_name("chr 1"));
        assert!(!is_valid_reference_name("chr1,chr2"));
        assert!(!is_valid_reference_name("{chr1}"));
    }

    #[test]
    fn test_sequence_rules() {
        assert!(is_valid_sequence("ACGT"));
        assert!(is_valid_sequence("acgtn"));
        assert!(is_valid_sequence("AC=.T"));
        assert!(is_valid_sequence("*"));

        assert!(!is_valid_sequence(""));
        assert!(!is_valid_sequence("**"));
        assert!(!is_valid_sequence("AC GT"));
        assert!(!is_valid_sequence("ACGT1"));
    }
}
