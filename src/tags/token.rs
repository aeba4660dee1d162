//! Splitting the input buffer into committed tokens and the token being typed.

/// The only delimiter. There is no escaping, so a tag cannot contain it.
pub const SEPARATOR: char = ',';

/// A buffer split at [`SEPARATOR`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedBuffer {
    /// Every segment but the last, trimmed. Empty segments are kept.
    pub committed: Vec<String>,
    /// The last segment, trimmed. Empty right after a separator.
    pub current: String,
}

/// Parse a buffer into committed tokens and the current token.
///
/// Total over all input: splitting yields at least one segment, so an empty
/// buffer parses to no committed tokens and an empty current token.
pub fn parse(buffer: &str) -> ParsedBuffer {
    let mut committed: Vec<String> = buffer
        .split(SEPARATOR)
        .map(|part| part.trim().to_string())
        .collect();
    let current = committed.pop().unwrap_or_default();

    ParsedBuffer { committed, current }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        let parsed = parse("");
        assert!(parsed.committed.is_empty());
        assert_eq!(parsed.current, "");
    }

    #[test]
    fn test_parse_three_tokens() {
        let parsed = parse("a, b, c");
        assert_eq!(parsed.committed, vec!["a", "b"]);
        assert_eq!(parsed.current, "c");
    }

    #[test]
    fn test_parse_trailing_separator() {
        let parsed = parse("a,");
        assert_eq!(parsed.committed, vec!["a"]);
        assert_eq!(parsed.current, "");
    }

    #[test]
    fn test_parse_single_token_is_current() {
        let parsed = parse("  rust ");
        assert!(parsed.committed.is_empty());
        assert_eq!(parsed.current, "rust");
    }

    #[test]
    fn test_parse_keeps_empty_committed_segments() {
        let parsed = parse("a,, ,b");
        assert_eq!(parsed.committed, vec!["a", "", ""]);
        assert_eq!(parsed.current, "b");
    }

    #[test]
    fn test_parse_whitespace_only() {
        let parsed = parse("   ");
        assert!(parsed.committed.is_empty());
        assert_eq!(parsed.current, "");
    }

    #[test]
    fn test_parse_preserves_case() {
        let parsed = parse("Go, RUST");
        assert_eq!(parsed.committed, vec!["Go"]);
        assert_eq!(parsed.current, "RUST");
    }
}
