//! Value parsers shared by `/proc` file parsers.
//!
//! These are pure functions over string tokens and are designed to be easily
//! testable with string inputs.

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// Parses a single integer token, returning `None` on malformed input.
///
/// The radix is taken from the literal prefix: `0x` hex, `0o` octal, `0b`
/// binary, a bare leading `0` octal, decimal otherwise. An optional `+`/`-`
/// sign may precede the prefix.
pub fn parse_pint64(token: &str) -> Option<i64> {
    let (negative, rest) = match token.as_bytes().first()? {
        b'-' => (true, &token[1..]),
        b'+' => (false, &token[1..]),
        _ => (false, token),
    };

    let (radix, digits) = if let Some(d) = rest
        .strip_prefix("0x")
        .or_else(|| rest.strip_prefix("0X"))
    {
        (16, d)
    } else if let Some(d) = rest
        .strip_prefix("0o")
        .or_else(|| rest.strip_prefix("0O"))
    {
        (8, d)
    } else if let Some(d) = rest
        .strip_prefix("0b")
        .or_else(|| rest.strip_prefix("0B"))
    {
        (2, d)
    } else if rest.len() > 1 && rest.starts_with('0') {
        (8, &rest[1..])
    } else {
        (10, rest)
    };

    // from_str_radix accepts its own sign; only one is allowed, before the prefix.
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return None;
    }

    let magnitude = i128::from_str_radix(digits, radix).ok()?;
    let value = if negative { -magnitude } else { magnitude };
    i64::try_from(value).ok()
}

/// Parses every token as a base-10 integer.
///
/// Unlike [`parse_pint64`] this is all-or-nothing: the first malformed token
/// fails the whole list.
pub fn parse_pint64s<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Option<i64>>, ParseError> {
    tokens
        .iter()
        .map(|token| {
            let token = token.as_ref();
            token
                .parse::<i64>()
                .map(Some)
                .map_err(|e| ParseError::new(format!("invalid integer {:?}: {}", token, e)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pint64_decimal() {
        assert_eq!(parse_pint64("0"), Some(0));
        assert_eq!(parse_pint64("3952"), Some(3952));
        assert_eq!(parse_pint64("-17"), Some(-17));
        assert_eq!(parse_pint64("+42"), Some(42));
        assert_eq!(parse_pint64("9223372036854775807"), Some(i64::MAX));
        assert_eq!(parse_pint64("-9223372036854775808"), Some(i64::MIN));
    }

    #[test]
    fn test_parse_pint64_prefixed() {
        assert_eq!(parse_pint64("0x1f"), Some(31));
        assert_eq!(parse_pint64("0XFF"), Some(255));
        assert_eq!(parse_pint64("0o17"), Some(15));
        assert_eq!(parse_pint64("017"), Some(15));
        assert_eq!(parse_pint64("0b101"), Some(5));
        assert_eq!(parse_pint64("-0x10"), Some(-16));
    }

    #[test]
    fn test_parse_pint64_malformed() {
        assert_eq!(parse_pint64(""), None);
        assert_eq!(parse_pint64("-"), None);
        assert_eq!(parse_pint64("abc"), None);
        assert_eq!(parse_pint64("12kB"), None);
        assert_eq!(parse_pint64("0x"), None);
        assert_eq!(parse_pint64("--5"), None);
        assert_eq!(parse_pint64("0x-5"), None);
        assert_eq!(parse_pint64("08"), None);
        assert_eq!(parse_pint64("9223372036854775808"), None);
    }

    #[test]
    fn test_parse_pint64s_all_valid() {
        let values = parse_pint64s(&["0", "2877", "7826"]).unwrap();
        assert_eq!(values, vec![Some(0), Some(2877), Some(7826)]);
    }

    #[test]
    fn test_parse_pint64s_rejects_whole_list() {
        let err = parse_pint64s(&["0", "x", "7826"]).unwrap_err();
        assert!(err.message.contains("\"x\""));
    }

    #[test]
    fn test_parse_pint64s_empty() {
        let empty: [&str; 0] = [];
        assert_eq!(parse_pint64s(&empty).unwrap(), Vec::<Option<i64>>::new());
    }
}
