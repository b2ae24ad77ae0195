#![forbid(unsafe_code)]

//! Build declarations: the single ordered channel a pattern source feeds
//! into a [`HyphenatorBuilder`](crate::HyphenatorBuilder).

/// One declaration from a pattern source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// Equivalent characters; the first one is the representative.
    Class(String),
    /// A pattern and one value digit per letter gap (`pattern.len() + 1`).
    Pattern { pattern: String, values: String },
    /// A word and the letter counts between its permitted breaks.
    Exception { word: String, segments: Vec<u32> },
}

impl Declaration {
    #[must_use]
    pub fn class(group: impl Into<String>) -> Self {
        Self::Class(group.into())
    }

    #[must_use]
    pub fn pattern(pattern: impl Into<String>, values: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            values: values.into(),
        }
    }

    #[must_use]
    pub fn exception(word: impl Into<String>, segments: Vec<u32>) -> Self {
        Self::Exception {
            word: word.into(),
            segments,
        }
    }

    /// Parse TeX pattern notation: digits interleaved with letters.
    ///
    /// - `"hy3p"` → pattern `"hyp"`, values `"0030"`
    /// - `".ex5am"` → pattern `".exam"`, values `"000500"`
    /// - `"2ph"` → pattern `"ph"`, values `"200"`
    ///
    /// Returns `None` for a token without letters or with two digits in a
    /// row.
    #[must_use]
    pub fn tex_pattern(token: &str) -> Option<Self> {
        let mut pattern = String::with_capacity(token.len());
        let mut values = String::with_capacity(token.len() + 1);
        let mut pending: Option<char> = None;

        for ch in token.chars() {
            if ch.is_ascii_digit() {
                if pending.is_some() {
                    return None;
                }
                pending = Some(ch);
            } else {
                values.push(pending.take().unwrap_or('0'));
                pattern.push(ch);
            }
        }
        values.push(pending.unwrap_or('0'));

        if pattern.is_empty() {
            return None;
        }
        Some(Self::Pattern { pattern, values })
    }

    /// Parse a hyphen-delimited exception: `"as-so-ciate"` → word
    /// `"associate"`, segments `[2, 2, 5]`. Empty runs are dropped.
    ///
    /// Returns `None` for a token without letters.
    #[must_use]
    pub fn tex_exception(token: &str) -> Option<Self> {
        let mut word = String::with_capacity(token.len());
        let mut segments = Vec::new();
        let mut run = 0u32;

        for ch in token.chars() {
            if ch == '-' {
                if run > 0 {
                    segments.push(run);
                }
                run = 0;
            } else {
                word.push(ch);
                run += 1;
            }
        }
        if run > 0 {
            segments.push(run);
        }

        if word.is_empty() {
            return None;
        }
        Some(Self::Exception { word, segments })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tex_pattern_interior_digit() {
        assert_eq!(
            Declaration::tex_pattern("hy3p"),
            Some(Declaration::pattern("hyp", "0030"))
        );
    }

    #[test]
    fn tex_pattern_leading_and_trailing_digits() {
        assert_eq!(
            Declaration::tex_pattern("2ph"),
            Some(Declaration::pattern("ph", "200"))
        );
        assert_eq!(
            Declaration::tex_pattern("ab4"),
            Some(Declaration::pattern("ab", "004"))
        );
    }

    #[test]
    fn tex_pattern_word_marker() {
        assert_eq!(
            Declaration::tex_pattern(".ex5am"),
            Some(Declaration::pattern(".exam", "000500"))
        );
    }

    #[test]
    fn tex_pattern_every_gap() {
        assert_eq!(
            Declaration::tex_pattern("1a2b3"),
            Some(Declaration::pattern("ab", "123"))
        );
    }

    #[test]
    fn tex_pattern_rejects_malformed() {
        assert_eq!(Declaration::tex_pattern(""), None);
        assert_eq!(Declaration::tex_pattern("123"), None);
        assert_eq!(Declaration::tex_pattern("a12b"), None);
    }

    #[test]
    fn tex_exception_segments() {
        assert_eq!(
            Declaration::tex_exception("hy-phen-ation"),
            Some(Declaration::exception("hyphenation", vec![2, 4, 5]))
        );
    }

    #[test]
    fn tex_exception_without_breaks() {
        assert_eq!(
            Declaration::tex_exception("present"),
            Some(Declaration::exception("present", vec![7]))
        );
    }

    #[test]
    fn tex_exception_drops_empty_runs() {
        assert_eq!(
            Declaration::tex_exception("-ta--ble-"),
            Some(Declaration::exception("table", vec![2, 3]))
        );
        assert_eq!(Declaration::tex_exception("--"), None);
    }
}
