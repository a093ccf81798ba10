use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::error::TypeError;

/// A top-level-domain label in canonical form.
///
/// Leaf digests are computed over the canonical bytes, so every path that
/// hashes a TLD (tree build, proof lookup, verification) must go through
/// [`Tld::parse`]. Normalization:
///
/// 1. surrounding whitespace is trimmed;
/// 2. one leading and one trailing `.` are stripped (`.com`, `com.` and
///    `com` are the same TLD);
/// 3. the label is lowercased and put in Unicode NFC form;
/// 4. an empty result, a remaining leading or trailing `.`, and any
///    whitespace, control or invisible format character (zero-width space,
///    bidi marks, BOM) are rejected.
///
/// Canonical labels never start or end with `.`, so parsing is idempotent.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tld(String);

impl Tld {
    /// Normalize and validate a raw TLD string.
    pub fn parse(raw: &str) -> Result<Self, TypeError> {
        let trimmed = raw.trim();
        let trimmed = trimmed.strip_prefix('.').unwrap_or(trimmed);
        let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
        if trimmed.is_empty() {
            return Err(TypeError::EmptyTld);
        }

        let canonical: String = trimmed.to_lowercase().nfc().collect();
        if canonical.starts_with('.') || canonical.ends_with('.') {
            return Err(TypeError::InvalidTldChar { tld: canonical, ch: '.' });
        }
        if let Some(ch) = canonical
            .chars()
            .find(|&c| c.is_whitespace() || c.is_control() || is_format_char(c))
        {
            return Err(TypeError::InvalidTldChar { tld: canonical, ch });
        }
        Ok(Self(canonical))
    }

    /// The canonical label.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The canonical UTF-8 bytes that get hashed into a leaf.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

/// Invisible format characters (Unicode `Cf`) that would make two labels
/// render identically but hash differently.
fn is_format_char(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}'
            | '\u{0600}'..='\u{0605}'
            | '\u{061C}'
            | '\u{06DD}'
            | '\u{070F}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206F}'
            | '\u{FEFF}'
            | '\u{FFF9}'..='\u{FFFB}'
            | '\u{E0001}'
            | '\u{E0020}'..='\u{E007F}'
    )
}

impl fmt::Debug for Tld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tld({})", self.0)
    }
}

impl fmt::Display for Tld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Tld {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Tld {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Tld> for String {
    fn from(tld: Tld) -> Self {
        tld.0
    }
}

impl AsRef<str> for Tld {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn canonical_input_is_unchanged() {
        let tld = Tld::parse("com").unwrap();
        assert_eq!(tld.as_str(), "com");
    }

    #[test]
    fn case_and_whitespace_are_normalized() {
        let a = Tld::parse("  COM\n").unwrap();
        let b = Tld::parse("com").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn single_leading_dot_is_stripped() {
        assert_eq!(Tld::parse(".io").unwrap().as_str(), "io");
        assert!(matches!(
            Tld::parse("..io"),
            Err(TypeError::InvalidTldChar { ch: '.', .. })
        ));
    }

    #[test]
    fn single_trailing_dot_is_stripped() {
        assert_eq!(Tld::parse("com.").unwrap(), Tld::parse("com").unwrap());
        assert_eq!(Tld::parse(" .COM. ").unwrap().as_str(), "com");
        assert!(matches!(
            Tld::parse("com.."),
            Err(TypeError::InvalidTldChar { ch: '.', .. })
        ));
        assert_eq!(Tld::parse("..").unwrap_err(), TypeError::EmptyTld);
    }

    #[test]
    fn inner_dot_is_kept() {
        assert_eq!(Tld::parse("co.uk.").unwrap().as_str(), "co.uk");
    }

    #[test]
    fn unicode_labels_are_lowercased() {
        assert_eq!(Tld::parse("ÉCOLE").unwrap().as_str(), "école");
    }

    #[test]
    fn composed_and_decomposed_forms_are_equal() {
        let composed = Tld::parse("\u{e9}cole").unwrap();
        let decomposed = Tld::parse("e\u{301}cole").unwrap();
        assert_eq!(composed, decomposed);
        assert_eq!(decomposed.as_bytes(), "\u{e9}cole".as_bytes());
        assert_eq!(Tld::parse("E\u{301}COLE").unwrap(), composed);
    }

    #[test]
    fn zero_width_and_bidi_characters_are_rejected() {
        for (raw, bad) in [
            ("co\u{200b}m", '\u{200b}'),
            ("\u{feff}com", '\u{feff}'),
            ("c\u{200d}om", '\u{200d}'),
            ("com\u{202e}", '\u{202e}'),
            ("co\u{ad}m", '\u{ad}'),
        ] {
            assert_eq!(
                Tld::parse(raw).unwrap_err(),
                TypeError::InvalidTldChar { tld: raw.to_lowercase(), ch: bad },
                "{raw:?}"
            );
        }
    }

    #[test]
    fn empty_is_rejected() {
        assert_eq!(Tld::parse("").unwrap_err(), TypeError::EmptyTld);
        assert_eq!(Tld::parse("   ").unwrap_err(), TypeError::EmptyTld);
        assert_eq!(Tld::parse(" . ").unwrap_err(), TypeError::EmptyTld);
        assert_eq!(Tld::parse(".").unwrap_err(), TypeError::EmptyTld);
    }

    #[test]
    fn inner_whitespace_is_rejected() {
        let err = Tld::parse("my tld").unwrap_err();
        assert_eq!(
            err,
            TypeError::InvalidTldChar {
                tld: "my tld".into(),
                ch: ' '
            }
        );
    }

    #[test]
    fn control_characters_are_rejected() {
        assert!(matches!(
            Tld::parse("co\u{0}m"),
            Err(TypeError::InvalidTldChar { ch: '\u{0}', .. })
        ));
    }

    #[test]
    fn serde_goes_through_normalization() {
        let tld: Tld = serde_json::from_str("\"XYZ\"").unwrap();
        assert_eq!(tld.as_str(), "xyz");
        assert_eq!(serde_json::to_string(&tld).unwrap(), "\"xyz\"");
        assert!(serde_json::from_str::<Tld>("\"\"").is_err());
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(raw in "[ \t]{0,2}\\.?[A-Za-z0-9\u{e9}\u{301}-]{1,12}\\.?[ \t]{0,2}") {
            let once = Tld::parse(&raw).unwrap();
            let twice = Tld::parse(once.as_str()).unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}
