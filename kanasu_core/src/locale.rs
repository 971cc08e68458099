//! Locale handling and transcript language detection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// First and last code points of the Kannada Unicode block.
pub const KANNADA_BLOCK: std::ops::RangeInclusive<char> = '\u{0C80}'..='\u{0CFF}';

/// One of the two supported UI languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Kn,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Kn => "kn",
        }
    }

    /// Parses a stored locale code. Only `en` and `kn` are accepted.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "en" => Some(Locale::En),
            "kn" => Some(Locale::Kn),
            _ => None,
        }
    }

    /// BCP-47 tag handed to speech recognition and synthesis.
    pub fn speech_tag(&self) -> &'static str {
        match self {
            Locale::En => "en-IN",
            Locale::Kn => "kn-IN",
        }
    }

    /// Name of the language written in that language.
    pub fn native_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Kn => "ಕನ್ನಡ",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Locale::En => Locale::Kn,
            Locale::Kn => Locale::En,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

pub fn is_kannada_char(c: char) -> bool {
    KANNADA_BLOCK.contains(&c)
}

/// Classifies a transcript: Kannada if any character falls in the Kannada
/// block, English otherwise.
pub fn detect_locale(transcript: &str) -> Locale {
    if transcript.chars().any(is_kannada_char) {
        Locale::Kn
    } else {
        Locale::En
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_kannada_anywhere_in_transcript() {
        assert_eq!(detect_locale("ಮುಖಪುಟ"), Locale::Kn);
        assert_eq!(detect_locale("open ಶಿಫಾರಸು please"), Locale::Kn);
        assert_eq!(detect_locale("\u{0C80}"), Locale::Kn);
        assert_eq!(detect_locale("\u{0CFF}"), Locale::Kn);
    }

    #[test]
    fn defaults_to_english() {
        assert_eq!(detect_locale(""), Locale::En);
        assert_eq!(detect_locale("home"), Locale::En);
        // Telugu sits just below the Kannada block
        assert_eq!(detect_locale("ఇల్లు"), Locale::En);
        assert_eq!(detect_locale("घर"), Locale::En);
    }

    #[test]
    fn locale_codes_roundtrip() {
        assert_eq!(Locale::from_code("kn"), Some(Locale::Kn));
        assert_eq!(Locale::from_code(" en "), Some(Locale::En));
        assert_eq!(Locale::from_code("fr"), None);
        assert_eq!(Locale::Kn.speech_tag(), "kn-IN");
        assert_eq!(Locale::En.toggled(), Locale::Kn);
    }
}
