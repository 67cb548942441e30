//! Languages the analysis backend can answer in.

use std::fmt;
use std::str::FromStr;

/// Response language for analysis requests and UI messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Language {
    #[default]
    En,
    Ru,
    Uz,
}

impl Language {
    /// All supported languages, in switcher order.
    pub const ALL: [Language; 3] = [Language::En, Language::Ru, Language::Uz];

    /// Map any locale code to a supported language.
    ///
    /// Only the primary subtag is considered (`ru-RU` -> `ru`). Codes the
    /// backend does not support, such as `tr`, fall back to English.
    pub fn from_code(code: &str) -> Self {
        let primary = code.split(['-', '_']).next().unwrap_or("").to_ascii_lowercase();
        match primary.as_str() {
            "ru" => Language::Ru,
            "uz" => Language::Uz,
            _ => Language::En,
        }
    }

    /// Two-letter code as sent to the backend.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
            Language::Uz => "uz",
        }
    }

    /// Name of the language in that language.
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ru => "Русский",
            Language::Uz => "O'zbekcha",
        }
    }

    /// The next language in switcher order.
    pub fn next(self) -> Self {
        match self {
            Language::En => Language::Ru,
            Language::Ru => Language::Uz,
            Language::Uz => Language::En,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_code(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Language::from_code("uz"), Language::Uz);
        assert_eq!(Language::from_code("ru-RU"), Language::Ru);
        assert_eq!(Language::from_code("EN"), Language::En);
        assert_eq!(Language::from_code("tr"), Language::En);
        assert_eq!(Language::from_code(""), Language::En);
    }

    #[test]
    fn test_next_cycles_through_all() {
        let mut lang = Language::En;
        for _ in 0..Language::ALL.len() {
            lang = lang.next();
        }
        assert_eq!(lang, Language::En);
    }
}
