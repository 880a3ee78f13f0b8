// SPDX-License-Identifier: PMPL-1.0-or-later

//! The closed set of greeting languages.

use serde::Serialize;
use std::str::FromStr;

/// Every language any catalog revision has ever offered.
///
/// Which of these a user can actually pick depends on the active
/// [`Revision`](super::Revision).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Language {
    English,
    German,
    Spanish,
    #[serde(rename = "isiXhosa")]
    IsiXhosa,
    Zulu,
    French,
}

impl Language {
    /// All known languages, in picker order.
    pub fn all() -> &'static [Language] {
        &[
            Language::English,
            Language::German,
            Language::Spanish,
            Language::IsiXhosa,
            Language::Zulu,
            Language::French,
        ]
    }

    /// Label shown in the language picker.
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::German => "German",
            Language::Spanish => "Spanish",
            Language::IsiXhosa => "isiXhosa",
            Language::Zulu => "Zulu",
            Language::French => "French",
        }
    }

    /// ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::German => "de",
            Language::Spanish => "es",
            Language::IsiXhosa => "xh",
            Language::Zulu => "zu",
            Language::French => "fr",
        }
    }

    /// Parse either the picker label or the ISO code, ignoring case.
    pub fn from_name(input: &str) -> Option<Language> {
        let needle = input.trim();
        Language::all().iter().copied().find(|lang| {
            lang.name().eq_ignore_ascii_case(needle) || lang.code().eq_ignore_ascii_case(needle)
        })
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::English
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_name(s).ok_or_else(|| {
            let known: Vec<&str> = Language::all().iter().map(|l| l.name()).collect();
            format!("unknown language '{}' (expected one of: {})", s, known.join(", "))
        })
    }
}
